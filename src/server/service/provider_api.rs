//! Read-only calls to provider APIs with a member's stored access token.

use futures::try_join;
use reqwest::RequestBuilder;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::Value;

use crate::server::{
    data::user_token::UserTokenRepository,
    error::{auth::AuthError, AppError},
    model::{oauth::Provider, user::User},
};

const FACEBOOK_GRAPH_URL: &str = "https://graph.facebook.com/v2.8";
const FACEBOOK_FIELDS: &str = "id,name,email,first_name,last_name,gender,link,locale,timezone";

const FOURSQUARE_API_URL: &str = "https://api.foursquare.com/v2";
const FOURSQUARE_VERSION: &str = "20170101";
const FOURSQUARE_TRENDING_LL: &str = "40.7222756,-74.0022724";
const FOURSQUARE_TRENDING_LIMIT: &str = "50";
const FOURSQUARE_VENUE_ID: &str = "49da74aef964a5208b5e1fe3";

/// Combined Foursquare data shown on the API page.
#[derive(Debug, Serialize)]
pub struct FoursquareOverview {
    #[serde(rename = "trendingVenues")]
    pub trending_venues: Value,
    #[serde(rename = "venueDetail")]
    pub venue: Value,
    #[serde(rename = "userCheckins")]
    pub checkins: Value,
}

pub struct ProviderApiService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
}

impl<'a> ProviderApiService<'a> {
    pub fn new(db: &'a DatabaseConnection, http_client: &'a reqwest::Client) -> Self {
        Self { db, http_client }
    }

    /// Newest stored token of a provider, or a redirect to authorize it.
    async fn access_token(&self, user_id: i32, provider: Provider) -> Result<String, AppError> {
        let token = UserTokenRepository::new(self.db)
            .find_by_kind(user_id, provider.as_str())
            .await?
            .ok_or_else(|| AuthError::ProviderNotAuthorized(provider.as_str().to_string()))?;

        Ok(token.access_token)
    }

    /// Graph profile of the member's linked Facebook account.
    pub async fn facebook_profile(&self, user: &User) -> Result<Value, AppError> {
        let access_token = self.access_token(user.id, Provider::Facebook).await?;
        let facebook_id = user
            .facebook
            .as_deref()
            .ok_or_else(|| AuthError::ProviderNotAuthorized(Provider::Facebook.as_str().to_string()))?;

        let request = self
            .http_client
            .get(format!("{}/{}", FACEBOOK_GRAPH_URL, facebook_id))
            .query(&[("fields", FACEBOOK_FIELDS), ("access_token", access_token.as_str())]);

        fetch_json(request).await
    }

    /// Trending venues, one fixed venue and the member's check-ins, fetched concurrently.
    pub async fn foursquare_overview(&self, user_id: i32) -> Result<FoursquareOverview, AppError> {
        let access_token = self.access_token(user_id, Provider::Foursquare).await?;
        let auth = [
            ("oauth_token", access_token.as_str()),
            ("v", FOURSQUARE_VERSION),
        ];

        let trending = self
            .http_client
            .get(format!("{}/venues/trending", FOURSQUARE_API_URL))
            .query(&auth)
            .query(&[
                ("ll", FOURSQUARE_TRENDING_LL),
                ("limit", FOURSQUARE_TRENDING_LIMIT),
            ]);
        let venue = self
            .http_client
            .get(format!("{}/venues/{}", FOURSQUARE_API_URL, FOURSQUARE_VENUE_ID))
            .query(&auth);
        let checkins = self
            .http_client
            .get(format!("{}/users/self/checkins", FOURSQUARE_API_URL))
            .query(&auth);

        let (trending_venues, venue, checkins) =
            try_join!(fetch_json(trending), fetch_json(venue), fetch_json(checkins))?;

        Ok(FoursquareOverview {
            trending_venues,
            venue,
            checkins,
        })
    }
}

async fn fetch_json(request: RequestBuilder) -> Result<Value, AppError> {
    let value = request
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await?;

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    use crate::server::data::user::UserRepository;

    /// Tests calling Foursquare without a stored token.
    ///
    /// Expected: Err(ProviderNotAuthorized) before any request is made
    #[tokio::test]
    async fn foursquare_requires_token() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let http = reqwest::Client::new();

        let user = factory::create_user(db).await?;

        let result = ProviderApiService::new(db, &http)
            .foursquare_overview(user.id)
            .await;

        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::ProviderNotAuthorized(p))) if p == "foursquare"
        ));

        Ok(())
    }

    /// Tests the Facebook call for a member with a token but no linked account id.
    ///
    /// Expected: Err(ProviderNotAuthorized)
    #[tokio::test]
    async fn facebook_requires_linked_account() -> Result<(), AppError> {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let http = reqwest::Client::new();

        let user = factory::create_user(db).await?;
        factory::helpers::add_token(db, user.id, "facebook").await?;
        let user = UserRepository::new(db).find_by_id(user.id).await?.unwrap();

        let result = ProviderApiService::new(db, &http).facebook_profile(&user).await;

        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::ProviderNotAuthorized(_)))
        ));

        Ok(())
    }
}
