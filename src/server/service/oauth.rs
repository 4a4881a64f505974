//! OAuth sign-in, account linking and provider authorization.
//!
//! Facebook and Google identify a member and may create or link accounts. Foursquare only
//! authorizes API access for a member who is already logged in.

use oauth2::{AuthorizationCode, CsrfToken, Scope, TokenResponse};
use sea_orm::DatabaseConnection;
use url::Url;

use crate::server::{
    data::{user::UserRepository, user_token::UserTokenRepository},
    error::{auth::AuthError, AppError},
    model::{
        oauth::{
            FacebookProfile, GoogleProfile, Provider, ProviderProfile, SignInOutcome, SignInPlan,
        },
        user::{CreateUserParam, UpdateProfileParam, User},
    },
    state::OAuth2Client,
};

const FACEBOOK_PROFILE_URL: &str = "https://graph.facebook.com/v2.8/me";
const FACEBOOK_PROFILE_FIELDS: &str = "id,name,first_name,last_name,email,gender,location";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Decides what a provider callback does.
///
/// # Arguments
/// - `current_user` - Member logged in to this session, if any
/// - `provider_owner` - Member already linked to the provider account
/// - `email_owner` - Member holding the profile email
pub fn plan_sign_in(
    current_user: Option<i32>,
    provider_owner: Option<i32>,
    email_owner: Option<i32>,
) -> SignInPlan {
    match (current_user, provider_owner) {
        (Some(current), Some(owner)) if owner != current => SignInPlan::RejectLinkedElsewhere,
        (Some(current), _) => SignInPlan::Link { user_id: current },
        (None, Some(owner)) => SignInPlan::SignInExisting { user_id: owner },
        (None, None) => match email_owner {
            Some(_) => SignInPlan::RejectEmailTaken,
            None => SignInPlan::CreateAccount,
        },
    }
}

pub fn linked_elsewhere_message(provider: Provider) -> String {
    format!(
        "There is already a {} account that belongs to you. Sign in with that account or delete it, then link it with your current account.",
        provider.display_name()
    )
}

pub fn email_taken_message(provider: Provider) -> String {
    format!(
        "There is already an account using this email address. Sign in to that account and link it with {} manually from Account Settings.",
        provider.display_name()
    )
}

pub struct OAuthService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    oauth_client: &'a OAuth2Client,
    provider: Provider,
}

impl<'a> OAuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        provider: Provider,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            provider,
        }
    }

    /// Builds the provider authorize URL with a fresh CSRF state.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        let request = self.oauth_client.authorize_url(CsrfToken::new_random);

        let request = match self.provider {
            Provider::Facebook => request
                .add_scope(Scope::new("email".to_string()))
                .add_scope(Scope::new("user_location".to_string())),
            Provider::Google => request
                .add_scope(Scope::new("profile".to_string()))
                .add_scope(Scope::new("email".to_string())),
            Provider::Foursquare => request,
        };

        request.url()
    }

    /// Trades an authorization code for the provider access token.
    async fn exchange(&self, code: String) -> Result<String, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        Ok(token.access_token().secret().to_string())
    }

    /// Fetches and normalizes the member's identity at a sign-in provider.
    async fn fetch_profile(&self, access_token: &str) -> Result<ProviderProfile, AppError> {
        let profile = match self.provider {
            Provider::Facebook => self
                .http_client
                .get(FACEBOOK_PROFILE_URL)
                .query(&[
                    ("fields", FACEBOOK_PROFILE_FIELDS),
                    ("access_token", access_token),
                ])
                .send()
                .await?
                .error_for_status()?
                .json::<FacebookProfile>()
                .await?
                .into_profile(),
            Provider::Google => self
                .http_client
                .get(GOOGLE_USERINFO_URL)
                .bearer_auth(access_token)
                .send()
                .await?
                .error_for_status()?
                .json::<GoogleProfile>()
                .await?
                .into_profile(),
            Provider::Foursquare => {
                return Err(AppError::BadRequest(
                    "Foursquare cannot be used to sign in".to_string(),
                ))
            }
        };

        Ok(profile)
    }

    /// Completes a sign-in provider callback.
    ///
    /// # Arguments
    /// - `code` - Authorization code from the callback query
    /// - `current_user` - Member logged in to this session, if any
    ///
    /// # Returns
    /// - `Ok(SignInOutcome)` - What happened, including rejections shown as flash errors
    /// - `Err(AppError)` - Token exchange, provider request or database failure
    pub async fn callback(
        &self,
        code: String,
        current_user: Option<i32>,
    ) -> Result<SignInOutcome, AppError> {
        let access_token = self.exchange(code).await?;
        let profile = self.fetch_profile(&access_token).await?;

        self.apply(profile, access_token, current_user).await
    }

    /// Looks up existing owners of the profile and executes the resulting plan.
    pub async fn apply(
        &self,
        profile: ProviderProfile,
        access_token: String,
        current_user: Option<i32>,
    ) -> Result<SignInOutcome, AppError> {
        let user_repo = UserRepository::new(self.db);

        let provider_owner = user_repo
            .find_by_provider_id(profile.provider, &profile.id)
            .await?
            .map(|user| user.id);
        let email_owner = match profile.email.as_deref() {
            Some(email) => user_repo.find_by_email(email).await?.map(|user| user.id),
            None => None,
        };

        let outcome = match plan_sign_in(current_user, provider_owner, email_owner) {
            SignInPlan::RejectLinkedElsewhere => SignInOutcome::Rejected {
                message: linked_elsewhere_message(profile.provider),
            },
            SignInPlan::RejectEmailTaken => SignInOutcome::Rejected {
                message: email_taken_message(profile.provider),
            },
            SignInPlan::Link { user_id } => {
                self.link(user_id, profile, access_token).await?;
                SignInOutcome::Linked { user_id }
            }
            SignInPlan::SignInExisting { user_id } => SignInOutcome::SignedIn { user_id },
            SignInPlan::CreateAccount => {
                let user = self.create(profile, access_token).await?;
                SignInOutcome::Created { user_id: user.id }
            }
        };

        Ok(outcome)
    }

    async fn link(
        &self,
        user_id: i32,
        profile: ProviderProfile,
        access_token: String,
    ) -> Result<(), AppError> {
        let user_repo = UserRepository::new(self.db);
        let user = user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotInDatabase(user_id))?;

        user_repo
            .set_provider_id(user_id, profile.provider, Some(profile.id))
            .await?;
        UserTokenRepository::new(self.db)
            .create(user_id, profile.provider.as_str(), access_token)
            .await?;

        let fill = UpdateProfileParam {
            name: profile.name.filter(|_| is_blank(user.name.as_deref())),
            gender: profile.gender.filter(|_| user.gender.is_empty()),
            picture: profile.picture.filter(|_| is_blank(user.picture.as_deref())),
            ..Default::default()
        };
        user_repo.update_profile(user_id, fill).await?;

        tracing::info!(
            "User {} linked {} account",
            user_id,
            profile.provider.as_str()
        );

        Ok(())
    }

    async fn create(&self, profile: ProviderProfile, access_token: String) -> Result<User, AppError> {
        let provider = profile.provider;
        let (facebook, google, location) = match provider {
            Provider::Facebook => (Some(profile.id), None, profile.location),
            _ => (None, Some(profile.id), None),
        };

        let user = UserRepository::new(self.db)
            .create(CreateUserParam {
                email: profile.email,
                facebook,
                google,
                name: profile.name,
                gender: profile.gender,
                location,
                picture: profile.picture,
                ..Default::default()
            })
            .await?;
        UserTokenRepository::new(self.db)
            .create(user.id, provider.as_str(), access_token)
            .await?;

        tracing::info!("Created user {} from {} sign-in", user.id, provider.as_str());

        Ok(user)
    }

    /// Completes an authorization-only callback by storing the token on `user_id`.
    pub async fn authorize(&self, code: String, user_id: i32) -> Result<(), AppError> {
        let access_token = self.exchange(code).await?;

        UserTokenRepository::new(self.db)
            .create(user_id, self.provider.as_str(), access_token)
            .await?;

        tracing::debug!("User {} authorized {}", user_id, self.provider.as_str());

        Ok(())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
