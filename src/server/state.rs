//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and cloned into each handler through
//! Axum's state extraction. Every field is cheap to clone.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;

use crate::server::{
    model::oauth::Provider,
    service::{jwt::JwtKeys, storage::PhotoStorage},
};

/// OAuth2 client with the authorize and token endpoints set.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// One configured client per supported provider.
#[derive(Clone)]
pub struct OAuthClients {
    pub facebook: OAuth2Client,
    pub google: OAuth2Client,
    pub foursquare: OAuth2Client,
}

impl OAuthClients {
    pub fn get(&self, provider: Provider) -> &OAuth2Client {
        match provider {
            Provider::Facebook => &self.facebook,
            Provider::Google => &self.google,
            Provider::Foursquare => &self.foursquare,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    /// Connection pool for the SQLite database.
    pub db: DatabaseConnection,

    /// HTTP client for provider APIs and token exchanges.
    ///
    /// Configured not to follow redirects.
    pub http_client: reqwest::Client,

    pub oauth_clients: OAuthClients,

    /// Signs and verifies API tokens.
    pub jwt_keys: JwtKeys,

    /// Value the `/api` key gateway expects.
    pub api_key: String,

    /// Member allowed to open the admin panel.
    pub admin_user_id: Option<i32>,

    /// Upload directory and public URL base for photos.
    pub storage: PhotoStorage,
}
