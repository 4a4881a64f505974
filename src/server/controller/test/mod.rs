use axum::{
    body::to_bytes,
    http::{header, HeaderMap, HeaderValue},
    response::Response,
};
use sea_orm::DatabaseConnection;
use serde_json::Value;

use crate::server::{
    config::{Config, OAuthProviderConfig},
    service::{jwt::JwtKeys, storage::PhotoStorage},
    startup,
    state::AppState,
};

mod account;
mod event;

const TEST_API_KEY: &str = "test-api-key";
const TEST_JWT_SECRET: &str = "test-jwt-secret";

fn provider_config(provider: &str) -> OAuthProviderConfig {
    OAuthProviderConfig {
        client_id: format!("{}-id", provider),
        client_secret: format!("{}-secret", provider),
        auth_url: format!("https://{}.test/authorize", provider),
        token_url: format!("https://{}.test/token", provider),
        redirect_url: format!("http://localhost:7000/auth/{}/callback", provider),
    }
}

/// Application state over the test database, with `admin_user_id` as the admin.
fn test_state(db: &DatabaseConnection, admin_user_id: Option<i32>) -> AppState {
    let upload_dir = std::env::temp_dir().join(format!(
        "meetup-controller-{}-{}",
        std::process::id(),
        rand::random::<u32>()
    ));

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        api_key: TEST_API_KEY.to_string(),
        app_url: "http://localhost:7000".to_string(),
        port: 7000,
        upload_dir: upload_dir.to_string_lossy().to_string(),
        admin_user_id,
        facebook: provider_config("facebook"),
        google: provider_config("google"),
        foursquare: provider_config("foursquare"),
    };

    AppState {
        db: db.clone(),
        http_client: startup::setup_reqwest_client().unwrap(),
        oauth_clients: startup::setup_oauth_clients(&config).unwrap(),
        jwt_keys: JwtKeys::new(&config.jwt_secret),
        api_key: config.api_key.clone(),
        admin_user_id,
        storage: PhotoStorage::new(&config.upload_dir, config.app_url.clone()),
    }
}

/// Headers carrying a freshly issued token for `user_id`.
fn auth_headers(state: &AppState, user_id: i32) -> HeaderMap {
    let token = state.jwt_keys.issue(user_id).unwrap();

    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&token).unwrap(),
    );
    headers
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Redirect target of a response.
fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
