use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::{Config, OAuthProviderConfig},
    error::{config::ConfigError, AppError},
    state::{OAuth2Client, OAuthClients},
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the schema is up-to-date before any request is
/// served.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the session layer backed by the same Sqlite database.
///
/// Sessions expire after 7 days without activity.
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Layer ready to wrap the router
/// - `Err(AppError::DbErr)` - Failed to create the session table
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store
        .migrate()
        .await
        .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    Ok(session_layer)
}

/// HTTP client for provider calls. Redirects are not followed.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the OAuth clients of every provider.
///
/// # Returns
/// - `Ok(OAuthClients)` - Facebook, Google and Foursquare clients
/// - `Err(AppError::ConfigErr)` - An endpoint or callback URL does not parse
pub fn setup_oauth_clients(config: &Config) -> Result<OAuthClients, AppError> {
    Ok(OAuthClients {
        facebook: oauth_client(&config.facebook)?,
        google: oauth_client(&config.google)?,
        foursquare: oauth_client(&config.foursquare)?,
    })
}

fn oauth_client(provider: &OAuthProviderConfig) -> Result<OAuth2Client, ConfigError> {
    let invalid = |name: &str, value: &str| ConfigError::InvalidEnvVar(name.to_string(), value.to_string());

    let client = BasicClient::new(ClientId::new(provider.client_id.clone()))
        .set_client_secret(ClientSecret::new(provider.client_secret.clone()))
        .set_auth_uri(
            AuthUrl::new(provider.auth_url.clone())
                .map_err(|_| invalid("auth_url", &provider.auth_url))?,
        )
        .set_token_uri(
            TokenUrl::new(provider.token_url.clone())
                .map_err(|_| invalid("token_url", &provider.token_url))?,
        )
        .set_redirect_uri(
            RedirectUrl::new(provider.redirect_url.clone())
                .map_err(|_| invalid("redirect_url", &provider.redirect_url))?,
        );

    Ok(client)
}

/// Creates the upload directory; an existing one is left as is.
pub async fn ensure_upload_dir(config: &Config) -> Result<(), AppError> {
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(redirect_url: &str) -> OAuthProviderConfig {
        OAuthProviderConfig {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            auth_url: "https://provider.test/authorize".to_string(),
            token_url: "https://provider.test/token".to_string(),
            redirect_url: redirect_url.to_string(),
        }
    }

    #[test]
    fn oauth_client_rejects_bad_callback() {
        assert!(oauth_client(&provider("http://localhost:7000/auth/google/callback")).is_ok());
        assert!(matches!(
            oauth_client(&provider("not a url")),
            Err(ConfigError::InvalidEnvVar(name, _)) if name == "redirect_url"
        ));
    }
}
