use crate::server::error::{config::ConfigError, AppError};

const FACEBOOK_AUTH_URL: &str = "https://www.facebook.com/v2.8/dialog/oauth";
const FACEBOOK_TOKEN_URL: &str = "https://graph.facebook.com/v2.8/oauth/access_token";
const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://www.googleapis.com/oauth2/v4/token";
const FOURSQUARE_AUTH_URL: &str = "https://foursquare.com/oauth2/authorize";
const FOURSQUARE_TOKEN_URL: &str = "https://foursquare.com/oauth2/access_token";

const DEFAULT_APP_URL: &str = "http://localhost:7000";
const DEFAULT_PORT: u16 = 7000;
const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Client credentials and endpoints of one OAuth provider.
#[derive(Clone, Debug)]
pub struct OAuthProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    pub redirect_url: String,
}

impl OAuthProviderConfig {
    fn with_endpoints(
        auth_url: &str,
        token_url: &str,
        client_id: String,
        client_secret: String,
        redirect_url: String,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            auth_url: auth_url.to_string(),
            token_url: token_url.to_string(),
            redirect_url,
        }
    }

    pub fn facebook(client_id: String, client_secret: String, app_url: &str) -> Self {
        let redirect_url = format!("{}/auth/facebook/callback", app_url);
        Self::with_endpoints(
            FACEBOOK_AUTH_URL,
            FACEBOOK_TOKEN_URL,
            client_id,
            client_secret,
            redirect_url,
        )
    }

    pub fn google(client_id: String, client_secret: String, app_url: &str) -> Self {
        let redirect_url = format!("{}/auth/google/callback", app_url);
        Self::with_endpoints(
            GOOGLE_AUTH_URL,
            GOOGLE_TOKEN_URL,
            client_id,
            client_secret,
            redirect_url,
        )
    }

    /// Foursquare registers its callback separately, so the redirect URL is passed as is.
    pub fn foursquare(client_id: String, client_secret: String, redirect_url: String) -> Self {
        Self::with_endpoints(
            FOURSQUARE_AUTH_URL,
            FOURSQUARE_TOKEN_URL,
            client_id,
            client_secret,
            redirect_url,
        )
    }
}

pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub api_key: String,

    pub app_url: String,
    pub port: u16,
    pub upload_dir: String,
    pub admin_user_id: Option<i32>,

    pub facebook: OAuthProviderConfig,
    pub google: OAuthProviderConfig,
    pub foursquare: OAuthProviderConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Expects `dotenvy::dotenv()` to have run already so a local `.env` file is honored.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or a value fails to parse
    pub fn from_env() -> Result<Self, AppError> {
        let app_url = optional_var("APP_URL")
            .unwrap_or_else(|| DEFAULT_APP_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let port = match optional_var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidEnvVar("PORT".to_string(), port))?,
            None => DEFAULT_PORT,
        };

        let admin_user_id = match optional_var("ADMIN_USER_ID") {
            Some(id) => Some(
                id.parse::<i32>()
                    .map_err(|_| ConfigError::InvalidEnvVar("ADMIN_USER_ID".to_string(), id))?,
            ),
            None => None,
        };

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            jwt_secret: required_var("JWT_SECRET")?,
            api_key: required_var("API_KEY")?,
            upload_dir: optional_var("UPLOAD_DIR")
                .unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
            port,
            admin_user_id,
            facebook: OAuthProviderConfig::facebook(
                required_var("FACEBOOK_ID")?,
                required_var("FACEBOOK_SECRET")?,
                &app_url,
            ),
            google: OAuthProviderConfig::google(
                required_var("GOOGLE_ID")?,
                required_var("GOOGLE_SECRET")?,
                &app_url,
            ),
            foursquare: OAuthProviderConfig::foursquare(
                required_var("FOURSQUARE_ID")?,
                required_var("FOURSQUARE_SECRET")?,
                required_var("FOURSQUARE_REDIRECT_URL")?,
            ),
            app_url,
        })
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Treats an empty value the same as an unset one.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foursquare_uses_authorize_endpoint() {
        let config = OAuthProviderConfig::foursquare(
            "id".to_string(),
            "secret".to_string(),
            "http://localhost:7000/auth/foursquare/callback".to_string(),
        );

        assert_eq!(config.auth_url, "https://foursquare.com/oauth2/authorize");
        assert_eq!(config.token_url, "https://foursquare.com/oauth2/access_token");
        assert_eq!(
            config.redirect_url,
            "http://localhost:7000/auth/foursquare/callback"
        );
    }

    #[test]
    fn sign_in_providers_call_back_to_the_app() {
        let facebook =
            OAuthProviderConfig::facebook("id".to_string(), "secret".to_string(), "http://a.test");
        let google =
            OAuthProviderConfig::google("id".to_string(), "secret".to_string(), "http://a.test");

        assert_eq!(facebook.redirect_url, "http://a.test/auth/facebook/callback");
        assert_eq!(google.redirect_url, "http://a.test/auth/google/callback");
    }
}
