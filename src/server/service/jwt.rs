//! API bearer tokens.
//!
//! Tokens are HS256 JWTs carrying the member id and issue time. They do not expire.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::server::{
    error::{auth::AuthError, internal::InternalError, AppError},
    model::token::Claims,
};

/// Scheme prefix of issued tokens.
pub const TOKEN_SCHEME: &str = "JWT";

/// Signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Signs a token for `user_id`.
    ///
    /// # Returns
    /// - `Ok(String)` - Token including the `JWT ` scheme prefix, ready for the Authorization header
    /// - `Err(AppError::InternalErr)` - Signing failed
    pub fn issue(&self, user_id: i32) -> Result<String, AppError> {
        let claims = Claims {
            id: user_id,
            iat: Utc::now().timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|source| InternalError::JwtEncode { user_id, source })?;

        Ok(format!("{} {}", TOKEN_SCHEME, token))
    }

    /// Verifies a bare token (without scheme) and returns its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidJwt)
    }

    /// Reads and verifies the token in the `Authorization` header.
    ///
    /// # Returns
    /// - `Ok(Claims)` - Valid token
    /// - `Err(AuthError::InvalidJwt)` - Header missing, wrong scheme, or bad token
    pub fn claims_from_headers(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let value = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::InvalidJwt)?;

        let token = extract_token(value).ok_or(AuthError::InvalidJwt)?;

        self.decode(token)
    }
}

/// Splits `JWT <token>` or `Bearer <token>`; the scheme is case-insensitive.
pub fn extract_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    let token = token.trim();

    let known = scheme.eq_ignore_ascii_case(TOKEN_SCHEME) || scheme.eq_ignore_ascii_case("bearer");
    if known && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn issued_token_decodes_to_same_user() {
        let keys = JwtKeys::new("secret");
        let issued = keys.issue(12).unwrap();

        let token = extract_token(&issued).unwrap();
        let claims = keys.decode(token).unwrap();

        assert!(issued.starts_with("JWT "));
        assert_eq!(claims.id, 12);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let issued = JwtKeys::new("one").issue(1).unwrap();
        let token = extract_token(&issued).unwrap();

        assert!(matches!(
            JwtKeys::new("two").decode(token),
            Err(AuthError::InvalidJwt)
        ));
    }

    #[test]
    fn extracts_known_schemes_only() {
        assert_eq!(extract_token("JWT abc"), Some("abc"));
        assert_eq!(extract_token("bearer abc"), Some("abc"));
        assert_eq!(extract_token("Basic abc"), None);
        assert_eq!(extract_token("JWT"), None);
        assert_eq!(extract_token("abc"), None);
    }

    #[test]
    fn reads_claims_from_headers() {
        let keys = JwtKeys::new("secret");
        let mut headers = HeaderMap::new();

        assert!(keys.claims_from_headers(&headers).is_err());

        let issued = keys.issue(3).unwrap();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&issued).unwrap());

        assert_eq!(keys.claims_from_headers(&headers).unwrap().id, 3);
    }
}
