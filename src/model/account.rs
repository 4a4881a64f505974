//! Form bodies and responses of the session-based account pages.

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Clone, Debug, Default)]
pub struct LoginFormDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct SignupFormDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "confirmPassword")]
    pub confirm_password: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ProfileFormDto {
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct PasswordFormDto {
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "confirmPassword")]
    pub confirm_password: String,
}

/// Account page data for the logged in member.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AccountDto {
    pub id: i32,
    pub email: Option<String>,
    pub name: Option<String>,
    pub gender: String,
    pub location: String,
    pub website: Option<String>,
    pub picture: Option<String>,
    pub facebook: Option<String>,
    pub google: Option<String>,
    /// Provider kinds the member holds an access token for.
    pub tokens: Vec<String>,
}

/// Flash messages drained from the session.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FlashDto {
    pub errors: Vec<String>,
    pub info: Vec<String>,
    pub success: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CsrfTokenDto {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
}
