use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/signup`.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, Default)]
pub struct SignupDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "confirmPassword")]
    pub confirm_password: String,
}

/// Body of `POST /api/login`.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, Default)]
pub struct LoginDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Issued API token, already carrying its `JWT ` scheme prefix.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct TokenDto {
    pub token: String,
    pub id: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq, Eq)]
pub struct PhotoDto {
    pub id: i32,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
    #[serde(rename = "highresURL")]
    pub highres_url: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct ProfileDto {
    pub name: Option<String>,
    pub gender: String,
    pub location: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub picture: Option<String>,
    pub avatar: Option<PhotoDto>,
    pub photos: Vec<PhotoDto>,
}

/// `GET /api/members/{member_id}` payload.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct MemberDto {
    pub email: Option<String>,
    pub profile: ProfileDto,
}

/// Payload of the profile mutating endpoints.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct ProfileResponseDto {
    pub profile: ProfileDto,
}

/// Body of `PATCH /api/members/{member_id}`. Absent fields keep their stored value.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, Default)]
pub struct UpdateProfileDto {
    pub email: Option<String>,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Id of one of the member's own photos.
    pub avatar: Option<i32>,
}
