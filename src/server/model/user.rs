//! Member domain models and parameters.
//!
//! A member signs in with a local password, with one or more linked OAuth providers, or
//! both. Profile fields live on the same row as the credentials.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        account::{AccountDto, PasswordFormDto, ProfileFormDto},
        admin::AdminUserDto,
        user::{MemberDto, ProfileDto, UpdateProfileDto},
    },
    server::{
        error::AppError,
        model::photo::Photo,
        util::{sanitize::clean_opt, validate::Validator},
    },
};

pub const DEFAULT_GENDER: &str = "male";
pub const DEFAULT_LOCATION: &str = "Hong Kong";
pub const GENDERS: [&str; 3] = ["male", "female", "other"];

const EMAIL_BLANK: &str = "Email cannot be blank.";
const EMAIL_INVALID: &str = "Please enter a valid email address.";
const PASSWORD_BLANK: &str = "Password cannot be blank.";
const PASSWORD_SHORT: &str = "Password must be at least 6 characters long";

/// Member account with credentials, linked providers and profile.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// Stored lowercased.
    pub email: Option<String>,
    /// Argon2 PHC string, absent for provider-only accounts.
    pub password_hash: Option<String>,
    pub facebook: Option<String>,
    pub google: Option<String>,
    pub name: Option<String>,
    pub gender: String,
    pub location: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Provider supplied picture URL.
    pub picture: Option<String>,
    pub avatar_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password,
            facebook: entity.facebook,
            google: entity.google,
            name: entity.name,
            gender: entity.gender,
            location: entity.location,
            phone: entity.phone,
            website: entity.website,
            picture: entity.picture,
            avatar_id: entity.avatar_id,
            created_at: entity.created_at,
        }
    }

    /// Converts the member into the account page DTO.
    ///
    /// # Arguments
    /// - `tokens` - Provider kinds the member holds tokens for
    pub fn into_account_dto(self, tokens: Vec<String>) -> AccountDto {
        AccountDto {
            id: self.id,
            email: self.email,
            name: self.name,
            gender: self.gender,
            location: self.location,
            website: self.website,
            picture: self.picture,
            facebook: self.facebook,
            google: self.google,
            tokens,
        }
    }

    pub fn into_admin_dto(self) -> AdminUserDto {
        AdminUserDto {
            id: self.id,
            email: self.email,
            name: self.name,
            facebook: self.facebook,
            google: self.google,
        }
    }
}

/// Member together with their uploaded photos.
#[derive(Debug, Clone)]
pub struct Member {
    pub user: User,
    pub photos: Vec<Photo>,
}

impl Member {
    pub fn avatar(&self) -> Option<&Photo> {
        let avatar_id = self.user.avatar_id?;
        self.photos.iter().find(|photo| photo.id == avatar_id)
    }

    pub fn into_profile_dto(self) -> ProfileDto {
        let avatar = self.avatar().cloned().map(Photo::into_dto);
        ProfileDto {
            name: self.user.name,
            gender: self.user.gender,
            location: self.user.location,
            phone: self.user.phone,
            website: self.user.website,
            picture: self.user.picture,
            avatar,
            photos: self.photos.into_iter().map(Photo::into_dto).collect(),
        }
    }

    pub fn into_dto(self) -> MemberDto {
        let email = self.user.email.clone();
        MemberDto {
            email,
            profile: self.into_profile_dto(),
        }
    }
}

/// Parameters for inserting a new member.
#[derive(Debug, Clone, Default)]
pub struct CreateUserParam {
    pub email: Option<String>,
    /// Already hashed password.
    pub password_hash: Option<String>,
    pub facebook: Option<String>,
    pub google: Option<String>,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub picture: Option<String>,
}

/// Profile changes; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParam {
    pub email: Option<String>,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub picture: Option<String>,
}

/// Email and password taken from a signup or login body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Validates credentials; `confirm` is checked only when signing up.
    ///
    /// # Returns
    /// - `Ok(Credentials)` - Email trimmed, password untouched
    /// - `Err(AppError::Validation)` - One error per failing field
    pub fn validate(email: &str, password: &str, confirm: Option<&str>) -> Result<Self, AppError> {
        let email = email.trim();

        let mut v = Validator::new();
        v.field("email", Some(email))
            .not_empty(EMAIL_BLANK)
            .email(EMAIL_INVALID);
        v.field("password", Some(password))
            .not_empty(PASSWORD_BLANK)
            .length(6, 100, PASSWORD_SHORT);
        if let Some(confirm) = confirm {
            v.field("confirmPassword", Some(confirm))
                .not_empty(PASSWORD_BLANK)
                .equals(password, "confirmPassword does not match");
        }
        v.finish()?;

        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

/// Validates a new password set from the account page.
pub fn validate_new_password(dto: &PasswordFormDto) -> Result<String, AppError> {
    let mut v = Validator::new();
    v.field("password", Some(dto.password.as_str()))
        .length(4, usize::MAX, "Password must be at least 4 characters long");
    v.field("confirmPassword", Some(dto.confirm_password.as_str()))
        .equals(&dto.password, "Passwords do not match");
    v.finish()?;

    Ok(dto.password.clone())
}

impl UpdateProfileParam {
    /// Validates a `PATCH` profile body. Absent fields are left unchecked and unchanged.
    ///
    /// Name and location are escaped before their length is checked, so the stored value
    /// honors the limit. An empty value keeps the stored one.
    ///
    /// # Returns
    /// - `Ok((param, avatar_id))` - Sanitized fields and the requested avatar
    /// - `Err(AppError::Validation)` - One error per failing field
    pub fn from_dto(dto: UpdateProfileDto) -> Result<(Self, Option<i32>), AppError> {
        let gender_msg = format!("Gender should only be one of the [{}]", GENDERS.join(","));
        let name = clean_opt(dto.name.as_deref());
        let location = clean_opt(dto.location.as_deref());

        let mut v = Validator::new();
        v.field("email", dto.email.as_deref())
            .optional()
            .email(EMAIL_INVALID);
        v.field("name", name.as_deref())
            .optional()
            .max_length(15, "The length of name should not exceed 15 characters");
        v.field("gender", dto.gender.as_deref())
            .optional()
            .one_of(&GENDERS, &gender_msg);
        v.field("location", location.as_deref())
            .optional()
            .max_length(150, "The length of location should not exceed 150 characters");
        v.field("phone", dto.phone.as_deref())
            .optional()
            .numeric("Phone should only contains number")
            .length(8, 11, "The length of phone should not exceed 11 characters");
        v.field("website", dto.website.as_deref())
            .optional()
            .url("Please enter a URL.")
            .max_length(200, "The length of website should not exceed 200 characters");
        v.finish()?;

        let keep_if_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        let param = Self {
            email: keep_if_empty(dto.email.map(|email| email.trim().to_string())),
            name: keep_if_empty(name),
            gender: keep_if_empty(dto.gender),
            location: keep_if_empty(location),
            phone: keep_if_empty(dto.phone),
            website: keep_if_empty(dto.website.map(|website| website.trim().to_string())),
            picture: None,
        };

        Ok((param, dto.avatar))
    }

    /// Validates the account page profile form, where the email is required.
    pub fn from_form(form: ProfileFormDto) -> Result<Self, AppError> {
        let mut v = Validator::new();
        v.field("email", Some(form.email.trim()))
            .not_empty(EMAIL_BLANK)
            .email(EMAIL_INVALID);
        v.field("gender", form.gender.as_deref())
            .optional()
            .check(|g| g.is_empty() || GENDERS.contains(&g), "Gender is not valid.");
        v.field("website", form.website.as_deref())
            .optional()
            .check(|w| w.trim().is_empty() || w.len() <= 200, "Website is too long.");
        v.finish()?;

        let blank_to_none = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Ok(Self {
            email: Some(form.email.trim().to_string()),
            name: clean_opt(blank_to_none(form.name).as_deref()),
            gender: blank_to_none(form.gender),
            location: clean_opt(blank_to_none(form.location).as_deref()),
            website: blank_to_none(form.website).map(|w| w.trim().to_string()),
            ..Default::default()
        })
    }
}
