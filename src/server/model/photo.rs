use chrono::{DateTime, Utc};

use crate::model::user::PhotoDto;

pub const MAX_PHOTOS: usize = 8;

/// Owner kind of a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoKind {
    Member,
    Event,
}

impl PhotoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Event => "event",
        }
    }

    /// Unknown values fall back to `Member`.
    pub fn from_db(value: &str) -> Self {
        match value {
            "event" => Self::Event,
            _ => Self::Member,
        }
    }
}

/// Uploaded photo with its resized and original URLs.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub id: i32,
    pub kind: PhotoKind,
    pub member_id: Option<i32>,
    pub event_id: Option<i32>,
    /// URL of the resized copy.
    pub photo_url: String,
    /// URL of the original upload.
    pub highres_url: String,
    pub base_url: String,
    pub created_at: DateTime<Utc>,
}

impl Photo {
    pub fn from_entity(entity: entity::photo::Model) -> Self {
        Self {
            id: entity.id,
            kind: PhotoKind::from_db(&entity.kind),
            member_id: entity.member_id,
            event_id: entity.event_id,
            photo_url: entity.photo_url,
            highres_url: entity.highres_url,
            base_url: entity.base_url,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> PhotoDto {
        PhotoDto {
            id: self.id,
            photo_url: self.photo_url,
            highres_url: self.highres_url,
        }
    }

    /// File names of the resized copy and the original, taken from the stored URLs.
    pub fn file_names(&self) -> [Option<&str>; 2] {
        [
            self.photo_url.rsplit('/').next(),
            self.highres_url.rsplit('/').next(),
        ]
    }
}

/// Parameters for inserting a photo row after the files were written.
#[derive(Debug, Clone)]
pub struct CreatePhotoParam {
    pub kind: PhotoKind,
    pub member_id: Option<i32>,
    pub event_id: Option<i32>,
    pub photo_url: String,
    pub highres_url: String,
    pub base_url: String,
}
