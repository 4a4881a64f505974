use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::PhotoDto;

/// Body of event create and patch requests.
///
/// `duration` and `fee` accept either a JSON number or a numeric string.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, Default)]
pub struct EventPayloadDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    #[schema(value_type = String)]
    pub duration: serde_json::Value,
    #[serde(default)]
    #[schema(value_type = String)]
    pub fee: serde_json::Value,
    #[serde(default)]
    pub status: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct HostDto {
    pub id: i32,
    pub name: Option<String>,
    pub gender: String,
    pub location: String,
    pub avatar: Option<PhotoDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct VenueDto {
    pub id: i32,
    pub name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct CommentDto {
    pub id: i32,
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub title: Option<String>,
    pub comment: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq)]
pub struct RatingSummaryDto {
    pub count: i32,
    pub overall: f64,
}

/// Fully populated event.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct EventDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Display form, e.g. `Wednesday, January 18th 2017, 3:00:00 pm`.
    pub time: String,
    /// Display form, e.g. `3 hours` or `2 days`.
    pub duration: String,
    /// Display form, e.g. `HKD 1,000`.
    pub fee: String,
    pub status: String,
    #[serde(rename = "eventHosts")]
    pub hosts: Vec<HostDto>,
    pub venue: Option<VenueDto>,
    pub photos: Vec<PhotoDto>,
    /// Ids of the attending members.
    pub attendance: Vec<i32>,
    pub comments: Vec<CommentDto>,
    pub rating: RatingSummaryDto,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct EventListDto {
    pub events: Vec<EventDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct EventResponseDto {
    pub event: EventDto,
}

/// Body of `POST /api/events/{event_id}/venues`.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, Default)]
pub struct VenuePayloadDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address1: String,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

/// Body of `POST /api/events/{event_id}/comments`.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, Default)]
pub struct CommentPayloadDto {
    pub title: Option<String>,
    #[serde(default)]
    pub comment: String,
}

/// Body of `POST /api/events/{event_id}/ratings`.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, Default)]
pub struct RatingPayloadDto {
    #[serde(default)]
    #[schema(value_type = i32)]
    pub rating: serde_json::Value,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq, Eq)]
pub struct AttendanceDto {
    #[serde(rename = "eventId")]
    pub event_id: i32,
    #[serde(rename = "userId")]
    pub user_id: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq, Eq)]
pub struct CommentCreatedDto {
    #[serde(rename = "eventId")]
    pub event_id: i32,
    #[serde(rename = "commentId")]
    pub comment_id: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct RatingResponseDto {
    pub rating: RatingSummaryDto,
}
