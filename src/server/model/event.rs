//! Event domain models.
//!
//! `Event` mirrors a stored row. `PopulatedEvent` joins it with hosts, venue, photos,
//! attendance and comments for API responses.

use chrono::{DateTime, Utc};

use crate::{
    model::event::{
        CommentDto, CommentPayloadDto, EventDto, EventPayloadDto, HostDto, RatingPayloadDto,
        RatingSummaryDto,
    },
    server::{
        error::AppError,
        model::{photo::Photo, user::User, venue::Venue},
        util::{
            format::{format_duration, format_event_time, format_fee, parse_event_time},
            sanitize::{clean, clean_opt},
            validate::{json_scalar, FieldError, Validator},
        },
    },
};

/// Lifecycle state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Cancelled,
    Upcoming,
    Past,
    Proposed,
    Suggested,
    Draft,
}

impl EventStatus {
    pub const ALL: [&'static str; 6] = [
        "cancelled",
        "upcoming",
        "past",
        "proposed",
        "suggested",
        "draft",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::Upcoming => "upcoming",
            Self::Past => "past",
            Self::Proposed => "proposed",
            Self::Suggested => "suggested",
            Self::Draft => "draft",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cancelled" => Some(Self::Cancelled),
            "upcoming" => Some(Self::Upcoming),
            "past" => Some(Self::Past),
            "proposed" => Some(Self::Proposed),
            "suggested" => Some(Self::Suggested),
            "draft" => Some(Self::Draft),
            _ => None,
        }
    }
}

/// Aggregate of all ratings an event received.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rating {
    pub count: i32,
    /// Mean rating rounded to one decimal.
    pub overall: f64,
}

impl Rating {
    /// Computes count and rounded mean from individual ratings.
    pub fn from_ratings(ratings: &[i32]) -> Self {
        if ratings.is_empty() {
            return Self::default();
        }

        let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
        let mean = sum as f64 / ratings.len() as f64;

        Self {
            count: ratings.len() as i32,
            overall: (mean * 10.0).round() / 10.0,
        }
    }

    pub fn into_dto(self) -> RatingSummaryDto {
        RatingSummaryDto {
            count: self.count,
            overall: self.overall,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub time: DateTime<Utc>,
    pub duration_hours: f64,
    /// Whole Hong Kong dollars.
    pub fee: i64,
    pub status: EventStatus,
    pub venue_id: Option<i32>,
    pub rating: Rating,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Converts an entity model to an event domain model at the repository boundary.
    ///
    /// Unknown stored status values read as `Draft`.
    pub fn from_entity(entity: entity::event::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            time: entity.time,
            duration_hours: entity.duration_hours,
            fee: entity.fee,
            status: EventStatus::parse(&entity.status).unwrap_or(EventStatus::Draft),
            venue_id: entity.venue_id,
            rating: Rating {
                count: entity.rating_count,
                overall: entity.rating_overall,
            },
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Sanitized fields for creating or replacing an event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventParam {
    pub name: String,
    pub description: String,
    pub time: DateTime<Utc>,
    pub duration_hours: f64,
    pub fee: i64,
    pub status: EventStatus,
}

impl EventParam {
    /// Validates an event body and converts it, escaping the free text fields.
    ///
    /// # Returns
    /// - `Ok(EventParam)` - All fields valid
    /// - `Err(AppError::Validation)` - One error per failing field
    pub fn from_dto(dto: EventPayloadDto) -> Result<Self, AppError> {
        let duration = json_scalar(&dto.duration);
        let fee = json_scalar(&dto.fee);
        let status_msg = format!(
            "status should be one of the value of the list {}.",
            EventStatus::ALL.join(",")
        );

        let mut v = Validator::new();
        v.field("name", Some(dto.name.as_str()))
            .not_empty("Name is required.")
            .max_length(25, "The length of name should not exceed 25 characters.");
        v.field("description", Some(dto.description.as_str()))
            .not_empty("Description is required.")
            .max_length(200, "The length of name should not exceed 200 characters.");
        v.field("time", Some(dto.time.as_str()))
            .date("Date is not valid. Example of valid date: 2017-01-18 15:00:00");
        v.field("duration", duration.as_deref())
            .not_empty("Duration is required.")
            .numeric("Duration is not valid.");
        v.field("fee", fee.as_deref()).numeric("Fee is not valid.");
        v.field("status", Some(dto.status.as_str()))
            .one_of(&EventStatus::ALL, &status_msg);
        v.finish()?;

        let invalid = |param: &str, msg: &str| {
            AppError::Validation(vec![FieldError::new(param, msg, None)])
        };

        Ok(Self {
            name: clean(&dto.name),
            description: clean(&dto.description),
            time: parse_event_time(&dto.time)
                .ok_or_else(|| invalid("time", "Date is not valid."))?,
            duration_hours: parse_number(duration.as_deref())
                .ok_or_else(|| invalid("duration", "Duration is not valid."))?,
            fee: parse_number(fee.as_deref())
                .ok_or_else(|| invalid("fee", "Fee is not valid."))?
                .round() as i64,
            status: EventStatus::parse(&dto.status)
                .ok_or_else(|| invalid("status", &status_msg))?,
        })
    }
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    value.and_then(|v| v.trim().parse::<f64>().ok())
}

/// Sanitized comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentParam {
    pub title: Option<String>,
    pub comment: String,
}

impl CommentParam {
    pub fn from_dto(dto: CommentPayloadDto) -> Result<Self, AppError> {
        let mut v = Validator::new();
        v.field("title", dto.title.as_deref())
            .optional()
            .max_length(100, "The length of title should not exceed 100 characters.");
        v.field("comment", Some(dto.comment.as_str()))
            .not_empty("Comment is required.")
            .max_length(300, "The length of comment should not exceed 300 characters.");
        v.finish()?;

        Ok(Self {
            title: clean_opt(dto.title.as_deref()).filter(|title| !title.is_empty()),
            comment: clean(&dto.comment),
        })
    }
}

/// Reads a rating of 1 to 5 from a number or numeric string.
pub fn parse_rating(dto: &RatingPayloadDto) -> Result<i32, AppError> {
    const MSG: &str = "Rating should be an integer between 1 and 5.";

    let raw = json_scalar(&dto.rating);
    let rating = raw.as_deref().and_then(|v| v.trim().parse::<i32>().ok());

    match rating {
        Some(rating) if (1..=5).contains(&rating) => Ok(rating),
        _ => Err(AppError::Validation(vec![FieldError::new("rating", MSG, raw)])),
    }
}

/// Public view of a hosting member.
#[derive(Debug, Clone)]
pub struct Host {
    pub user: User,
    pub avatar: Option<Photo>,
}

impl Host {
    pub fn into_dto(self) -> HostDto {
        HostDto {
            id: self.user.id,
            name: self.user.name,
            gender: self.user.gender,
            location: self.user.location,
            avatar: self.avatar.map(Photo::into_dto),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i32,
    pub event_id: i32,
    pub user_id: i32,
    pub title: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn from_entity(entity: entity::event_comment::Model) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            user_id: entity.user_id,
            title: entity.title,
            comment: entity.comment,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> CommentDto {
        CommentDto {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            comment: self.comment,
        }
    }
}

/// Event joined with everything shown alongside it.
#[derive(Debug, Clone)]
pub struct PopulatedEvent {
    pub event: Event,
    pub hosts: Vec<Host>,
    pub venue: Option<Venue>,
    pub photos: Vec<Photo>,
    pub attendance: Vec<i32>,
    pub comments: Vec<Comment>,
}

impl PopulatedEvent {
    pub fn is_host(&self, user_id: i32) -> bool {
        self.hosts.iter().any(|host| host.user.id == user_id)
    }

    /// Converts to the API DTO, rendering time, duration and fee for display.
    pub fn into_dto(self) -> EventDto {
        EventDto {
            id: self.event.id,
            name: self.event.name,
            description: self.event.description,
            time: format_event_time(&self.event.time),
            duration: format_duration(self.event.duration_hours),
            fee: format_fee(self.event.fee),
            status: self.event.status.as_str().to_string(),
            hosts: self.hosts.into_iter().map(Host::into_dto).collect(),
            venue: self.venue.map(Venue::into_dto),
            photos: self.photos.into_iter().map(Photo::into_dto).collect(),
            attendance: self.attendance,
            comments: self.comments.into_iter().map(Comment::into_dto).collect(),
            rating: self.event.rating.into_dto(),
        }
    }
}
