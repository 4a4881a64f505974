//! SeaORM entity models for the meetup schema.
//!
//! Each module mirrors one table created by the `migration` crate. Relations between tables
//! are enforced by the migrations' foreign keys and resolved explicitly in the repositories.

pub mod prelude;

pub mod event;
pub mod event_attendance;
pub mod event_comment;
pub mod event_host;
pub mod event_rating;
pub mod photo;
pub mod user;
pub mod user_token;
pub mod venue;
