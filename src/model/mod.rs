//! Data transfer objects shared by the HTTP layer.
//!
//! These types define the JSON shapes of requests and responses. Server code converts its
//! domain models into these DTOs at the controller boundary.

pub mod account;
pub mod admin;
pub mod api;
pub mod event;
pub mod user;
