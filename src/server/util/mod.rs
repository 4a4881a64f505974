//! Small helpers shared across controllers and services.

pub mod format;
pub mod sanitize;
pub mod validate;
