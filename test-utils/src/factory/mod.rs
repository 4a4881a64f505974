//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation. Factories insert rows
//! directly, bypassing services, so tests can arrange state the services would refuse to
//! produce.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let user = factory::user::create_user(&db).await?;
//!
//!     // Create an event hosted by `user`
//!     let event = factory::event::create_event(&db, user.id).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let user = factory::user::UserFactory::new(&db)
//!     .email("someone@example.com")
//!     .facebook("fb-123")
//!     .build()
//!     .await?;
//! ```

pub mod event;
pub mod helpers;
pub mod photo;
pub mod user;
pub mod venue;

pub use event::create_event;
pub use photo::{create_event_photo, create_member_photo};
pub use user::create_user;
pub use venue::create_venue;
