pub use super::event::Entity as Event;
pub use super::event_attendance::Entity as EventAttendance;
pub use super::event_comment::Entity as EventComment;
pub use super::event_host::Entity as EventHost;
pub use super::event_rating::Entity as EventRating;
pub use super::photo::Entity as Photo;
pub use super::user::Entity as User;
pub use super::user_token::Entity as UserToken;
pub use super::venue::Entity as Venue;
