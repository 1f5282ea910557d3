//! Data models module
//!
//! Canonical shapes consumed by the view-models. Wire shapes live with the
//! resource client and never leave it.

pub mod user;
pub mod event;
pub mod notification;

// Re-export commonly used models
pub use user::{User, same_id};
pub use event::{Event, EventStatus, EventPage, EventPayload, EventFilter, FinishOptions, MIN_PARTICIPANTS, MAX_PARTICIPANTS};
pub use notification::{Notification, NotificationType, NotificationPage, NotificationQuery};
