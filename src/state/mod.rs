//! State management module
//!
//! View-models for the mini app screens and the application context that
//! wires them to services.

pub mod context;
pub mod event_detail;
pub mod feed;
pub mod form;
pub mod navigation;
pub mod store;
pub mod toast;

// Re-export commonly used state components
pub use context::AppContext;
pub use event_detail::{ActionVisibility, Dialog, EventDetail, Intent};
pub use feed::NotificationFeed;
pub use form::{EventForm, Field, FieldErrors, FormSubmission, Notice};
pub use navigation::{Navigator, Screen};
pub use store::EventListStore;
pub use toast::{Toast, Toaster};
