//! Transient toast notices
//!
//! A toast is visible for a fixed duration from the moment it is shown. A
//! new toast replaces the current one instead of queueing behind it.
//! Time is read from `tokio::time::Instant` so paused-clock tests can step
//! through the boundary.

use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub shown_at: Instant,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Toaster {
    duration: Duration,
    current: Option<Toast>,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl Toaster {
    pub fn new(duration: Duration) -> Self {
        Self { duration, current: None }
    }

    pub fn show(&mut self, message: impl Into<String>) {
        let now = Instant::now();
        self.current = Some(Toast {
            message: message.into(),
            shown_at: now,
            expires_at: now + self.duration,
        });
    }

    /// The toast on screen right now, if any
    pub fn visible(&self) -> Option<&Toast> {
        let now = Instant::now();
        self.current.as_ref().filter(|t| now < t.expires_at)
    }

    pub fn visible_message(&self) -> Option<&str> {
        self.visible().map(|t| t.message.as_str())
    }

    /// Drop an expired toast; returns true if one was cleared
    pub fn tick(&mut self) -> bool {
        if self.current.is_some() && self.visible().is_none() {
            self.current = None;
            return true;
        }
        false
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_toast_hides_after_duration() {
        let mut toaster = Toaster::default();
        toaster.show("Participants limit exceeded");

        tokio::time::advance(Duration::from_millis(2999)).await;
        assert_eq!(toaster.visible_message(), Some("Participants limit exceeded"));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(toaster.visible_message(), None);
        assert!(toaster.tick());
        assert!(!toaster.tick());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_toast_replaces_old() {
        let mut toaster = Toaster::default();
        toaster.show("first");
        tokio::time::advance(Duration::from_millis(2000)).await;
        toaster.show("second");

        tokio::time::advance(Duration::from_millis(2000)).await;
        assert_eq!(toaster.visible_message(), Some("second"));

        tokio::time::advance(Duration::from_millis(1000)).await;
        assert_eq!(toaster.visible_message(), None);
    }
}
