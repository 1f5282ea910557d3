//! Host shell capabilities
//!
//! The Telegram runtime owns the back button and the closing confirmation
//! prompt. The core only drives them through this trait.

use std::fmt::Debug;
use tracing::debug;

pub trait HostShell: Send + Sync + Debug {
    fn show_back_button(&self);
    fn hide_back_button(&self);
    /// Subscribe (`true`) or unsubscribe (`false`) the back click handler
    fn set_back_handler(&self, active: bool);
    fn set_closing_confirmation(&self, enabled: bool);
}

/// Shell used outside Telegram: records nothing, only traces
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedShell;

impl HostShell for DetachedShell {
    fn show_back_button(&self) {
        debug!("back button shown");
    }

    fn hide_back_button(&self) {
        debug!("back button hidden");
    }

    fn set_back_handler(&self, active: bool) {
        debug!(active = active, "back handler toggled");
    }

    fn set_closing_confirmation(&self, enabled: bool) {
        debug!(enabled = enabled, "closing confirmation toggled");
    }
}
