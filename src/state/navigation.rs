//! Screen stack kept in sync with the host back button
//!
//! The back button is visible whenever there is a screen to go back to.
//! Closing confirmation is on while a form is the top screen, so an
//! accidental swipe does not lose typed input.

use std::sync::Arc;
use tracing::debug;
use crate::host::HostShell;
use crate::utils::helpers::parse_start_param;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    EventList,
    EventDetail(String),
    CreateEvent,
    EditEvent(String),
    Participants(String),
    Notifications,
}

impl Screen {
    pub fn is_form(&self) -> bool {
        matches!(self, Screen::CreateEvent | Screen::EditEvent(_))
    }
}

#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Screen>,
    shell: Arc<dyn HostShell>,
}

impl Navigator {
    pub fn new(shell: Arc<dyn HostShell>) -> Self {
        let navigator = Self {
            stack: vec![Screen::EventList],
            shell,
        };
        navigator.sync_shell();
        navigator
    }

    /// Start on the event a `registration_<id>` deep link points at
    pub fn from_start_param(shell: Arc<dyn HostShell>, start_param: Option<&str>) -> Self {
        let mut navigator = Self::new(shell);
        if let Some(id) = start_param.and_then(parse_start_param) {
            navigator.push(Screen::EventDetail(id.to_string()));
        }
        navigator
    }

    pub fn current(&self) -> &Screen {
        // The root is never popped
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self, screen: Screen) {
        debug!(screen = ?screen, depth = self.stack.len() + 1, "Navigate forward");
        self.stack.push(screen);
        self.sync_shell();
    }

    /// Swap the top screen, e.g. create form -> created event
    pub fn replace(&mut self, screen: Screen) {
        if self.stack.len() == 1 {
            self.stack[0] = screen;
        } else {
            self.stack.pop();
            self.stack.push(screen);
        }
        self.sync_shell();
    }

    /// Back button pressed. Returns the screen now on top, or `None` at the root.
    pub fn back(&mut self) -> Option<&Screen> {
        if self.stack.len() <= 1 {
            return None;
        }
        self.stack.pop();
        self.sync_shell();
        Some(self.current())
    }

    fn sync_shell(&self) {
        if self.stack.len() > 1 {
            self.shell.show_back_button();
            self.shell.set_back_handler(true);
        } else {
            self.shell.hide_back_button();
            self.shell.set_back_handler(false);
        }
        self.shell.set_closing_confirmation(self.current().is_form());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingShell {
        back_visible: Mutex<bool>,
        handler_active: Mutex<bool>,
        closing_confirmation: Mutex<bool>,
    }

    impl HostShell for RecordingShell {
        fn show_back_button(&self) {
            *self.back_visible.lock().unwrap() = true;
        }
        fn hide_back_button(&self) {
            *self.back_visible.lock().unwrap() = false;
        }
        fn set_back_handler(&self, active: bool) {
            *self.handler_active.lock().unwrap() = active;
        }
        fn set_closing_confirmation(&self, enabled: bool) {
            *self.closing_confirmation.lock().unwrap() = enabled;
        }
    }

    #[test]
    fn test_back_button_follows_depth() {
        let shell = Arc::new(RecordingShell::default());
        let mut nav = Navigator::new(shell.clone());
        assert!(!*shell.back_visible.lock().unwrap());

        nav.push(Screen::EventDetail("e1".to_string()));
        assert!(*shell.back_visible.lock().unwrap());
        assert!(*shell.handler_active.lock().unwrap());

        nav.push(Screen::EditEvent("e1".to_string()));
        assert!(*shell.closing_confirmation.lock().unwrap());

        assert_eq!(nav.back(), Some(&Screen::EventDetail("e1".to_string())));
        assert!(!*shell.closing_confirmation.lock().unwrap());

        assert_eq!(nav.back(), Some(&Screen::EventList));
        assert!(!*shell.back_visible.lock().unwrap());
        assert_eq!(nav.back(), None);
    }

    #[test]
    fn test_deep_link_opens_detail() {
        let shell = Arc::new(RecordingShell::default());
        let nav = Navigator::from_start_param(shell.clone(), Some("registration_abc"));
        assert_eq!(nav.current(), &Screen::EventDetail("abc".to_string()));
        assert_eq!(nav.depth(), 2);
        assert!(*shell.back_visible.lock().unwrap());
    }
}
