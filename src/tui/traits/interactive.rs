//! Interactive trait for components that handle keyboard input
//!
//! The router offers a key event to each component in turn. A component
//! either consumes it or lets it fall through to the next one.

use crossterm::event::KeyEvent;

/// Result of handling a key event
///
/// Tells the router whether the component consumed the event or
/// if it should be offered to the next component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should fall through
    No,
}

impl Handled {
    /// Check if the event was handled
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Trait for components that handle keyboard input
///
/// # Event Flow
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// Router (global keys: Ctrl+C, Ctrl+L, F1, Enter)
///    │
///    │ if not handled
///    ▼
/// LineEditor ──► Handled::No ──► ScrollState
/// ```
pub trait Interactive {
    /// Handle a key event
    ///
    /// Returns `Handled::Yes` if the component consumed the event,
    /// `Handled::No` if it should fall through.
    fn handle_key(&mut self, key: KeyEvent) -> Handled;
}
