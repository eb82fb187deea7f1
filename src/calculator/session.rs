//! A running calculator screen.
//!
//! Owns the one [`DisplayState`] of the screen plus the clipboard sink, and
//! reports copy outcomes on a channel the presenting loop drains between
//! key presses.

use super::clipboard::{ClipboardSink, copy_display};
use super::keys::{KeyError, parse_keys};
use super::state::{Action, DisplayState};

/// Out-of-band messages for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// The display was copied; carries the copied value.
    Copied(String),
    CopyFailed(String),
}

impl Notification {
    pub fn message(&self) -> String {
        match self {
            Self::Copied(_) => "Copied to clipboard!".to_string(),
            Self::CopyFailed(reason) => reason.clone(),
        }
    }
}

pub struct CalculatorSession {
    state: DisplayState,
    clipboard: Box<dyn ClipboardSink>,
    notifications: flume::Sender<Notification>,
}

impl CalculatorSession {
    /// Create a session and the receiving end of its notifications.
    pub fn new(clipboard: Box<dyn ClipboardSink>) -> (Self, flume::Receiver<Notification>) {
        let (tx, rx) = flume::unbounded();
        let session = Self {
            state: DisplayState::new(),
            clipboard,
            notifications: tx,
        };
        (session, rx)
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        if action == Action::Copy {
            self.copy();
        } else {
            self.state = self.state.apply(action);
        }
    }

    /// Parse and apply a typed key line. Rejected lines change nothing.
    pub fn handle_line(&mut self, line: &str) -> Result<(), KeyError> {
        let actions = parse_keys(line)?;
        for action in actions {
            self.dispatch(action);
        }
        Ok(())
    }

    fn copy(&mut self) {
        let notification = match copy_display(&self.state, self.clipboard.as_mut()) {
            Ok(()) => {
                tracing::debug!(value = self.state.digits(), "copied display");
                Notification::Copied(self.state.digits().to_string())
            }
            Err(e) => {
                tracing::warn!("Copy failed: {}", e);
                Notification::CopyFailed(e.to_string())
            }
        };

        // Nobody listening is not an error for the calculator.
        let _ = self.notifications.send(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{ClipboardError, MemoryClipboard};

    #[test]
    fn test_handle_line_updates_state() {
        let (mut session, _rx) = CalculatorSession::new(Box::new(MemoryClipboard::new()));
        session.handle_line("5+3=").unwrap();
        assert_eq!(session.state().digits(), "8");
    }

    #[test]
    fn test_rejected_line_changes_nothing() {
        let (mut session, _rx) = CalculatorSession::new(Box::new(MemoryClipboard::new()));
        session.handle_line("12").unwrap();
        assert!(session.handle_line("3?").is_err());
        assert_eq!(session.state().digits(), "12");
    }

    #[test]
    fn test_copy_sends_notification() {
        let (mut session, rx) = CalculatorSession::new(Box::new(MemoryClipboard::new()));
        session.handle_line("42y").unwrap();

        assert_eq!(rx.try_recv().unwrap(), Notification::Copied("42".to_string()));
        assert_eq!(session.state().digits(), "42");
    }

    #[test]
    fn test_copy_failure_keeps_state() {
        let sink = MemoryClipboard::failing(ClipboardError::Write("denied".into()));
        let (mut session, rx) = CalculatorSession::new(Box::new(sink));
        session.handle_line("7+").unwrap();
        let before = session.state().clone();

        session.dispatch(Action::Copy);

        let notification = rx.try_recv().unwrap();
        assert!(matches!(notification, Notification::CopyFailed(_)));
        assert_eq!(notification.message(), "Failed to copy to clipboard: denied");
        assert_eq!(session.state(), &before);
    }
}
