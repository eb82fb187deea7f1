//! Clipboard functionality for copying the calculator display.

use arboard::Clipboard;
use thiserror::Error;

use super::state::DisplayState;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Failed to access clipboard: {0}")]
    Unavailable(String),
    #[error("Failed to copy to clipboard: {0}")]
    Write(String),
}

/// Somewhere copied text can go.
pub trait ClipboardSink {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard.
///
/// A fresh handle is opened per write so a missing display server only
/// fails the copy, not the session.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        copy_to_clipboard(text)
    }
}

/// Copy text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard =
        Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

    clipboard
        .set_text(text.to_string())
        .map_err(|e| ClipboardError::Write(e.to_string()))
}

/// Send the current display to `sink`. The state is only read.
pub fn copy_display(
    state: &DisplayState,
    sink: &mut dyn ClipboardSink,
) -> Result<(), ClipboardError> {
    sink.write(state.digits())
}

/// In-memory sink, handy where no desktop clipboard exists.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    fail_with: Option<ClipboardError>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every write with `error`.
    pub fn failing(error: ClipboardError) -> Self {
        Self {
            contents: None,
            fail_with: Some(error),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Digit;

    #[test]
    fn test_copy_display_writes_digits() {
        let state = DisplayState::new().enter_digit(Digit::new(5).unwrap());
        let mut sink = MemoryClipboard::new();

        copy_display(&state, &mut sink).unwrap();
        assert_eq!(sink.contents(), Some("5"));
    }

    #[test]
    fn test_copy_failure_is_reported() {
        let state = DisplayState::new();
        let mut sink = MemoryClipboard::failing(ClipboardError::Unavailable("no display".into()));

        let err = copy_display(&state, &mut sink).unwrap_err();
        assert_eq!(err.to_string(), "Failed to access clipboard: no display");
        assert_eq!(sink.contents(), None);
    }
}
