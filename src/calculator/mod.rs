//! Calculator module for the four-function keypad calculator.
//!
//! This module provides functionality to:
//! - Hold the display state and apply key presses to it
//! - Reduce the entered token stream left to right
//! - Parse typed key lines
//! - Copy the display to the clipboard

mod clipboard;
mod evaluation;
mod keys;
mod number;
mod session;
mod state;

pub use clipboard::{
    ClipboardError, ClipboardSink, MemoryClipboard, SystemClipboard, copy_display,
    copy_to_clipboard,
};
pub use evaluation::{EvalError, Operator, Token, join_tokens, reduce};
pub use keys::{KeyError, action_for_key, parse_keys};
pub use number::{format_number, parse_float};
pub use session::{CalculatorSession, Notification};
pub use state::{Action, Digit, DisplayState, ERROR_DISPLAY};
