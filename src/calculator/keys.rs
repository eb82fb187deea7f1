//! Keyboard input for the calculator.
//!
//! Turns a typed line such as `12+3=` or `copy` into calculator actions.
//! A line is accepted or rejected as a whole, so a typo never leaves the
//! display half-updated.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::evaluation::Operator;
use super::state::{Action, Digit};

lazy_static! {
    /// Whole-line command words.
    static ref COMMAND_WORD: Regex = Regex::new(
        r"(?i)^\s*(clear|ac|del|back|copy)\s*$"
    ).unwrap();
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("unknown key '{key}' at position {position}")]
    UnknownKey { key: char, position: usize },
}

/// Map a single key character to its action.
pub fn action_for_key(key: char) -> Option<Action> {
    if let Ok(digit) = Digit::try_from(key) {
        return Some(Action::Digit(digit));
    }

    let action = match key {
        '.' | ',' => Action::DecimalPoint,
        '+' => Action::Operator(Operator::Add),
        '-' => Action::Operator(Operator::Subtract),
        '*' | 'x' | 'X' | '×' => Action::Operator(Operator::Multiply),
        '/' | '÷' => Action::Operator(Operator::Divide),
        '=' => Action::Evaluate,
        '%' => Action::Percent,
        'c' | 'C' => Action::Clear,
        '<' | '⌫' => Action::Delete,
        'y' | 'Y' => Action::Copy,
        _ => return None,
    };

    Some(action)
}

/// Parse a typed line into actions.
///
/// Whitespace is ignored. Returns an error naming the first unknown key
/// (1-based character position) without producing any actions.
pub fn parse_keys(line: &str) -> Result<Vec<Action>, KeyError> {
    if let Some(caps) = COMMAND_WORD.captures(line) {
        let action = match caps[1].to_ascii_lowercase().as_str() {
            "del" | "back" => Action::Delete,
            "copy" => Action::Copy,
            _ => Action::Clear,
        };
        return Ok(vec![action]);
    }

    line.chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(i, c)| {
            action_for_key(c).ok_or(KeyError::UnknownKey {
                key: c,
                position: i + 1,
            })
        })
        .collect()
}
