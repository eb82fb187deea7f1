//! Calculator display state and its transitions.
//!
//! [`DisplayState`] is an immutable value. Every key press maps to a method
//! that borrows the current state and returns the next one, so a session is
//! just a fold over [`Action`]s.

use super::evaluation::{Operator, Token, join_tokens, reduce};
use super::number::{format_number, parse_float};

/// Text shown after a failed reduction.
pub const ERROR_DISPLAY: &str = "Error";

/// A single decimal digit key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<char> for Digit {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        c.to_digit(10)
            .and_then(|d| Digit::new(d as u8))
            .ok_or(c)
    }
}

/// A calculator key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Digit(Digit),
    DecimalPoint,
    Operator(Operator),
    Evaluate,
    Clear,
    Delete,
    Percent,
    /// Copy the display to the clipboard. Leaves the state untouched.
    Copy,
}

/// Everything the calculator screen shows and remembers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayState {
    digits: String,
    pending: Vec<Token>,
    entering_new_operand: bool,
    last_result: Option<String>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayState {
    /// The state at screen start: `0` on the display, nothing pending.
    pub fn new() -> Self {
        Self {
            digits: "0".to_string(),
            pending: Vec::new(),
            entering_new_operand: true,
            last_result: None,
        }
    }

    /// The operand being edited, as displayed.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Committed tokens, excluding the operand being edited.
    pub fn pending(&self) -> &[Token] {
        &self.pending
    }

    /// Pending tokens joined for display (`"5 +"`), empty when none.
    pub fn pending_expression(&self) -> String {
        join_tokens(&self.pending)
    }

    pub fn is_entering_new_operand(&self) -> bool {
        self.entering_new_operand
    }

    pub fn last_result(&self) -> Option<&str> {
        self.last_result.as_deref()
    }

    /// Dispatch a key press to its transition.
    pub fn apply(&self, action: Action) -> Self {
        match action {
            Action::Digit(d) => self.enter_digit(d),
            Action::DecimalPoint => self.enter_decimal_point(),
            Action::Operator(op) => self.enter_operator(op),
            Action::Evaluate => self.evaluate(),
            Action::Clear => self.clear_all(),
            Action::Delete => self.delete_last_digit(),
            Action::Percent => self.apply_percent(),
            Action::Copy => self.clone(),
        }
    }

    pub fn enter_digit(&self, digit: Digit) -> Self {
        let d = digit.as_char();
        let mut next = self.clone();

        if self.entering_new_operand {
            next.digits = d.to_string();
            next.entering_new_operand = false;
        } else if self.digits == "0" {
            next.digits = d.to_string();
        } else {
            next.digits.push(d);
        }

        next
    }

    /// A second decimal point in the same operand is ignored.
    pub fn enter_decimal_point(&self) -> Self {
        let mut next = self.clone();

        if self.entering_new_operand {
            next.digits = "0.".to_string();
            next.entering_new_operand = false;
        } else if !self.digits.contains('.') {
            next.digits.push('.');
        }

        next
    }

    /// Commit the current operand (or the last result) and an operator.
    ///
    /// Operators are not validated against each other: pressing one right
    /// after another commits the still-displayed operand a second time.
    pub fn enter_operator(&self, op: Operator) -> Self {
        let mut next = self.clone();

        if let Some(result) = next.last_result.take() {
            next.pending = vec![Token::Operand(result), Token::Operator(op)];
        } else {
            next.pending.push(Token::Operand(self.digits.clone()));
            next.pending.push(Token::Operator(op));
        }
        next.entering_new_operand = true;

        next
    }

    /// Reduce the pending expression with the current operand (the `=` key).
    pub fn evaluate(&self) -> Self {
        if self.pending.is_empty() {
            return self.clone();
        }

        let mut tokens = self.pending.clone();
        tokens.push(Token::Operand(self.digits.clone()));

        let mut next = self.clone();
        match reduce(&tokens) {
            Ok(value) => {
                let result = format_number(value);
                tracing::debug!(expression = %join_tokens(&tokens), %result, "evaluated");
                next.digits = result.clone();
                next.last_result = Some(result);
            }
            Err(e) => {
                tracing::warn!("Evaluation failed: {}", e);
                next.digits = ERROR_DISPLAY.to_string();
            }
        }
        next.pending.clear();
        next.entering_new_operand = true;

        next
    }

    pub fn clear_all(&self) -> Self {
        Self::new()
    }

    /// Backspace. Deleting the only character resets the operand to `0`.
    pub fn delete_last_digit(&self) -> Self {
        let mut next = self.clone();

        if self.digits.chars().count() <= 1 {
            next.digits = "0".to_string();
            next.entering_new_operand = true;
        } else {
            next.digits.pop();
        }

        next
    }

    /// The `%` key.
    ///
    /// After `+` or `-` the operand becomes that percentage of the preceding
    /// operand (`100 + 50%` adds 50). Otherwise it is divided by 100.
    pub fn apply_percent(&self) -> Self {
        let current = parse_float(&self.digits);
        let mut next = self.clone();

        let value = match self.pending.last().and_then(Token::operator) {
            Some(op) if op.is_additive() => {
                let len = self.pending.len();
                let base = len
                    .checked_sub(2)
                    .and_then(|i| self.pending.get(i))
                    .or_else(|| self.pending.first())
                    .map_or(f64::NAN, Token::value);
                (base * current) / 100.0
            }
            _ => current / 100.0,
        };

        next.digits = format_number(value);
        next.entering_new_operand = true;

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(state: DisplayState, keys: &str) -> DisplayState {
        keys.chars().fold(state, |s, c| match c {
            '0'..='9' => s.enter_digit(Digit::try_from(c).unwrap()),
            '.' => s.enter_decimal_point(),
            '=' => s.evaluate(),
            '%' => s.apply_percent(),
            '<' => s.delete_last_digit(),
            'C' => s.clear_all(),
            _ => s.enter_operator(Operator::from_symbol(c).unwrap()),
        })
    }

    fn run(keys: &str) -> DisplayState {
        press(DisplayState::new(), keys)
    }

    #[test]
    fn test_initial_state() {
        let state = DisplayState::new();
        assert_eq!(state.digits(), "0");
        assert!(state.pending().is_empty());
        assert!(state.is_entering_new_operand());
        assert_eq!(state.last_result(), None);
    }

    #[test]
    fn test_single_digit_replaces_zero() {
        for d in 0..=9u8 {
            let digit = Digit::new(d).unwrap();
            let state = DisplayState::new().enter_digit(digit);
            assert_eq!(state.digits(), digit.as_char().to_string());
            assert!(!state.is_entering_new_operand());
        }
    }

    #[test]
    fn test_multiple_digits_concatenate() {
        assert_eq!(run("123").digits(), "123");
        assert_eq!(run("007").digits(), "7");
    }

    #[test]
    fn test_decimal_point() {
        assert_eq!(run(".").digits(), "0.");
        assert_eq!(run("5.7").digits(), "5.7");
        assert_eq!(run("5..7").digits(), "5.7");
        assert_eq!(run("5.7.").digits(), "5.7");
    }

    #[test]
    fn test_operator_builds_pending_expression() {
        let state = run("5+");
        assert_eq!(state.pending_expression(), "5 +");
        assert_eq!(state.digits(), "5");
        assert!(state.is_entering_new_operand());

        let state = run("5+3×");
        assert_eq!(state.pending_expression(), "5 + 3 ×");
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(run("5+3=").digits(), "8");
        assert_eq!(run("8-3=").digits(), "5");
        assert_eq!(run("6×7=").digits(), "42");
        assert_eq!(run("8÷4=").digits(), "2");
    }

    #[test]
    fn test_evaluate_resets_pending() {
        let state = run("5+3=");
        assert!(state.pending().is_empty());
        assert_eq!(state.last_result(), Some("8"));
        assert!(state.is_entering_new_operand());
    }

    #[test]
    fn test_chained_operations_left_to_right() {
        assert_eq!(run("5+3×2=").digits(), "16");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(run("8÷0=").digits(), "0");
    }

    #[test]
    fn test_evaluate_without_pending_is_noop() {
        let state = run("42");
        assert_eq!(state.evaluate(), state);
    }

    #[test]
    fn test_chain_from_previous_result() {
        assert_eq!(run("5+3=×2=").digits(), "16");
    }

    #[test]
    fn test_chain_ignores_digits_typed_after_result() {
        // the operator continues from the stored result, not from "9"
        let state = run("5+3=9+1=");
        assert_eq!(state.digits(), "9");
    }

    #[test]
    fn test_new_operand_after_operator() {
        assert_eq!(run("5+3").digits(), "3");
    }

    #[test]
    fn test_repeated_operator_recommits_operand() {
        let state = run("5++");
        assert_eq!(state.pending_expression(), "5 + 5 +");
        assert_eq!(press(state, "3=").digits(), "13");
    }

    #[test]
    fn test_percent_of_base_after_addition() {
        let state = run("100+50%");
        assert_eq!(state.digits(), "50");
        assert_eq!(press(state, "=").digits(), "150");
    }

    #[test]
    fn test_percent_of_base_after_subtraction() {
        assert_eq!(run("200-10%=").digits(), "180");
    }

    #[test]
    fn test_percent_as_fraction_after_multiplication() {
        let state = run("50×20%");
        assert_eq!(state.digits(), "0.2");
        assert_eq!(press(state, "=").digits(), "10");
    }

    #[test]
    fn test_percent_without_pending() {
        let state = run("50%");
        assert_eq!(state.digits(), "0.5");
        assert!(state.is_entering_new_operand());
    }

    #[test]
    fn test_percent_uses_last_committed_operand() {
        // base is 3, the operand right before the trailing +
        assert_eq!(run("5+3+50%").digits(), "1.5");
    }

    #[test]
    fn test_delete_last_digit() {
        assert_eq!(run("123<").digits(), "12");
    }

    #[test]
    fn test_delete_single_digit_resets() {
        let state = run("5<");
        assert_eq!(state.digits(), "0");
        assert!(state.is_entering_new_operand());
        assert_eq!(press(state, "7").digits(), "7");
    }

    #[test]
    fn test_delete_keeps_pending() {
        let state = run("5+34<");
        assert_eq!(state.digits(), "3");
        assert_eq!(state.pending_expression(), "5 +");
    }

    #[test]
    fn test_clear_returns_initial_state() {
        assert_eq!(run("5+3=×2C"), DisplayState::new());
        assert_eq!(run("12.5÷").clear_all(), DisplayState::new());
    }

    #[test]
    fn test_copy_action_keeps_state() {
        let state = run("5+3");
        assert_eq!(state.apply(Action::Copy), state);
    }

    #[test]
    fn test_recovers_from_error_display() {
        let mut state = run("5+");
        state.digits = ERROR_DISPLAY.to_string();
        state.entering_new_operand = true;
        let state = press(state, "4=");
        assert_eq!(state.digits(), "9");
    }

    #[test]
    fn test_digit_try_from() {
        assert_eq!(Digit::try_from('7').map(Digit::as_char), Ok('7'));
        assert_eq!(Digit::try_from('a'), Err('a'));
        assert_eq!(Digit::new(10), None);
    }
}
