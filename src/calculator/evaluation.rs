//! Token stream and left-to-right reduction.
//!
//! The calculator has no operator precedence: `5 + 3 × 2` is `(5 + 3) × 2`.
//! Tokens are consumed strictly by position, operand at even indices and
//! operator at odd indices, so a malformed stream (two operators in a row)
//! still reduces to something sensible.

use std::fmt;

use thiserror::Error;

use super::number::parse_float;

/// The four arithmetic operators on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// All operators in keypad order.
    pub const ALL: [Operator; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Symbol shown on the display.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Look up an operator by its display symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Apply the operator to a running result.
    ///
    /// Division by zero yields 0 so the display always holds a finite number.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => {
                if rhs != 0.0 {
                    lhs / rhs
                } else {
                    0.0
                }
            }
        }
    }

    /// Whether a percentage after this operator means "percent of the base".
    pub fn is_additive(self) -> bool {
        matches!(self, Self::Add | Self::Subtract)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One entry of the token stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// An operand as it appeared on the display.
    Operand(String),
    Operator(Operator),
}

impl Token {
    /// Numeric value of this token in operand position. Operators are NaN.
    pub fn value(&self) -> f64 {
        match self {
            Self::Operand(text) => parse_float(text),
            Self::Operator(_) => f64::NAN,
        }
    }

    pub fn operator(&self) -> Option<Operator> {
        match self {
            Self::Operator(op) => Some(*op),
            Self::Operand(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operand(text) => f.write_str(text),
            Self::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// Join tokens with single spaces, the way the pending line is shown.
pub fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reduction failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("nothing to evaluate")]
    EmptyExpression,
}

/// Reduce a token stream left to right.
///
/// The first token seeds the result (NaN if it is not a number). Each
/// following operator/operand pair is applied in order; a pair whose operand
/// does not parse is skipped and the running result is kept. An operator
/// slot that holds an operand does nothing.
pub fn reduce(tokens: &[Token]) -> Result<f64, EvalError> {
    let (first, _) = tokens.split_first().ok_or(EvalError::EmptyExpression)?;
    let mut result = first.value();

    for i in (1..tokens.len()).step_by(2) {
        let operand = tokens.get(i + 1).map_or(f64::NAN, Token::value);
        if operand.is_nan() {
            continue;
        }

        if let Some(op) = tokens[i].operator() {
            result = op.apply(result, operand);
        }
    }

    Ok(result)
}
