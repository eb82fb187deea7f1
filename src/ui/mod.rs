//! Plain-text rendering of the two screens.

pub mod calculator;
pub mod converter;

pub use calculator::render_calculator;
pub use converter::{render_conversion, render_currency_list, render_last_conversion};
