//! cambio: a terminal calculator and currency converter.
//!
//! The calculator is a keypad-style four-function machine whose whole state is
//! a [`calculator::DisplayState`] value. The converter looks up rates through a
//! [`currency::RateProvider`] and remembers the chosen pair and recent rates in
//! a [`store::PreferenceStore`].

pub mod calculator;
pub mod config;
pub mod converter;
pub mod currency;
pub mod store;
pub mod ui;
