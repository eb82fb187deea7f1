//! Currency data and exchange-rate providers.

pub mod data;
pub mod provider;

pub use data::{CURRENCIES, Currency, find, search};
pub use provider::{Conversion, HttpRateProvider, MockRateProvider, ProviderError, RateProvider};
