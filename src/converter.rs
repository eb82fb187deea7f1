//! Currency converter screen logic.
//!
//! Glues the selected currency pair, the rate cache in the preference store,
//! and a [`RateProvider`]. Conversions never fail outward: bad amounts and
//! provider errors show as a converted amount of `0`.

use thiserror::Error;

use crate::calculator::parse_float;
use crate::currency::{self, Currency, RateProvider};
use crate::store::{ConversionHistory, DEFAULT_FROM, DEFAULT_TO, PreferenceStore, now_millis};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConverterError {
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// What the converter screen shows after a conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionView {
    pub from: &'static Currency,
    pub to: &'static Currency,
    /// The amount as entered.
    pub amount: String,
    /// Converted amount with two decimals, `0` when nothing could be converted.
    pub converted_amount: String,
    pub rate: f64,
}

impl ConversionView {
    /// `1 USD = 24.6500 HNL`
    pub fn rate_line(&self) -> String {
        format!("1 {} = {:.4} {}", self.from.code, self.rate, self.to.code)
    }
}

pub struct Converter {
    provider: Box<dyn RateProvider>,
    store: PreferenceStore,
    from: &'static Currency,
    to: &'static Currency,
    /// Rate shown on the screen; kept when a conversion cannot run.
    rate: f64,
}

fn lookup(code: &str) -> Result<&'static Currency, ConverterError> {
    currency::find(code).ok_or_else(|| ConverterError::UnknownCurrency(code.to_string()))
}

impl Converter {
    /// Start from the pair saved in `store`. Saved codes that are no longer
    /// known fall back to the defaults.
    pub fn new(provider: Box<dyn RateProvider>, store: PreferenceStore) -> Self {
        let restore = |code: &str, default: &str| {
            currency::find(code).unwrap_or_else(|| {
                tracing::warn!("Ignoring unknown saved currency {}", code);
                currency::find(default).unwrap_or(&currency::CURRENCIES[0])
            })
        };

        let from = restore(store.selected_from(), DEFAULT_FROM);
        let to = restore(store.selected_to(), DEFAULT_TO);

        Self {
            provider,
            store,
            from,
            to,
            rate: 1.0,
        }
    }

    pub fn from(&self) -> &'static Currency {
        self.from
    }

    pub fn to(&self) -> &'static Currency {
        self.to
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    pub fn select_from(&mut self, code: &str) -> Result<(), ConverterError> {
        self.from = lookup(code)?;
        self.persist_selection();
        Ok(())
    }

    pub fn select_to(&mut self, code: &str) -> Result<(), ConverterError> {
        self.to = lookup(code)?;
        self.persist_selection();
        Ok(())
    }

    /// Exchange the source and target currencies.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
        self.persist_selection();
    }

    fn persist_selection(&mut self) {
        self.store.set_selected(self.from.code, self.to.code);
    }

    pub async fn convert(&mut self, amount: &str) -> ConversionView {
        self.convert_at(amount, now_millis()).await
    }

    /// Convert `amount` with `now` (ms since epoch) as the cache clock.
    pub async fn convert_at(&mut self, amount: &str, now: u64) -> ConversionView {
        let converted_amount = match self.converted(amount, now).await {
            Some(value) => {
                let converted_amount = format!("{:.2}", value);
                self.store.save_conversion(ConversionHistory {
                    from_currency: self.from.code.to_string(),
                    to_currency: self.to.code.to_string(),
                    amount: amount.to_string(),
                    converted_amount: converted_amount.clone(),
                    conversion_rate: self.rate,
                    timestamp: now,
                });
                converted_amount
            }
            None => "0".to_string(),
        };

        ConversionView {
            from: self.from,
            to: self.to,
            amount: amount.to_string(),
            converted_amount,
            rate: self.rate,
        }
    }

    async fn converted(&mut self, amount: &str, now: u64) -> Option<f64> {
        let parsed = parse_float(amount);
        if !parsed.is_finite() || parsed < 0.0 {
            tracing::debug!("Not converting invalid amount {:?}", amount);
            return None;
        }

        let (from, to) = (self.from.code, self.to.code);

        if let Some(cached) = self.store.cached_rate(from, to, now) {
            tracing::debug!("Using cached rate {} for {}/{}", cached.rate, from, to);
            self.rate = cached.rate;
            return Some(parsed * cached.rate);
        }

        match self.provider.convert(from, to, parsed).await {
            Ok(conversion) => {
                tracing::info!(
                    "Converted {} {} to {} via {} (rate {})",
                    parsed,
                    from,
                    to,
                    self.provider.name(),
                    conversion.rate
                );
                self.rate = conversion.rate;
                if from != to {
                    self.store.cache_rate(from, to, conversion.rate, now);
                }
                Some(conversion.converted_amount)
            }
            Err(e) => {
                tracing::warn!("Failed to convert currency: {}", e);
                None
            }
        }
    }
}
