//! Exchange-rate providers.
//!
//! [`RateProvider`] is the seam between the converter and wherever rates come
//! from. [`HttpRateProvider`] calls a pair-conversion endpoint of the form
//! `GET {base_url}/pair/{FROM}/{TO}/{AMOUNT}`; [`MockRateProvider`] answers
//! from a small built-in table for offline use.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::calculator::format_number;

/// A converted amount and the rate used.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Conversion {
    /// Units of the target currency per unit of the source currency.
    pub rate: f64,
    pub converted_amount: f64,
}

impl Conversion {
    /// Conversion between a currency and itself.
    pub fn identity(amount: f64) -> Self {
        Self {
            rate: 1.0,
            converted_amount: amount,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Request to rate API timed out")]
    Timeout,

    #[error("Cannot connect to rate API at {0}")]
    Unavailable(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Rate API error: {0}")]
    Api(String),

    #[error("Invalid rate API response: {0}")]
    Decode(String),
}

/// Source of exchange rates.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Convert `amount` of `from` into `to`.
    ///
    /// Implementations must answer `from == to` with [`Conversion::identity`]
    /// without any I/O.
    async fn convert(&self, from: &str, to: &str, amount: f64)
    -> Result<Conversion, ProviderError>;
}

/// Wire format of the pair endpoint.
#[derive(Debug, Deserialize)]
struct PairResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default, rename = "error-type")]
    error_type: Option<String>,
    #[serde(default)]
    conversion_rate: Option<f64>,
    #[serde(default)]
    conversion_result: Option<f64>,
}

/// Rate provider backed by an HTTP pair-conversion API.
#[derive(Debug, Clone)]
pub struct HttpRateProvider {
    /// Base URL without trailing slash, e.g. `https://v6.exchangerate-api.com/v6/KEY`.
    base_url: String,

    /// Sent as a bearer token when present.
    api_key: Option<String>,

    client: Client,
}

impl HttpRateProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn pair_url(&self, from: &str, to: &str, amount: f64) -> String {
        format!(
            "{}/pair/{}/{}/{}",
            self.base_url,
            from,
            to,
            format_number(amount)
        )
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn convert(
        &self,
        from: &str,
        to: &str,
        amount: f64,
    ) -> Result<Conversion, ProviderError> {
        if from == to {
            return Ok(Conversion::identity(amount));
        }

        let url = self.pair_url(from, to, amount);
        tracing::debug!("Rate request: {}", url);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let start = std::time::Instant::now();
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else if e.is_connect() {
                ProviderError::Unavailable(self.base_url.clone())
            } else {
                ProviderError::Network(e.to_string())
            }
        })?;

        tracing::debug!(
            "Rate response {} in {:.2}s",
            response.status(),
            start.elapsed().as_secs_f64()
        );

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PairResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;

        if parsed.result.as_deref() == Some("error") {
            return Err(ProviderError::Api(
                parsed.error_type.unwrap_or_else(|| "unknown".to_string()),
            ));
        }

        match (parsed.conversion_rate, parsed.conversion_result) {
            (Some(rate), Some(converted_amount)) => Ok(Conversion {
                rate,
                converted_amount,
            }),
            (None, _) => Err(ProviderError::Decode("missing conversion_rate".to_string())),
            (_, None) => Err(ProviderError::Decode(
                "missing conversion_result".to_string(),
            )),
        }
    }
}

lazy_static! {
    /// Offline rates by base currency.
    static ref MOCK_RATES: HashMap<&'static str, HashMap<&'static str, f64>> = {
        let table: [(&str, &[(&str, f64)]); 4] = [
            ("USD", &[
                ("EUR", 0.92), ("GBP", 0.79), ("JPY", 148.50), ("AUD", 1.52), ("CAD", 1.36),
                ("CHF", 0.88), ("CNY", 7.24), ("INR", 83.12), ("MXN", 17.15), ("BRL", 4.98),
            ]),
            ("EUR", &[
                ("USD", 1.09), ("GBP", 0.86), ("JPY", 161.50), ("AUD", 1.65), ("CAD", 1.48),
                ("CHF", 0.96), ("CNY", 7.88), ("INR", 90.45), ("MXN", 18.65), ("BRL", 5.42),
            ]),
            ("GBP", &[
                ("USD", 1.27), ("EUR", 1.16), ("JPY", 188.65), ("AUD", 1.93), ("CAD", 1.72),
                ("CHF", 1.12), ("CNY", 9.19), ("INR", 105.60), ("MXN", 21.78), ("BRL", 6.32),
            ]),
            ("JPY", &[
                ("USD", 0.0067), ("EUR", 0.0062), ("GBP", 0.0053), ("AUD", 0.0102),
                ("CAD", 0.0091), ("CHF", 0.0059), ("CNY", 0.0487), ("INR", 0.5596),
                ("MXN", 0.1154), ("BRL", 0.0335),
            ]),
        ];

        table
            .into_iter()
            .map(|(base, rates)| (base, rates.iter().copied().collect()))
            .collect()
    };
}

/// Rate provider answering from a fixed table, for offline use and tests.
///
/// Unknown pairs fall back to the inverse of the opposite pair, then to a
/// rate of 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRateProvider;

impl MockRateProvider {
    pub fn rate(from: &str, to: &str) -> f64 {
        if from == to {
            return 1.0;
        }

        let lookup = |a: &str, b: &str| MOCK_RATES.get(a).and_then(|rates| rates.get(b)).copied();

        if let Some(rate) = lookup(from, to) {
            return rate;
        }
        if let Some(rate) = lookup(to, from) {
            return 1.0 / rate;
        }

        tracing::debug!("No mock rate for {}/{}, using 1", from, to);
        1.0
    }
}

#[async_trait]
impl RateProvider for MockRateProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn convert(
        &self,
        from: &str,
        to: &str,
        amount: f64,
    ) -> Result<Conversion, ProviderError> {
        let rate = Self::rate(from, to);
        Ok(Conversion {
            rate,
            converted_amount: amount * rate,
        })
    }
}
