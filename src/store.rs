//! Persistent converter preferences.
//!
//! One JSON file holds the selected currency pair, recently fetched rates,
//! and the last conversion. The file is read once at startup and rewritten
//! after every change. Storage problems never stop the converter: a
//! corrupt file reads as defaults and a failed write only logs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub const STORAGE_FILE: &str = "exchange_app_state.json";

pub const DEFAULT_FROM: &str = "USD";
pub const DEFAULT_TO: &str = "HNL";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Corrupt preference file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A fetched rate and when it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: f64,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// The most recent conversion, as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionHistory {
    pub from_currency: String,
    pub to_currency: String,
    pub amount: String,
    pub converted_amount: String,
    pub conversion_rate: f64,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageData {
    pub selected_from_currency: String,
    pub selected_to_currency: String,
    pub cached_rates: Vec<ExchangeRate>,
    pub last_conversion: Option<ConversionHistory>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            selected_from_currency: DEFAULT_FROM.to_string(),
            selected_to_currency: DEFAULT_TO.to_string(),
            cached_rates: Vec::new(),
            last_conversion: None,
        }
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// File-backed preference store.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    data: StorageData,
    ttl: Duration,
}

impl PreferenceStore {
    /// Open the store in `dir`, falling back to defaults if the file is
    /// missing or unreadable.
    pub fn open(dir: &Path, ttl: Duration) -> Self {
        let path = dir.join(STORAGE_FILE);
        let data = match Self::read(&path) {
            Ok(Some(data)) => data,
            Ok(None) => StorageData::default(),
            Err(e) => {
                tracing::warn!("Failed to load preferences: {}", e);
                StorageData::default()
            }
        };

        Self { path, data, ttl }
    }

    fn read(path: &Path) -> Result<Option<StorageData>, StoreError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let data = serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(data))
    }

    /// Write the current data to disk.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Save, logging instead of failing.
    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!("Failed to save preferences: {}", e);
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &StorageData {
        &self.data
    }

    pub fn selected_from(&self) -> &str {
        &self.data.selected_from_currency
    }

    pub fn selected_to(&self) -> &str {
        &self.data.selected_to_currency
    }

    pub fn set_selected(&mut self, from: &str, to: &str) {
        if self.data.selected_from_currency == from && self.data.selected_to_currency == to {
            return;
        }
        self.data.selected_from_currency = from.to_string();
        self.data.selected_to_currency = to.to_string();
        self.persist();
    }

    /// A cached rate for the pair that is younger than the TTL at `now`.
    pub fn cached_rate(&self, from: &str, to: &str, now: u64) -> Option<&ExchangeRate> {
        let ttl = self.ttl.as_millis() as u64;
        self.data.cached_rates.iter().find(|r| {
            r.from_currency == from
                && r.to_currency == to
                && now.saturating_sub(r.timestamp) < ttl
        })
    }

    /// Remember a rate, replacing any earlier entry for the pair.
    pub fn cache_rate(&mut self, from: &str, to: &str, rate: f64, now: u64) {
        self.data
            .cached_rates
            .retain(|r| !(r.from_currency == from && r.to_currency == to));
        self.data.cached_rates.push(ExchangeRate {
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            rate,
            timestamp: now,
        });
        self.persist();
    }

    pub fn last_conversion(&self) -> Option<&ConversionHistory> {
        self.data.last_conversion.as_ref()
    }

    pub fn save_conversion(&mut self, conversion: ConversionHistory) {
        self.data.last_conversion = Some(conversion);
        self.persist();
    }
}
