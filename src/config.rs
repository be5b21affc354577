//! Pricing configuration.
//!
//! Schedules and currency overrides arrive as JSON in the shapes the auction
//! backend already serves:
//!
//! ```json
//! {
//!   "extrapolation": "extrapolate",
//!   "increment_strategies": [
//!     {"key": "default", "increments": [{"from": 0, "to": 399999, "amount": 5000}]}
//!   ],
//!   "premium_schedules": [
//!     {"key": "default", "schedule": [{"min_amount_cents": 0, "percent": "0.2"}]}
//!   ],
//!   "currencies": [{"code": "EUR", "symbol": "€", "display_decimals": 0}]
//! }
//! ```
//!
//! [`PricingConfig::build`] validates every schedule and produces the
//! [`PricingTables`] the engines read. [`PricingConfig::fingerprint`] is a
//! SHA-256 over the canonical JSON, stable across loads of equal configs.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::info;

use crate::engine::PricingTables;
use crate::error::PricingError;
use crate::schedule::{Bracket, ExtrapolationPolicy, IncrementSchedule, PremiumSchedule};
use crate::types::Currency;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("strategy `{key}`: {source}")]
    Strategy {
        key: String,
        #[source]
        source: PricingError,
    },

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// One `{from, to, amount}` increment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementRecord {
    pub from: u64,
    pub to: u64,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementStrategy {
    pub key: String,
    pub increments: Vec<IncrementRecord>,
    /// Overrides the top-level policy for this strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extrapolation: Option<ExtrapolationPolicy>,
}

/// One premium band: `percent` applies from `min_amount_cents` up to the
/// next band's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumBand {
    pub min_amount_cents: u64,
    /// Fraction of the amount, e.g. `"0.25"` for 25%
    pub percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumStrategy {
    pub key: String,
    pub schedule: Vec<PremiumBand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extrapolation: Option<ExtrapolationPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    #[serde(default)]
    pub extrapolation: ExtrapolationPolicy,
    #[serde(default)]
    pub increment_strategies: Vec<IncrementStrategy>,
    #[serde(default)]
    pub premium_schedules: Vec<PremiumStrategy>,
    /// Applied on top of the built-in currency table
    #[serde(default)]
    pub currencies: Vec<Currency>,
}

impl PricingConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Validate every schedule and assemble the lookup tables.
    ///
    /// A later strategy with a repeated key replaces the earlier one.
    pub fn build(&self) -> Result<PricingTables, ConfigError> {
        let mut tables = PricingTables::default();

        for strategy in &self.increment_strategies {
            let brackets = strategy
                .increments
                .iter()
                .map(|r| Bracket::new(r.from, r.to, r.amount))
                .collect();
            let policy = strategy.extrapolation.unwrap_or(self.extrapolation);
            let schedule = IncrementSchedule::new(brackets, policy).map_err(|source| {
                ConfigError::Strategy {
                    key: strategy.key.clone(),
                    source,
                }
            })?;
            tables.increments.insert(strategy.key.clone(), schedule);
        }

        for strategy in &self.premium_schedules {
            let bands: Vec<(u64, Decimal)> = strategy
                .schedule
                .iter()
                .map(|b| (b.min_amount_cents, b.percent))
                .collect();
            let policy = strategy.extrapolation.unwrap_or(self.extrapolation);
            let schedule = PremiumSchedule::from_bands(&bands, policy).map_err(|source| {
                ConfigError::Strategy {
                    key: strategy.key.clone(),
                    source,
                }
            })?;
            tables.premiums.insert(strategy.key.clone(), schedule);
        }

        for currency in &self.currencies {
            tables.currencies.insert(currency.clone())?;
        }

        info!(
            increment_strategies = tables.increments.len(),
            premium_schedules = tables.premiums.len(),
            currencies = tables.currencies.len(),
            "pricing tables built"
        );
        Ok(tables)
    }

    /// Canonical JSON rendering: fields in declaration order, no whitespace.
    pub fn canonical_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Hex SHA-256 of [`canonical_json`](Self::canonical_json).
    pub fn fingerprint(&self) -> Result<String, ConfigError> {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_json()?.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}
