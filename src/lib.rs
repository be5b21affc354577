//! # Lot Pricing
//!
//! Bid increment ladders and buyer's premium cost calculation for auction lots.
//!
//! ## Architecture
//!
//! The crate consists of:
//! - **Types**: Money, currency metadata, lot and bidder state
//! - **Schedule**: Contiguous bracketed schedules and strategy-keyed books
//! - **Engine**: Baseline selection, increment cursor, cost calculation
//! - **Config**: JSON-loaded schedules and currency overrides
//!
//! ## Design Principles
//!
//! 1. **Determinism**: All operations produce identical results for identical inputs
//! 2. **No Floating Point**: Cents are `u64`, rates are `rust_decimal::Decimal`
//! 3. **Checked Arithmetic**: Overflow is an error, never a wrap
//! 4. **Stateless**: No caches, no I/O in the engines, safe to share across threads
//!
//! ## Example
//!
//! ```
//! use lot_pricing::{LotPricer, LotState, PricingConfig};
//!
//! let config = PricingConfig::from_json_str(r#"{
//!     "increment_strategies": [{"key": "default", "increments": [
//!         {"from": 0, "to": 399999, "amount": 5000},
//!         {"from": 400000, "to": 1000000, "amount": 10000}
//!     ]}],
//!     "premium_schedules": [{"key": "default", "schedule": [
//!         {"min_amount_cents": 0, "percent": "0.2"}
//!     ]}]
//! }"#).unwrap();
//! let tables = config.build().unwrap();
//!
//! let lot = LotState::new(351_000, "EUR", Some("default"));
//! let pricer = LotPricer::new(&tables, &lot);
//!
//! let bids: Vec<String> = pricer.increment_prices(3, false).unwrap()
//!     .iter().map(|m| m.display()).collect();
//! assert_eq!(bids, vec!["€3,510", "€3,550", "€3,600"]);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error taxonomy and error-to-data conversion
pub mod error;

/// Core data types: Money, Currency, LotState, BidderStanding
pub mod types;

/// Bracketed schedules and strategy books
pub mod schedule;

/// Pricing engines: baseline, increments, cost
pub mod engine;

/// JSON configuration of schedules and currencies
pub mod config;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::{ConfigError, PricingConfig};
pub use engine::{calculated_cost, increments, select_baseline, CalculatedCost, IncrementCursor, LotPricer, PricingTables};
pub use error::{ErrorData, PricingError};
pub use schedule::{Bracket, ExtrapolationPolicy, IncrementSchedule, PremiumSchedule, Schedule};
pub use types::{Baseline, BidderStanding, Currency, CurrencyBook, CurrencyMetadata, LotState, Money};
