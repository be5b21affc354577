//! Pricing engines for auction lots.
//!
//! ## Design Principles
//!
//! The engines are designed for:
//!
//! 1. **Determinism**: Same inputs always produce the same outputs
//! 2. **Fixed-Point Math**: Cents as `u64`, rates as `Decimal`, no floats
//! 3. **Laziness**: Increment sequences are unbounded and computed on demand
//! 4. **Statelessness**: Nothing is cached between calls
//!
//! ## Components
//!
//! - [`select_baseline`]: Where a bidder's sequence starts
//! - [`increments`]: Legal next bids from a baseline ([`IncrementCursor`])
//! - [`calculated_cost`]: Buyer's premium and subtotal for a hammer price
//! - [`LotPricer`]: One lot's pricing within one request
//!
//! ## Example
//!
//! ```
//! use lot_pricing::engine::{increments, select_baseline};
//! use lot_pricing::schedule::{Bracket, ExtrapolationPolicy, IncrementSchedule};
//! use lot_pricing::types::LotState;
//!
//! let schedule = IncrementSchedule::new(
//!     vec![Bracket::new(0, 399_999, 5_000), Bracket::new(400_000, 1_000_000, 10_000)],
//!     ExtrapolationPolicy::Extrapolate,
//! ).unwrap();
//!
//! let lot = LotState::new(351_000, "EUR", Some("default"));
//! let baseline = select_baseline(&lot, None, false).unwrap();
//! let bids = increments(&schedule, baseline).unwrap().take_prefix(3).unwrap();
//!
//! assert_eq!(bids, vec![351_000, 355_000, 360_000]);
//! ```

mod baseline;
mod cost;
mod increments;
mod pricer;

pub use baseline::select_baseline;
pub use cost::{calculated_cost, CalculatedCost};
pub use increments::{increments, IncrementCursor};
pub use pricer::{LotPricer, PricingTables};
