//! Core data types for lot pricing
//!
//! All amounts are minor units (cents) of a currency.
//!
//! ## Types
//!
//! - [`Money`]: Immutable cents plus currency, with formatting
//! - [`Currency`]: Display metadata for one currency code
//! - [`CurrencyBook`]: In-process [`CurrencyMetadata`] table
//! - [`LotState`]: Upstream bidding state of a lot
//! - [`BidderStanding`]: One bidder's standing on a lot
//! - [`Baseline`]: Start of an increment sequence

mod lot;
mod money;
pub mod price;

pub use lot::{Baseline, BidderStanding, LotState};
pub use money::{Currency, CurrencyBook, CurrencyMetadata, Money, SYMBOL_PLACEHOLDER, VALUE_PLACEHOLDER};
