//! Buyer's premium and subtotal for a hypothetical hammer price.

use std::sync::Arc;

use tracing::trace;

use crate::error::{PricingError, Result};
use crate::schedule::PremiumSchedule;
use crate::types::price::{non_negative_cents, round_half_up};
use crate::types::{Currency, Money};

/// Premium owed on a hammer price and the resulting subtotal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatedCost {
    pub premium: Money,
    pub subtotal: Money,
}

/// Compute the buyer's total cost for `hammer_cents`.
///
/// The premium is the marginal sum of the schedule's rates over
/// `[0, hammer)`, rounded half-up to a whole minor unit.
///
/// # Errors
///
/// - `InvalidInput` for a negative hammer price (not `NoMatchingBracket`)
/// - `NoMatchingBracket` when the schedule does not cover the hammer price
/// - `AmountOverflow` when the subtotal does not fit
///
/// # Example
///
/// ```
/// use lot_pricing::engine::calculated_cost;
/// use lot_pricing::schedule::{ExtrapolationPolicy, PremiumSchedule};
/// use lot_pricing::types::{CurrencyBook, CurrencyMetadata};
/// use rust_decimal::Decimal;
///
/// let schedule = PremiumSchedule::from_bands(
///     &[(0, Decimal::new(20, 2))],
///     ExtrapolationPolicy::Extrapolate,
/// ).unwrap();
/// let usd = CurrencyBook::with_defaults().require("USD").unwrap();
///
/// let cost = calculated_cost(1_000_000, &schedule, usd).unwrap();
/// assert_eq!(cost.premium.cents(), 200_000);
/// assert_eq!(cost.subtotal.display(), "$12,000.00");
/// ```
pub fn calculated_cost(
    hammer_cents: i64,
    schedule: &PremiumSchedule,
    currency: Arc<Currency>,
) -> Result<CalculatedCost> {
    let hammer = non_negative_cents(hammer_cents, "hammer price")?;

    let exact = schedule.marginal_sum(0, hammer)?;
    let premium = round_half_up(exact).ok_or_else(|| PricingError::overflow("buyer's premium"))?;
    let subtotal = hammer
        .checked_add(premium)
        .ok_or_else(|| PricingError::overflow("subtotal"))?;

    trace!(hammer, %exact, premium, subtotal, "calculated cost");

    Ok(CalculatedCost {
        premium: Money::new(premium, Arc::clone(&currency)),
        subtotal: Money::new(subtotal, currency),
    })
}
