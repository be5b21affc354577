//! Request-scoped pricing facade.
//!
//! A [`LotPricer`] binds one lot (and optionally one bidder's standing) to the
//! schedule and currency tables for the duration of a request. It holds no
//! mutable state, so a request-scoped loader may call it any number of times
//! with memoized inputs and get identical answers.

use std::sync::Arc;

use tracing::debug;

use super::baseline::select_baseline;
use super::cost::{calculated_cost, CalculatedCost};
use super::increments::{increments, IncrementCursor};
use crate::error::Result;
use crate::schedule::{IncrementBook, PremiumBook, ScheduleKind};
use crate::types::price::non_negative_cents;
use crate::types::{Baseline, BidderStanding, Currency, CurrencyBook, CurrencyMetadata, LotState, Money};

/// Schedules and currency metadata resolved for the surrounding layer.
#[derive(Debug, Clone)]
pub struct PricingTables {
    pub increments: IncrementBook,
    pub premiums: PremiumBook,
    pub currencies: CurrencyBook,
}

impl Default for PricingTables {
    fn default() -> Self {
        Self {
            increments: IncrementBook::new(ScheduleKind::Increment),
            premiums: PremiumBook::new(ScheduleKind::Premium),
            currencies: CurrencyBook::with_defaults(),
        }
    }
}

/// Pricing for one lot within one request.
///
/// ## Example
///
/// ```
/// use lot_pricing::engine::{LotPricer, PricingTables};
/// use lot_pricing::schedule::{Bracket, ExtrapolationPolicy, IncrementSchedule};
/// use lot_pricing::types::{BidderStanding, LotState};
///
/// let mut tables = PricingTables::default();
/// tables.increments.insert(
///     "default",
///     IncrementSchedule::new(
///         vec![Bracket::new(0, 399_999, 5_000), Bracket::new(400_000, 1_000_000, 10_000)],
///         ExtrapolationPolicy::Extrapolate,
///     ).unwrap(),
/// );
///
/// let lot = LotState::new(351_000, "EUR", Some("default"));
/// let standing = BidderStanding::leading(390_000, 390_000);
/// let pricer = LotPricer::new(&tables, &lot).with_standing(Some(&standing));
///
/// let mine: Vec<String> = pricer
///     .increment_prices(2, true)
///     .unwrap()
///     .iter()
///     .map(|m| m.display())
///     .collect();
/// assert_eq!(mine, vec!["€3,950", "€4,000"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LotPricer<'a> {
    tables: &'a PricingTables,
    lot: &'a LotState,
    standing: Option<&'a BidderStanding>,
}

impl<'a> LotPricer<'a> {
    pub fn new(tables: &'a PricingTables, lot: &'a LotState) -> Self {
        Self {
            tables,
            lot,
            standing: None,
        }
    }

    /// Attach the caller's standing; `None` for anonymous requests.
    pub fn with_standing(mut self, standing: Option<&'a BidderStanding>) -> Self {
        self.standing = standing;
        self
    }

    pub fn lot(&self) -> &'a LotState {
        self.lot
    }

    /// Display metadata for the lot's currency.
    pub fn currency(&self) -> Result<Arc<Currency>> {
        self.tables.currencies.require(&self.lot.currency)
    }

    pub fn minimum_next_bid(&self) -> Result<Money> {
        let cents = non_negative_cents(self.lot.minimum_next_bid_cents, "minimum next bid")?;
        Ok(Money::new(cents, self.currency()?))
    }

    pub fn baseline(&self, use_standing_baseline: bool) -> Result<Baseline> {
        select_baseline(self.lot, self.standing, use_standing_baseline)
    }

    /// Unbounded cursor over the lot's legal next bids.
    ///
    /// # Errors
    ///
    /// `NoMatchingBracket` ("missing increment strategy") when the lot has no
    /// strategy key or the key is unknown.
    pub fn increments(&self, use_standing_baseline: bool) -> Result<IncrementCursor<'a>> {
        let key = self.lot.increment_strategy_key.as_deref();
        let schedule = self.tables.increments.lookup(key)?;
        let baseline = self.baseline(use_standing_baseline)?;
        debug!(
            strategy = key.unwrap_or_default(),
            baseline = baseline.cents,
            inclusive = baseline.inclusive,
            "starting increment sequence"
        );
        increments(schedule, baseline)
    }

    /// The first `count` legal next bids as money.
    pub fn increment_prices(&self, count: usize, use_standing_baseline: bool) -> Result<Vec<Money>> {
        let currency = self.currency()?;
        self.increments(use_standing_baseline)?
            .take(count)
            .map(|cents| cents.map(|c| Money::new(c, Arc::clone(&currency))))
            .collect()
    }

    /// Premium and subtotal for a hammer price under the named premium
    /// schedule, in the lot's currency. A negative hammer price is
    /// `InvalidInput`.
    pub fn calculated_cost(&self, hammer_cents: i64, premium_key: Option<&str>) -> Result<CalculatedCost> {
        let schedule = self.tables.premiums.lookup(premium_key)?;
        let currency = self.currency()?;
        debug!(
            strategy = premium_key.unwrap_or_default(),
            hammer_cents, "calculating cost"
        );
        calculated_cost(hammer_cents, schedule, currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;
    use crate::schedule::{Bracket, ExtrapolationPolicy, IncrementSchedule, PremiumSchedule};
    use rust_decimal::Decimal;

    fn tables() -> PricingTables {
        let mut tables = PricingTables::default();
        tables.increments.insert(
            "default",
            IncrementSchedule::new(
                vec![
                    Bracket::new(0, 399_999, 5_000),
                    Bracket::new(400_000, 1_000_000, 10_000),
                ],
                ExtrapolationPolicy::Extrapolate,
            )
            .unwrap(),
        );
        tables.premiums.insert(
            "default",
            PremiumSchedule::from_bands(&[(0, Decimal::new(20, 2))], ExtrapolationPolicy::Extrapolate)
                .unwrap(),
        );
        tables
    }

    fn cents(prices: Vec<Money>) -> Vec<u64> {
        prices.iter().map(Money::cents).collect()
    }

    #[test]
    fn test_anonymous_increments() {
        let tables = tables();
        let lot = LotState::new(351_000, "EUR", Some("default"));
        let pricer = LotPricer::new(&tables, &lot);
        let prices = pricer.increment_prices(2, false).unwrap();
        assert_eq!(prices[0].display(), "€3,510");
        assert_eq!(prices[1].display(), "€3,550");
    }

    #[test]
    fn test_outbid_standing_starts_at_minimum() {
        let tables = tables();
        let lot = LotState::new(351_000, "EUR", Some("default"));
        let standing = BidderStanding::outbid(340_000);
        let pricer = LotPricer::new(&tables, &lot).with_standing(Some(&standing));
        assert_eq!(
            cents(pricer.increment_prices(5, true).unwrap()),
            vec![351_000, 355_000, 360_000, 365_000, 370_000]
        );
    }

    #[test]
    fn test_missing_strategy_is_rejected() {
        let tables = tables();
        let lot = LotState::new(2_400_000_000, "EUR", None);
        let err = LotPricer::new(&tables, &lot).increments(false).unwrap_err();
        assert!(err.to_string().contains("missing increment strategy"));
        assert_eq!(err.kind(), "NoMatchingBracket");
    }

    #[test]
    fn test_unknown_currency() {
        let tables = tables();
        let lot = LotState::new(100, "XTS", Some("default"));
        let err = LotPricer::new(&tables, &lot).increment_prices(1, false).unwrap_err();
        assert_eq!(err, PricingError::UnknownCurrency("XTS".to_string()));
    }

    #[test]
    fn test_calculated_cost_in_lot_currency() {
        let tables = tables();
        let lot = LotState::new(351_000, "USD", Some("default"));
        let cost = LotPricer::new(&tables, &lot)
            .calculated_cost(1_000_000, Some("default"))
            .unwrap();
        assert_eq!(cost.premium.display(), "$2,000.00");
        assert_eq!(cost.subtotal.display(), "$12,000.00");
        assert_eq!(cost.subtotal.currency_code(), "USD");
    }

    #[test]
    fn test_calculated_cost_needs_premium_strategy() {
        let tables = tables();
        let lot = LotState::new(351_000, "USD", Some("default"));
        let err = LotPricer::new(&tables, &lot)
            .calculated_cost(1_000_000, None)
            .unwrap_err();
        assert!(err.to_string().contains("missing buyer's premium strategy"));
    }

    #[test]
    fn test_repeated_calls_agree() {
        let tables = tables();
        let lot = LotState::new(351_000, "EUR", Some("default"));
        let pricer = LotPricer::new(&tables, &lot);
        assert_eq!(
            pricer.increment_prices(20, false).unwrap(),
            pricer.increment_prices(20, false).unwrap()
        );
        assert_eq!(pricer.minimum_next_bid().unwrap().display(), "€3,510");
    }
}
