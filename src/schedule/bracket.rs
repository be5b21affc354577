//! Brackets, schedule validation, resolution and marginal sums.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{BracketMiss, PricingError, Result};

/// Value carried by a bracket. Each kind enforces its own sanity rule.
pub trait BracketValue: Copy + PartialEq + std::fmt::Debug {
    fn validate(&self) -> Result<()>;
}

impl BracketValue for u64 {
    /// Increment steps must advance the bid.
    fn validate(&self) -> Result<()> {
        if *self == 0 {
            return Err(PricingError::invalid("increment step must be positive"));
        }
        Ok(())
    }
}

impl BracketValue for Decimal {
    /// Premium rates may be zero but never negative.
    fn validate(&self) -> Result<()> {
        if self.is_sign_negative() && !self.is_zero() {
            return Err(PricingError::invalid(format!(
                "premium rate {self} must not be negative"
            )));
        }
        Ok(())
    }
}

/// What to do with positions above the last bracket's `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtrapolationPolicy {
    /// The last bracket applies to every position beyond its stated `to`.
    #[default]
    Extrapolate,
    /// Positions beyond the last bracket fail with `NoMatchingBracket`.
    Strict,
}

/// One `[from, to]` range (inclusive, in cents) and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket<V> {
    pub from: u64,
    pub to: u64,
    pub value: V,
}

impl<V> Bracket<V> {
    pub fn new(from: u64, to: u64, value: V) -> Self {
        Self { from, to, value }
    }

    #[inline]
    pub fn contains(&self, position: u64) -> bool {
        self.from <= position && position <= self.to
    }
}

impl Bracket<u64> {
    /// The increment step of this bracket, in cents.
    #[inline]
    pub fn step(&self) -> u64 {
        self.value
    }

    /// Smallest value `>= value` lying on this bracket's grid
    /// (`from + k * step`).
    ///
    /// # Example
    ///
    /// ```
    /// use lot_pricing::schedule::Bracket;
    ///
    /// let bracket = Bracket::new(0, 399_999, 5_000u64);
    /// assert_eq!(bracket.align_up(351_000).unwrap(), 355_000);
    /// assert_eq!(bracket.align_up(355_000).unwrap(), 355_000);
    /// ```
    pub fn align_up(&self, value: u64) -> Result<u64> {
        if value <= self.from {
            return Ok(self.from);
        }
        let offset = (value - self.from) % self.value;
        if offset == 0 {
            return Ok(value);
        }
        value
            .checked_add(self.value - offset)
            .ok_or_else(|| PricingError::overflow("grid alignment"))
    }

    /// Whether `value` already lies on this bracket's grid.
    #[inline]
    pub fn is_aligned(&self, value: u64) -> bool {
        value >= self.from && (value - self.from) % self.value == 0
    }
}

/// An ordered, contiguous list of brackets.
///
/// Invariants (checked by the constructors):
/// - at least one bracket
/// - `from <= to` for every bracket
/// - `brackets[i].to + 1 == brackets[i + 1].from`
/// - every value passes [`BracketValue::validate`]
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule<V> {
    brackets: Vec<Bracket<V>>,
    policy: ExtrapolationPolicy,
}

/// Schedule of bid increment steps (cents).
pub type IncrementSchedule = Schedule<u64>;

/// Schedule of buyer's premium rates (fraction of each cent of hammer price).
pub type PremiumSchedule = Schedule<Decimal>;

impl<V: BracketValue> Schedule<V> {
    /// Build a schedule from explicit brackets.
    ///
    /// # Errors
    ///
    /// - `NoMatchingBracket(EmptySchedule)` for an empty list
    /// - `InvalidInput` for inverted, unsorted, overlapping or gapped brackets,
    ///   or an invalid value
    pub fn new(brackets: Vec<Bracket<V>>, policy: ExtrapolationPolicy) -> Result<Self> {
        if brackets.is_empty() {
            return Err(BracketMiss::EmptySchedule.into());
        }

        for (i, bracket) in brackets.iter().enumerate() {
            if bracket.from > bracket.to {
                return Err(PricingError::invalid(format!(
                    "bracket {i} has from {} above to {}",
                    bracket.from, bracket.to
                )));
            }
            bracket.value.validate()?;
        }

        for (i, pair) in brackets.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.from < prev.from {
                return Err(PricingError::invalid(format!(
                    "brackets {i} and {} are not sorted by from",
                    i + 1
                )));
            }
            if next.from <= prev.to {
                return Err(PricingError::invalid(format!(
                    "brackets {i} and {} overlap at {}",
                    i + 1,
                    next.from
                )));
            }
            if next.from - prev.to != 1 {
                return Err(PricingError::invalid(format!(
                    "gap between brackets {i} and {}: {} to {}",
                    i + 1,
                    prev.to,
                    next.from
                )));
            }
        }

        Ok(Self { brackets, policy })
    }

    /// Build a contiguous schedule from band starts.
    ///
    /// Bands cover everything from 0: the first must start there. Each band
    /// runs up to one cent below the next band's start; the last band runs
    /// to `u64::MAX`. This is the shape of upstream buyer's premium
    /// records (`min_amount_cents` plus a rate).
    ///
    /// # Example
    ///
    /// ```
    /// use lot_pricing::schedule::{ExtrapolationPolicy, PremiumSchedule};
    /// use rust_decimal::Decimal;
    ///
    /// let schedule = PremiumSchedule::from_bands(
    ///     &[(0, Decimal::new(25, 2)), (50_000_000, Decimal::new(20, 2))],
    ///     ExtrapolationPolicy::Extrapolate,
    /// ).unwrap();
    /// assert_eq!(schedule.brackets()[0].to, 49_999_999);
    /// assert_eq!(schedule.brackets()[1].to, u64::MAX);
    /// ```
    pub fn from_bands(bands: &[(u64, V)], policy: ExtrapolationPolicy) -> Result<Self> {
        if let Some(&(start, _)) = bands.first() {
            if start != 0 {
                return Err(PricingError::invalid(format!(
                    "first band must start at 0, got {start}"
                )));
            }
        }
        let mut brackets = Vec::with_capacity(bands.len());
        for (i, &(from, value)) in bands.iter().enumerate() {
            let to = match bands.get(i + 1) {
                Some(&(next_from, _)) => next_from.checked_sub(1).ok_or_else(|| {
                    PricingError::invalid(format!("band {} cannot start at 0", i + 1))
                })?,
                None => u64::MAX,
            };
            brackets.push(Bracket::new(from, to, value));
        }
        Self::new(brackets, policy)
    }

    pub fn brackets(&self) -> &[Bracket<V>] {
        &self.brackets
    }

    pub fn policy(&self) -> ExtrapolationPolicy {
        self.policy
    }

    /// Same brackets under a different extrapolation policy.
    pub fn with_policy(mut self, policy: ExtrapolationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Lowest position the schedule covers.
    pub fn floor(&self) -> u64 {
        self.brackets[0].from
    }

    fn last(&self) -> &Bracket<V> {
        &self.brackets[self.brackets.len() - 1]
    }

    /// Return the bracket whose range contains `position`.
    ///
    /// # Errors
    ///
    /// - `BelowSchedule` when `position` is under the first bracket
    /// - `BeyondSchedule` when `position` is over the last bracket and the
    ///   policy is `Strict`
    pub fn resolve(&self, position: u64) -> Result<&Bracket<V>> {
        let floor = self.floor();
        if position < floor {
            return Err(BracketMiss::BelowSchedule { position, floor }.into());
        }

        // Contiguity means the last bracket starting at or below `position`
        // is the only candidate.
        let idx = self.brackets.partition_point(|b| b.from <= position);
        let bracket = &self.brackets[idx - 1];
        if position <= bracket.to {
            return Ok(bracket);
        }

        match self.policy {
            ExtrapolationPolicy::Extrapolate => {
                trace!(position, ceiling = bracket.to, "extrapolating last bracket");
                Ok(bracket)
            }
            ExtrapolationPolicy::Strict => Err(BracketMiss::BeyondSchedule {
                position,
                ceiling: bracket.to,
            }
            .into()),
        }
    }
}

impl<V: BracketValue + Into<Decimal>> Schedule<V> {
    /// Sum `value * overlap` over every bracket overlapping `[base, target)`.
    ///
    /// Working on a half-open interval makes the sum exactly additive:
    /// `marginal_sum(0, x) + marginal_sum(x, y) == marginal_sum(0, y)`.
    ///
    /// # Example
    ///
    /// ```
    /// use lot_pricing::schedule::{Bracket, ExtrapolationPolicy, PremiumSchedule};
    /// use rust_decimal::Decimal;
    ///
    /// // 25% up to 1,000.00, 20% above
    /// let schedule = PremiumSchedule::new(
    ///     vec![
    ///         Bracket::new(0, 99_999, Decimal::new(25, 2)),
    ///         Bracket::new(100_000, u64::MAX, Decimal::new(20, 2)),
    ///     ],
    ///     ExtrapolationPolicy::Extrapolate,
    /// ).unwrap();
    ///
    /// let premium = schedule.marginal_sum(0, 200_000).unwrap();
    /// assert_eq!(premium, Decimal::from(45_000));
    /// ```
    pub fn marginal_sum(&self, base: u64, target: u64) -> Result<Decimal> {
        if base > target {
            return Err(PricingError::invalid(format!(
                "marginal sum base {base} is above target {target}"
            )));
        }
        if base == target {
            return Ok(Decimal::ZERO);
        }

        let floor = self.floor();
        if base < floor {
            return Err(BracketMiss::BelowSchedule {
                position: base,
                floor,
            }
            .into());
        }

        let last = self.last();
        let last_covered = target - 1;
        if last_covered > last.to && self.policy == ExtrapolationPolicy::Strict {
            return Err(BracketMiss::BeyondSchedule {
                position: last_covered,
                ceiling: last.to,
            }
            .into());
        }

        // u128 so that `to + 1` and an open-ended last bracket never overflow.
        let (base, target) = (u128::from(base), u128::from(target));
        let mut sum = Decimal::ZERO;
        for (i, bracket) in self.brackets.iter().enumerate() {
            let lo = base.max(u128::from(bracket.from));
            let end = if i == self.brackets.len() - 1 {
                target.max(u128::from(bracket.to) + 1)
            } else {
                u128::from(bracket.to) + 1
            };
            let hi = target.min(end);
            if hi <= lo {
                continue;
            }

            let overlap = u64::try_from(hi - lo)
                .map_err(|_| PricingError::overflow("bracket overlap"))?;
            let rate: Decimal = bracket.value.into();
            let part = rate
                .checked_mul(Decimal::from(overlap))
                .ok_or_else(|| PricingError::overflow("marginal sum"))?;
            sum = sum
                .checked_add(part)
                .ok_or_else(|| PricingError::overflow("marginal sum"))?;
        }
        Ok(sum)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tier_increments() -> IncrementSchedule {
        Schedule::new(
            vec![
                Bracket::new(0, 399_999, 5_000),
                Bracket::new(400_000, 1_000_000, 10_000),
            ],
            ExtrapolationPolicy::Extrapolate,
        )
        .unwrap()
    }

    fn rate(percent: i64) -> Decimal {
        Decimal::new(percent, 2)
    }

    #[test]
    fn test_resolve_inside_brackets() {
        let schedule = two_tier_increments();
        assert_eq!(schedule.resolve(0).unwrap().step(), 5_000);
        assert_eq!(schedule.resolve(399_999).unwrap().step(), 5_000);
        assert_eq!(schedule.resolve(400_000).unwrap().step(), 10_000);
        assert_eq!(schedule.resolve(1_000_000).unwrap().step(), 10_000);
    }

    #[test]
    fn test_resolve_extrapolates_last_bracket() {
        let schedule = two_tier_increments();
        let bracket = schedule.resolve(5_000_000_000).unwrap();
        assert_eq!(bracket.from, 400_000);
        assert_eq!(bracket.step(), 10_000);
    }

    #[test]
    fn test_resolve_strict_fails_beyond_ceiling() {
        let schedule = two_tier_increments().with_policy(ExtrapolationPolicy::Strict);
        let err = schedule.resolve(1_000_001).unwrap_err();
        assert_eq!(
            err,
            PricingError::NoMatchingBracket(BracketMiss::BeyondSchedule {
                position: 1_000_001,
                ceiling: 1_000_000,
            })
        );
    }

    #[test]
    fn test_resolve_below_floor() {
        let schedule = IncrementSchedule::new(
            vec![Bracket::new(100, 999, 10)],
            ExtrapolationPolicy::Extrapolate,
        )
        .unwrap();
        let err = schedule.resolve(99).unwrap_err();
        assert_eq!(
            err,
            PricingError::NoMatchingBracket(BracketMiss::BelowSchedule {
                position: 99,
                floor: 100,
            })
        );
    }

    #[test]
    fn test_empty_schedule_rejected() {
        let err = IncrementSchedule::new(vec![], ExtrapolationPolicy::Extrapolate).unwrap_err();
        assert_eq!(err, PricingError::NoMatchingBracket(BracketMiss::EmptySchedule));
    }

    #[test]
    fn test_malformed_schedules_rejected() {
        let cases = vec![
            // inverted
            vec![Bracket::new(10, 5, 1u64)],
            // unsorted
            vec![Bracket::new(100, 199, 1), Bracket::new(0, 99, 1)],
            // overlapping
            vec![Bracket::new(0, 100, 1), Bracket::new(100, 200, 1)],
            // gap
            vec![Bracket::new(0, 99, 1), Bracket::new(150, 200, 1)],
            // zero step
            vec![Bracket::new(0, 99, 0)],
        ];
        for brackets in cases {
            let err = IncrementSchedule::new(brackets.clone(), ExtrapolationPolicy::Extrapolate)
                .unwrap_err();
            assert_eq!(err.kind(), "InvalidInput", "accepted {:?}", brackets);
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = PremiumSchedule::new(
            vec![Bracket::new(0, u64::MAX, Decimal::new(-1, 2))],
            ExtrapolationPolicy::Extrapolate,
        )
        .unwrap_err();
        assert_eq!(err.kind(), "InvalidInput");
    }

    #[test]
    fn test_from_bands() {
        let schedule = PremiumSchedule::from_bands(
            &[(0, rate(25)), (100_000, rate(20)), (300_000, rate(12))],
            ExtrapolationPolicy::Extrapolate,
        )
        .unwrap();
        let brackets = schedule.brackets();
        assert_eq!(brackets.len(), 3);
        assert_eq!((brackets[0].from, brackets[0].to), (0, 99_999));
        assert_eq!((brackets[1].from, brackets[1].to), (100_000, 299_999));
        assert_eq!((brackets[2].from, brackets[2].to), (300_000, u64::MAX));
    }

    #[test]
    fn test_from_bands_rejects_duplicate_start() {
        let err = PremiumSchedule::from_bands(
            &[(0, rate(25)), (0, rate(20))],
            ExtrapolationPolicy::Extrapolate,
        )
        .unwrap_err();
        assert_eq!(err.kind(), "InvalidInput");
    }

    #[test]
    fn test_from_bands_must_start_at_zero() {
        let err = PremiumSchedule::from_bands(
            &[(100, rate(20)), (100_000, rate(12))],
            ExtrapolationPolicy::Extrapolate,
        )
        .unwrap_err();
        assert_eq!(err.kind(), "InvalidInput");

        let err = PremiumSchedule::from_bands(&[], ExtrapolationPolicy::Extrapolate).unwrap_err();
        assert_eq!(err.kind(), "NoMatchingBracket");
    }

    #[test]
    fn test_align_up() {
        let bracket = Bracket::new(400_000, 1_000_000, 10_000u64);
        assert_eq!(bracket.align_up(0).unwrap(), 400_000);
        assert_eq!(bracket.align_up(400_000).unwrap(), 400_000);
        assert_eq!(bracket.align_up(400_001).unwrap(), 410_000);
        assert!(bracket.is_aligned(420_000));
        assert!(!bracket.is_aligned(425_000));
    }

    #[test]
    fn test_align_up_overflow() {
        let bracket = Bracket::new(0, u64::MAX, 1_000u64);
        let err = bracket.align_up(u64::MAX).unwrap_err();
        assert_eq!(err.kind(), "AmountOverflow");
    }

    #[test]
    fn test_marginal_sum_flat() {
        let schedule = PremiumSchedule::new(
            vec![Bracket::new(0, u64::MAX, rate(20))],
            ExtrapolationPolicy::Extrapolate,
        )
        .unwrap();
        assert_eq!(schedule.marginal_sum(0, 1_000_000).unwrap(), Decimal::from(200_000));
        assert_eq!(schedule.marginal_sum(0, 0).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_marginal_sum_tiers() {
        let schedule = PremiumSchedule::from_bands(
            &[(0, rate(25)), (100_000, rate(20)), (300_000, rate(12))],
            ExtrapolationPolicy::Extrapolate,
        )
        .unwrap();
        // 100_000 * 0.25 + 200_000 * 0.20 + 100_000 * 0.12
        assert_eq!(
            schedule.marginal_sum(0, 400_000).unwrap(),
            Decimal::from(25_000 + 40_000 + 12_000)
        );
    }

    #[test]
    fn test_marginal_sum_additive_across_boundary() {
        let schedule = PremiumSchedule::from_bands(
            &[(0, rate(25)), (100_000, rate(20))],
            ExtrapolationPolicy::Extrapolate,
        )
        .unwrap();
        let whole = schedule.marginal_sum(0, 250_000).unwrap();
        let left = schedule.marginal_sum(0, 99_999).unwrap();
        let right = schedule.marginal_sum(99_999, 250_000).unwrap();
        assert_eq!(left + right, whole);
    }

    #[test]
    fn test_marginal_sum_extrapolates_bounded_last_bracket() {
        let schedule = PremiumSchedule::new(
            vec![Bracket::new(0, 999, rate(10))],
            ExtrapolationPolicy::Extrapolate,
        )
        .unwrap();
        assert_eq!(schedule.marginal_sum(0, 2_000).unwrap(), Decimal::from(200));

        let strict = schedule.with_policy(ExtrapolationPolicy::Strict);
        assert_eq!(strict.marginal_sum(0, 1_000).unwrap(), Decimal::from(100));
        assert_eq!(strict.marginal_sum(0, 1_001).unwrap_err().kind(), "NoMatchingBracket");
    }

    #[test]
    fn test_marginal_sum_rejects_reversed_interval() {
        let schedule = PremiumSchedule::new(
            vec![Bracket::new(0, u64::MAX, rate(20))],
            ExtrapolationPolicy::Extrapolate,
        )
        .unwrap();
        assert_eq!(schedule.marginal_sum(10, 5).unwrap_err().kind(), "InvalidInput");
    }
}
