//! Choosing where a bidder's increment sequence starts.

use crate::error::Result;
use crate::types::price::non_negative_cents;
use crate::types::{Baseline, BidderStanding, LotState};

/// Pick the baseline for a lot and an optional bidder standing.
///
/// Rules, in order:
///
/// 1. Without `use_standing_baseline`, without a standing, or without a
///    leading bid: start at the lot's minimum next bid, which is itself a
///    legal bid (inclusive).
/// 2. With `use_standing_baseline` and a leading bid: start strictly above
///    the bidder's own current amount (exclusive), since they cannot re-bid it.
/// 3. An outbid bidder's stale maximum is ignored, which is rule 1 again.
///
/// # Errors
///
/// `InvalidInput` if the amount chosen is negative.
///
/// # Example
///
/// ```
/// use lot_pricing::engine::select_baseline;
/// use lot_pricing::types::{Baseline, BidderStanding, LotState};
///
/// let lot = LotState::new(351_000, "EUR", Some("default"));
/// let leading = BidderStanding::leading(390_000, 390_000);
///
/// assert_eq!(select_baseline(&lot, Some(&leading), false).unwrap(), Baseline::inclusive(351_000));
/// assert_eq!(select_baseline(&lot, Some(&leading), true).unwrap(), Baseline::exclusive(390_000));
/// ```
pub fn select_baseline(
    lot: &LotState,
    standing: Option<&BidderStanding>,
    use_standing_baseline: bool,
) -> Result<Baseline> {
    let leading = standing
        .filter(|_| use_standing_baseline)
        .and_then(|s| s.leading_bid_cents);

    match leading {
        Some(cents) => Ok(Baseline::exclusive(non_negative_cents(cents, "leading bid")?)),
        None => Ok(Baseline::inclusive(non_negative_cents(
            lot.minimum_next_bid_cents,
            "minimum next bid",
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot() -> LotState {
        LotState::new(351_000, "EUR", Some("default"))
    }

    #[test]
    fn test_anonymous_caller_starts_at_minimum() {
        assert_eq!(select_baseline(&lot(), None, true).unwrap(), Baseline::inclusive(351_000));
    }

    #[test]
    fn test_standing_ignored_without_flag() {
        let standing = BidderStanding::leading(390_000, 390_000);
        assert_eq!(
            select_baseline(&lot(), Some(&standing), false).unwrap(),
            Baseline::inclusive(351_000)
        );
    }

    #[test]
    fn test_leading_bidder_starts_above_own_bid() {
        let standing = BidderStanding::leading(400_000, 390_000);
        assert_eq!(
            select_baseline(&lot(), Some(&standing), true).unwrap(),
            Baseline::exclusive(390_000)
        );
    }

    #[test]
    fn test_outbid_bidder_falls_back_to_minimum() {
        let standing = BidderStanding::outbid(340_000);
        assert_eq!(
            select_baseline(&lot(), Some(&standing), true).unwrap(),
            Baseline::inclusive(351_000)
        );
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let lot = LotState::new(-1, "EUR", None);
        assert_eq!(select_baseline(&lot, None, false).unwrap_err().kind(), "InvalidInput");

        let standing = BidderStanding::leading(0, -5);
        assert_eq!(
            select_baseline(&self::lot(), Some(&standing), true).unwrap_err().kind(),
            "InvalidInput"
        );
    }
}
