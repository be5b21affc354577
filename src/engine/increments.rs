//! Lazy production of legal next-bid amounts.
//!
//! ## Algorithm
//!
//! - **Inclusive** baseline: the first value is the baseline itself, aligned
//!   or not.
//! - **Exclusive** baseline: the first value is the baseline's successor.
//! - The successor of `v` is `align_up(v + 1)` on the grid of the bracket
//!   active at `v`, where "grid" means `from + k * step`. For an aligned `v`
//!   that is `v + step`; an unaligned inclusive baseline snaps up to the
//!   grid (351000 becomes 355000 on a 5000 grid).
//!
//! A successor that lands in another bracket off that bracket's grid is
//! re-aligned upward on the grid of the bracket it landed in. Schedules whose
//! boundaries sit on grid points never need this; irregular ones do. The step
//! of the bracket at `v` is therefore the minimum distance to the next bid.
//!
//! ## Laziness
//!
//! The sequence is unbounded: the cursor computes one value per `next` and
//! holds nothing but the last value produced. Callers bound consumption with
//! [`IncrementCursor::take_prefix`] or iterator adaptors.

use std::iter::FusedIterator;
use std::ptr;

use crate::error::{PricingError, Result};
use crate::schedule::IncrementSchedule;
use crate::types::Baseline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    /// The first value, not yet yielded
    First(u64),
    /// Last value yielded
    After(u64),
    /// An error was yielded; nothing follows
    Exhausted,
}

/// Cursor over the increment sequence for one schedule and baseline.
///
/// Yields `Result<u64>` cents and fuses after the first error (an overflow,
/// or running off a `Strict` schedule).
#[derive(Debug, Clone)]
pub struct IncrementCursor<'a> {
    schedule: &'a IncrementSchedule,
    baseline: Baseline,
    state: CursorState,
}

/// Start an increment sequence.
///
/// # Errors
///
/// `NoMatchingBracket` when the baseline lies outside the schedule, or
/// `AmountOverflow` when no value above an exclusive baseline fits in `u64`.
///
/// # Example
///
/// ```
/// use lot_pricing::engine::increments;
/// use lot_pricing::schedule::{Bracket, ExtrapolationPolicy, IncrementSchedule};
/// use lot_pricing::types::Baseline;
///
/// let schedule = IncrementSchedule::new(
///     vec![
///         Bracket::new(0, 399_999, 5_000),
///         Bracket::new(400_000, 1_000_000, 10_000),
///     ],
///     ExtrapolationPolicy::Extrapolate,
/// ).unwrap();
///
/// let mut cursor = increments(&schedule, Baseline::inclusive(351_000)).unwrap();
/// assert_eq!(cursor.take_prefix(3).unwrap(), vec![351_000, 355_000, 360_000]);
///
/// let mut cursor = increments(&schedule, Baseline::exclusive(390_000)).unwrap();
/// assert_eq!(cursor.take_prefix(3).unwrap(), vec![395_000, 400_000, 410_000]);
/// ```
pub fn increments(schedule: &IncrementSchedule, baseline: Baseline) -> Result<IncrementCursor<'_>> {
    schedule.resolve(baseline.cents)?;

    let first = if baseline.inclusive {
        baseline.cents
    } else {
        successor(schedule, baseline.cents)?
    };

    Ok(IncrementCursor {
        schedule,
        baseline,
        state: CursorState::First(first),
    })
}

/// The value following `value`: one step of the bracket active at `value`,
/// re-aligned upward where it lands.
fn successor(schedule: &IncrementSchedule, value: u64) -> Result<u64> {
    let active = schedule.resolve(value)?;
    let next = value
        .checked_add(1)
        .ok_or_else(|| PricingError::overflow("next increment"))?;
    let candidate = active.align_up(next)?;
    realign(schedule, candidate)
}

/// Smallest value `>= candidate` on the grid of the bracket it falls in.
fn realign(schedule: &IncrementSchedule, mut candidate: u64) -> Result<u64> {
    loop {
        let bracket = schedule.resolve(candidate)?;
        let aligned = bracket.align_up(candidate)?;
        if aligned <= bracket.to {
            return Ok(aligned);
        }
        // No grid point left in this bracket: the next bracket's start is
        // one, unless this bracket is the open-ended last one.
        match bracket.to.checked_add(1) {
            Some(next_start) if !ptr::eq(schedule.resolve(next_start)?, bracket) => {
                candidate = next_start;
            }
            _ => return Ok(aligned),
        }
    }
}

impl<'a> IncrementCursor<'a> {
    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    /// Produce the next value, `Ok(None)` only after an earlier error.
    pub fn next_cents(&mut self) -> Result<Option<u64>> {
        let value = match self.state {
            CursorState::First(value) => value,
            CursorState::After(previous) => match successor(self.schedule, previous) {
                Ok(value) => value,
                Err(e) => {
                    self.state = CursorState::Exhausted;
                    return Err(e);
                }
            },
            CursorState::Exhausted => return Ok(None),
        };
        self.state = CursorState::After(value);
        Ok(Some(value))
    }

    /// Materialize the next `count` values.
    pub fn take_prefix(&mut self, count: usize) -> Result<Vec<u64>> {
        self.by_ref().take(count).collect()
    }
}

impl Iterator for IncrementCursor<'_> {
    type Item = Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_cents().transpose()
    }
}

impl FusedIterator for IncrementCursor<'_> {}

// ============================================================================
// Unit Tests
// ============================================================================
