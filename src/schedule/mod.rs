//! Bracketed schedules shared by the increment and premium engines.
//!
//! ## Structure
//!
//! A [`Schedule`] is an ordered, contiguous, non-overlapping list of
//! [`Bracket`]s. Each bracket covers the inclusive cents range `[from, to]`
//! and carries a value:
//!
//! - **Increment schedules** ([`IncrementSchedule`]): the value is a step in
//!   cents. Legal bids inside a bracket lie on the grid `from + k * step`.
//! - **Premium schedules** ([`PremiumSchedule`]): the value is a per-unit
//!   rate, summed marginally like tax brackets.
//!
//! ## Beyond the last bracket
//!
//! Upstream schedules usually close with a far-future `to`. What happens past
//! it is an [`ExtrapolationPolicy`]: by default the last bracket is treated as
//! open-ended; `Strict` turns such positions into errors.
//!
//! ## Lookup
//!
//! Schedules are named by strategy key inside a [`ScheduleBook`]. A missing or
//! unknown key is an error, never a silent default.

mod book;
mod bracket;

pub use book::{IncrementBook, PremiumBook, ScheduleBook, ScheduleKind};
pub use bracket::{
    Bracket, BracketValue, ExtrapolationPolicy, IncrementSchedule, PremiumSchedule, Schedule,
};
