//! Strategy-keyed schedule lookup.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;

use super::bracket::{BracketValue, Schedule};
use crate::error::{BracketMiss, Result};

/// Which engine a schedule feeds. Only used to label lookup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleKind {
    Increment,
    Premium,
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleKind::Increment => write!(f, "increment"),
            ScheduleKind::Premium => write!(f, "buyer's premium"),
        }
    }
}

/// Named schedules of one kind, keyed by strategy identifier.
#[derive(Debug, Clone)]
pub struct ScheduleBook<V> {
    kind: ScheduleKind,
    schedules: BTreeMap<String, Schedule<V>>,
}

pub type IncrementBook = ScheduleBook<u64>;
pub type PremiumBook = ScheduleBook<Decimal>;

impl<V: BracketValue> ScheduleBook<V> {
    pub fn new(kind: ScheduleKind) -> Self {
        Self {
            kind,
            schedules: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> ScheduleKind {
        self.kind
    }

    /// Register a schedule, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, schedule: Schedule<V>) -> Option<Schedule<V>> {
        self.schedules.insert(key.into(), schedule)
    }

    /// Find the schedule for a strategy key.
    ///
    /// An absent key is as much an error as an unknown one.
    ///
    /// # Example
    ///
    /// ```
    /// use lot_pricing::schedule::{IncrementBook, ScheduleKind};
    ///
    /// let book = IncrementBook::new(ScheduleKind::Increment);
    /// let err = book.lookup(None).unwrap_err();
    /// assert!(err.to_string().contains("missing increment strategy"));
    /// ```
    pub fn lookup(&self, key: Option<&str>) -> Result<&Schedule<V>> {
        key.and_then(|k| self.schedules.get(k)).ok_or_else(|| {
            BracketMiss::MissingStrategy {
                kind: self.kind,
                key: key.map(str::to_owned),
            }
            .into()
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.schedules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}
