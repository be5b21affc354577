//! Error taxonomy for pricing computations.
//!
//! Every failure is synchronous and local to one computation. Nothing here is
//! transient: the engine is pure, so retrying with the same inputs returns the
//! same error. The surrounding request layer should treat all of these as
//! request-level errors.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::schedule::ScheduleKind;

/// Why a schedule could not supply a bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketMiss {
    /// The strategy key was absent, or names no known schedule.
    MissingStrategy {
        kind: ScheduleKind,
        key: Option<String>,
    },
    /// The position lies below the first bracket's `from`.
    BelowSchedule { position: u64, floor: u64 },
    /// The position lies above the last bracket's `to` under a strict policy.
    BeyondSchedule { position: u64, ceiling: u64 },
    /// The schedule declares no brackets at all.
    EmptySchedule,
}

impl fmt::Display for BracketMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketMiss::MissingStrategy { kind, key: Some(key) } => {
                write!(f, "missing {kind} strategy `{key}`")
            }
            BracketMiss::MissingStrategy { kind, key: None } => {
                write!(f, "missing {kind} strategy")
            }
            BracketMiss::BelowSchedule { position, floor } => {
                write!(f, "position {position} is below the schedule floor {floor}")
            }
            BracketMiss::BeyondSchedule { position, ceiling } => {
                write!(f, "position {position} is beyond the schedule ceiling {ceiling}")
            }
            BracketMiss::EmptySchedule => write!(f, "schedule has no brackets"),
        }
    }
}

/// All failures the pricing core can produce.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// A schedule lookup or bracket resolution failed.
    #[error("no matching bracket: {0}")]
    NoMatchingBracket(BracketMiss),

    /// A negative amount or a malformed schedule.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Cents arithmetic left the representable range.
    #[error("amount overflow while computing {operation}")]
    AmountOverflow { operation: &'static str },

    /// The currency metadata collaborator has no entry for this code.
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),
}

impl PricingError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        PricingError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(operation: &'static str) -> Self {
        PricingError::AmountOverflow { operation }
    }

    /// Stable machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            PricingError::NoMatchingBracket(_) => "NoMatchingBracket",
            PricingError::InvalidInput { .. } => "InvalidInput",
            PricingError::AmountOverflow { .. } => "AmountOverflow",
            PricingError::UnknownCurrency(_) => "UnknownCurrency",
        }
    }

    /// Pricing errors are always request errors; none is worth retrying.
    pub fn is_request_error(&self) -> bool {
        true
    }

    /// Convert into the data shape a query layer returns in an `...OrError`
    /// field instead of failing the whole response.
    ///
    /// # Example
    ///
    /// ```
    /// use lot_pricing::error::{BracketMiss, PricingError};
    /// use lot_pricing::schedule::ScheduleKind;
    ///
    /// let err = PricingError::NoMatchingBracket(BracketMiss::MissingStrategy {
    ///     kind: ScheduleKind::Increment,
    ///     key: None,
    /// });
    /// let data = err.to_error_data();
    /// assert_eq!(data.kind, "NoMatchingBracket");
    /// assert!(data.message.contains("missing increment strategy"));
    /// ```
    pub fn to_error_data(&self) -> ErrorData {
        let position = match self {
            PricingError::NoMatchingBracket(BracketMiss::BelowSchedule { position, .. })
            | PricingError::NoMatchingBracket(BracketMiss::BeyondSchedule { position, .. }) => {
                Some(*position)
            }
            _ => None,
        };
        ErrorData {
            kind: self.kind(),
            message: self.to_string(),
            position,
        }
    }
}

impl From<BracketMiss> for PricingError {
    fn from(miss: BracketMiss) -> Self {
        PricingError::NoMatchingBracket(miss)
    }
}

/// Serializable description of a failed computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorData {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
}

pub type Result<T, E = PricingError> = std::result::Result<T, E>;
