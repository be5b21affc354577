//! Per-request lot and bidder records.
//!
//! Both are built fresh from upstream data for each request and read only by
//! the engines. Amounts arrive signed, as upstream services send them, and
//! are validated when an engine converts them to cents.

use serde::{Deserialize, Serialize};

/// Bidding state of one lot, as reported by the auction-lot service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotState {
    pub minimum_next_bid_cents: i64,
    pub currency: String,
    #[serde(default)]
    pub increment_strategy_key: Option<String>,
}

impl LotState {
    pub fn new(minimum_next_bid_cents: i64, currency: &str, strategy: Option<&str>) -> Self {
        Self {
            minimum_next_bid_cents,
            currency: currency.to_string(),
            increment_strategy_key: strategy.map(str::to_owned),
        }
    }
}

/// One bidder's private standing on a lot. Absent for anonymous callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BidderStanding {
    /// The bidder's highest authorized maximum, even if outbid
    #[serde(default)]
    pub max_authorized_bid_cents: Option<i64>,
    /// The bidder's current amount, present only while they lead
    #[serde(default)]
    pub leading_bid_cents: Option<i64>,
}

impl BidderStanding {
    /// A bidder who currently holds the highest bid.
    pub fn leading(max_authorized_bid_cents: i64, leading_bid_cents: i64) -> Self {
        Self {
            max_authorized_bid_cents: Some(max_authorized_bid_cents),
            leading_bid_cents: Some(leading_bid_cents),
        }
    }

    /// A bidder whose earlier maximum has been outbid.
    pub fn outbid(max_authorized_bid_cents: i64) -> Self {
        Self {
            max_authorized_bid_cents: Some(max_authorized_bid_cents),
            leading_bid_cents: None,
        }
    }

    pub fn is_leading(&self) -> bool {
        self.leading_bid_cents.is_some()
    }
}

/// Where an increment sequence starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline {
    pub cents: u64,
    /// Whether `cents` itself is the first legal bid
    pub inclusive: bool,
}

impl Baseline {
    pub fn inclusive(cents: u64) -> Self {
        Self {
            cents,
            inclusive: true,
        }
    }

    pub fn exclusive(cents: u64) -> Self {
        Self {
            cents,
            inclusive: false,
        }
    }
}
