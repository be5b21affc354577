//! Cents and major-unit conversions.
//!
//! ## Overview
//!
//! Amounts are stored as `u64` counts of a currency's minor unit (cents).
//! A currency's `subunit_to_unit` says how many minor units make a major unit
//! (100 for USD, 1 for JPY). Major-unit values are only ever materialized as
//! [`Decimal`], never as floats.
//!
//! ## Range
//!
//! `u64` holds about 1.8 * 10^19 cents, far past the 32-bit range that
//! observed minimum next bids (billions of cents) already exceed.
//!
//! ## Examples
//!
//! ```
//! use lot_pricing::types::price::{cents_from_major, major_from_cents};
//!
//! let cents = cents_from_major("24000000.00", 100).unwrap();
//! assert_eq!(cents, 2_400_000_000);
//!
//! assert_eq!(major_from_cents(cents, 100, 2), "24000000.00");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::error::{PricingError, Result};

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a signed upstream amount into cents.
///
/// # Errors
///
/// `InvalidInput` naming `what` when the amount is negative.
pub fn non_negative_cents(value: i64, what: &str) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| PricingError::invalid(format!("{what} must not be negative, got {value}")))
}

/// Convert cents to a major-unit Decimal
///
/// # Example
///
/// ```
/// use lot_pricing::types::price::cents_to_major;
/// use rust_decimal::Decimal;
///
/// assert_eq!(cents_to_major(351_000, 100), Decimal::from(3_510));
/// ```
pub fn cents_to_major(cents: u64, subunit_to_unit: u64) -> Decimal {
    Decimal::from(cents) / Decimal::from(subunit_to_unit.max(1))
}

/// Round a fractional cents value to a whole minor unit, half-up
///
/// # Returns
///
/// * `Some(u64)` - The rounded cents
/// * `None` - If the value is negative or out of range
pub fn round_half_up(cents: Decimal) -> Option<u64> {
    if cents.is_sign_negative() && !cents.is_zero() {
        return None;
    }
    cents
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
}

/// Convert a major-unit Decimal to cents
///
/// # Returns
///
/// * `Some(u64)` - The cents, rounded half-up to a whole minor unit
/// * `None` - If value is negative or out of range
pub fn major_to_cents(major: Decimal, subunit_to_unit: u64) -> Option<u64> {
    let scaled = major.checked_mul(Decimal::from(subunit_to_unit.max(1)))?;
    round_half_up(scaled)
}

/// Parse a major-unit decimal string to cents
///
/// # Example
///
/// ```
/// use lot_pricing::types::price::cents_from_major;
///
/// assert_eq!(cents_from_major("3510", 100), Some(351_000));
/// assert_eq!(cents_from_major("12000.00", 100), Some(1_200_000));
/// assert_eq!(cents_from_major("1500", 1), Some(1_500));
/// assert_eq!(cents_from_major("-1", 100), None);
/// ```
pub fn cents_from_major(s: &str, subunit_to_unit: u64) -> Option<u64> {
    let major = Decimal::from_str(s.trim()).ok()?;
    major_to_cents(major, subunit_to_unit)
}

/// Render cents as a plain major-unit string with `decimals` places
///
/// Rounds half-up when `decimals` is coarser than the minor unit.
///
/// # Example
///
/// ```
/// use lot_pricing::types::price::major_from_cents;
///
/// assert_eq!(major_from_cents(200_000, 100, 2), "2000.00");
/// assert_eq!(major_from_cents(351_050, 100, 0), "3511");
/// ```
pub fn major_from_cents(cents: u64, subunit_to_unit: u64, decimals: u32) -> String {
    let rounded = cents_to_major(cents, subunit_to_unit)
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimals as usize, rounded)
}

/// Insert a thousands separator into a plain major-unit string
///
/// # Example
///
/// ```
/// use lot_pricing::types::price::group_thousands;
///
/// assert_eq!(group_thousands("24000000.00", ',', '.'), "24,000,000.00");
/// assert_eq!(group_thousands("999", ',', '.'), "999");
/// assert_eq!(group_thousands("3000.5", ' ', ','), "3 000,5");
/// ```
pub fn group_thousands(plain: &str, separator: char, decimal_mark: char) -> String {
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain, None),
    };

    let digits = int_part.len();
    let mut out = String::with_capacity(plain.len() + digits / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push(decimal_mark);
        out.push_str(frac);
    }
    out
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_cents() {
        assert_eq!(non_negative_cents(0, "hammer price").unwrap(), 0);
        assert_eq!(
            non_negative_cents(2_400_000_000, "hammer price").unwrap(),
            2_400_000_000
        );
        let err = non_negative_cents(-1, "hammer price").unwrap_err();
        assert_eq!(err.to_string(), "invalid input: hammer price must not be negative, got -1");
    }

    #[test]
    fn test_cents_from_major_edge_cases() {
        assert_eq!(cents_from_major("0", 100), Some(0));
        assert_eq!(cents_from_major("0.005", 100), Some(1));
        assert_eq!(cents_from_major("0.004", 100), Some(0));
        assert_eq!(cents_from_major("abc", 100), None);
        assert_eq!(cents_from_major("", 100), None);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(Decimal::new(25, 1)), Some(3));
        assert_eq!(round_half_up(Decimal::new(24, 1)), Some(2));
        assert_eq!(round_half_up(Decimal::new(-5, 1)), None);
        assert_eq!(round_half_up(Decimal::ZERO), Some(0));
    }

    #[test]
    fn test_roundtrip_beyond_32_bits() {
        let values = [0u64, 1, 99, 2_147_483_648, 2_400_000_000, 9_007_199_254_740_993];
        for cents in values {
            let plain = major_from_cents(cents, 100, 2);
            assert_eq!(cents_from_major(&plain, 100), Some(cents), "roundtrip failed for {}", cents);
        }
    }

    #[test]
    fn test_group_thousands_boundaries() {
        assert_eq!(group_thousands("0", ',', '.'), "0");
        assert_eq!(group_thousands("1000", ',', '.'), "1,000");
        assert_eq!(group_thousands("100000", ',', '.'), "100,000");
        assert_eq!(group_thousands("1234567.89", ',', '.'), "1,234,567.89");
    }
}
