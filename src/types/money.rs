//! Money values and currency display metadata.
//!
//! How a currency is displayed (symbol, position, decimal places,
//! separators) is data owned by a currency-metadata collaborator, modelled
//! here by [`CurrencyMetadata`]. [`CurrencyBook`] is the in-process
//! implementation, seeded with the marketplace's built-in table and
//! overridable from configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::{cents_from_major, cents_to_major, group_thousands, major_from_cents};
use crate::error::{PricingError, Result};

/// Placeholder for the formatted number in an amount template.
pub const VALUE_PLACEHOLDER: &str = "%v";

/// Placeholder for the currency symbol in an amount template.
pub const SYMBOL_PLACEHOLDER: &str = "%s";

fn default_subunit_to_unit() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

fn default_thousands_separator() -> char {
    ','
}

fn default_decimal_mark() -> char {
    '.'
}

/// Display metadata for one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 code, upper case
    pub code: String,
    pub symbol: String,
    /// Minor units per major unit
    #[serde(default = "default_subunit_to_unit")]
    pub subunit_to_unit: u64,
    /// Decimal places shown by `display`
    #[serde(default)]
    pub display_decimals: u32,
    #[serde(default = "default_true")]
    pub symbol_first: bool,
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
    #[serde(default = "default_decimal_mark")]
    pub decimal_mark: char,
}

impl Currency {
    pub fn new(code: &str, symbol: &str, subunit_to_unit: u64, display_decimals: u32) -> Self {
        Self {
            code: code.to_ascii_uppercase(),
            symbol: symbol.to_string(),
            subunit_to_unit,
            display_decimals,
            symbol_first: true,
            thousands_separator: ',',
            decimal_mark: '.',
        }
    }

    /// Put the symbol after the number, separated by a space.
    pub fn symbol_after(mut self) -> Self {
        self.symbol_first = false;
        self
    }

    pub fn with_separators(mut self, thousands: char, decimal_mark: char) -> Self {
        self.thousands_separator = thousands;
        self.decimal_mark = decimal_mark;
        self
    }

    /// The currency's standard display template.
    pub fn default_template(&self) -> &'static str {
        if self.symbol_first {
            "%s%v"
        } else {
            "%v %s"
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.code.is_empty() {
            return Err(PricingError::invalid("currency code must not be empty"));
        }
        if self.subunit_to_unit == 0 {
            return Err(PricingError::invalid(format!(
                "currency {} must have a positive subunit_to_unit",
                self.code
            )));
        }
        Ok(())
    }

    /// Format a cents value as a grouped major-unit number, without symbol.
    fn format_number(&self, cents: u64) -> String {
        let plain = major_from_cents(cents, self.subunit_to_unit, self.display_decimals);
        group_thousands(&plain, self.thousands_separator, self.decimal_mark)
    }
}

/// Source of currency display metadata, keyed by currency code.
pub trait CurrencyMetadata {
    fn currency(&self, code: &str) -> Option<Arc<Currency>>;

    /// Like [`CurrencyMetadata::currency`], but absence is an error.
    fn require(&self, code: &str) -> Result<Arc<Currency>> {
        self.currency(code)
            .ok_or_else(|| PricingError::UnknownCurrency(code.to_string()))
    }
}

/// In-process currency table.
#[derive(Debug, Clone, Default)]
pub struct CurrencyBook {
    currencies: BTreeMap<String, Arc<Currency>>,
}

impl CurrencyBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in marketplace table.
    ///
    /// Auction catalogues show whole units for most currencies; USD is the
    /// exception, displayed with cents.
    pub fn with_defaults() -> Self {
        let mut book = Self::new();
        for currency in [
            Currency::new("USD", "$", 100, 2),
            Currency::new("EUR", "€", 100, 0),
            Currency::new("GBP", "£", 100, 0),
            Currency::new("HKD", "HK$", 100, 0),
            Currency::new("JPY", "¥", 1, 0),
            Currency::new("SEK", "kr", 100, 0)
                .symbol_after()
                .with_separators(' ', ','),
        ] {
            book.currencies
                .insert(currency.code.clone(), Arc::new(currency));
        }
        book
    }

    /// Register or replace a currency.
    pub fn insert(&mut self, currency: Currency) -> Result<()> {
        currency.validate()?;
        let mut currency = currency;
        currency.code = currency.code.to_ascii_uppercase();
        self.currencies
            .insert(currency.code.clone(), Arc::new(currency));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

impl CurrencyMetadata for CurrencyBook {
    fn currency(&self, code: &str) -> Option<Arc<Currency>> {
        self.currencies.get(&code.to_ascii_uppercase()).cloned()
    }
}

/// An immutable amount of minor units in one currency.
///
/// ## Example
///
/// ```
/// use lot_pricing::types::{CurrencyBook, CurrencyMetadata, Money};
///
/// let eur = CurrencyBook::with_defaults().require("EUR").unwrap();
/// let money = Money::new(300_000, eur);
///
/// assert_eq!(money.cents(), 300_000);
/// assert_eq!(money.display(), "€3,000");
/// assert_eq!(money.amount(Some("%v EUROS!")), "3,000 EUROS!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    cents: u64,
    currency: Arc<Currency>,
}

impl Money {
    pub fn new(cents: u64, currency: Arc<Currency>) -> Self {
        Self { cents, currency }
    }

    /// Parse a major-unit string (e.g. `"3510.00"`) into money.
    pub fn from_major_str(s: &str, currency: Arc<Currency>) -> Result<Self> {
        let cents = cents_from_major(s, currency.subunit_to_unit)
            .ok_or_else(|| PricingError::invalid(format!("cannot parse amount `{s}`")))?;
        Ok(Self::new(cents, currency))
    }

    /// Exact minor-unit value.
    #[inline]
    pub fn cents(&self) -> u64 {
        self.cents
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn currency_code(&self) -> &str {
        &self.currency.code
    }

    /// Exact value in major units.
    pub fn major(&self) -> Decimal {
        cents_to_major(self.cents, self.currency.subunit_to_unit)
    }

    /// Major-unit number with thousands separators, substituted into
    /// `format` (`%v` = number, `%s` = symbol) or the currency's default
    /// template.
    pub fn amount(&self, format: Option<&str>) -> String {
        let template = format.unwrap_or_else(|| self.currency.default_template());
        template
            .replace(VALUE_PLACEHOLDER, &self.currency.format_number(self.cents))
            .replace(SYMBOL_PLACEHOLDER, &self.currency.symbol)
    }

    /// Symbol-decorated string in the currency's display precision.
    pub fn display(&self) -> String {
        self.amount(None)
    }

    /// Sum of two amounts in the same currency.
    pub fn checked_add(&self, other: &Money) -> Result<Money> {
        if self.currency.code != other.currency.code {
            return Err(PricingError::invalid(format!(
                "cannot add {} to {}",
                other.currency.code, self.currency.code
            )));
        }
        let cents = self
            .cents
            .checked_add(other.cents)
            .ok_or_else(|| PricingError::overflow("money sum"))?;
        Ok(Money::new(cents, Arc::clone(&self.currency)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
