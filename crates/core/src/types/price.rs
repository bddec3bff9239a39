//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are `rust_decimal::Decimal` so that line totals and cart totals
//! never drift at the cent level the way binary floats do.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Quantity;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(cents, 2), currency_code)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Multiply by a line quantity, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self::new(
            self.amount.saturating_mul(Decimal::from(quantity.get())),
            self.currency_code,
        )
    }

    /// Add another amount of the same currency.
    ///
    /// Returns `None` when the currencies differ; there is no conversion.
    /// The sum saturates instead of overflowing.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        (self.currency_code == other.currency_code).then(|| {
            Self::new(self.amount.saturating_add(other.amount), self.currency_code)
        })
    }
}

impl fmt::Display for Price {
    /// Format for display (e.g., "$19.99").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    RON,
}

impl CurrencyCode {
    /// Display symbol used in front of amounts.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::RON => "lei ",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Price {
        Price::from_cents(cents, CurrencyCode::USD)
    }

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(usd(2000).to_string(), "$20.00");
        assert_eq!(usd(1999).to_string(), "$19.99");
        assert_eq!(Price::zero(CurrencyCode::EUR).to_string(), "€0.00");
    }

    #[test]
    fn test_times_multiplies_exactly() {
        let price = usd(10);
        let total = price.times(Quantity::new(3).unwrap());
        assert_eq!(total, usd(30));
    }

    #[test]
    fn test_decimal_sum_does_not_drift() {
        // 0.1 + 0.2 in binary floating point is 0.30000000000000004
        let sum = usd(10).checked_add(usd(20)).unwrap();
        assert_eq!(sum, usd(30));
    }

    #[test]
    fn test_checked_add_rejects_mixed_currency() {
        let eur = Price::from_cents(100, CurrencyCode::EUR);
        assert!(usd(100).checked_add(eur).is_none());
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let huge = Price::new(Decimal::MAX, CurrencyCode::USD);
        let total = huge.times(Quantity::new(999).unwrap());
        assert_eq!(total.amount, Decimal::MAX);
        assert_eq!(total.checked_add(huge).unwrap().amount, Decimal::MAX);
    }

    #[test]
    fn test_is_negative() {
        assert!(usd(-1).is_negative());
        assert!(!usd(0).is_negative());
        assert!(!usd(1).is_negative());
    }

    #[test]
    fn test_deserializes_amount_from_string() {
        let price: Price = serde_json::from_str(r#"{"amount":"18.50"}"#).unwrap();
        assert_eq!(price, usd(1850));
    }
}
