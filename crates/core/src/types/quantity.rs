//! Positive line quantities.

use std::fmt;
use std::num::{IntErrorKind, NonZeroU32};

use serde::{Deserialize, Serialize};

/// A cart line quantity, always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Largest quantity accepted from a single form submission.
    pub const MAX_INPUT: u32 = 999;

    /// Create a quantity, or `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Coerce raw shopper input into a usable quantity.
    ///
    /// Blank, non-numeric, zero, and negative input become one; anything
    /// above [`Self::MAX_INPUT`] is clamped down to it, including numbers
    /// too long to fit any integer type.
    #[must_use]
    pub fn from_input(raw: &str) -> Self {
        let value = match raw.trim().parse::<i64>() {
            Ok(value) => value,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::from(Self::MAX_INPUT),
            Err(_) => return Self::ONE,
        };
        let clamped = value.clamp(1, i64::from(Self::MAX_INPUT));
        u32::try_from(clamped)
            .ok()
            .and_then(Self::new)
            .unwrap_or(Self::ONE)
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add two quantities, stopping at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0.get()))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero() {
        assert!(Quantity::new(0).is_none());
        assert_eq!(Quantity::new(4).unwrap().get(), 4);
    }

    #[test]
    fn test_from_input_coerces_garbage_to_one() {
        for raw in ["", "   ", "abc", "0", "-4", "1.5"] {
            assert_eq!(Quantity::from_input(raw), Quantity::ONE, "input {raw:?}");
        }
    }

    #[test]
    fn test_from_input_keeps_valid_values() {
        assert_eq!(Quantity::from_input(" 3 ").get(), 3);
        assert_eq!(Quantity::from_input("999").get(), 999);
    }

    #[test]
    fn test_from_input_clamps_large_values() {
        assert_eq!(Quantity::from_input("5000").get(), Quantity::MAX_INPUT);
        assert_eq!(
            Quantity::from_input("99999999999999999999").get(),
            Quantity::MAX_INPUT
        );
        assert_eq!(Quantity::from_input("-99999999999999999999"), Quantity::ONE);
    }

    #[test]
    fn test_saturating_add() {
        let max = Quantity::new(u32::MAX).unwrap();
        assert_eq!(max.saturating_add(Quantity::ONE), max);
        assert_eq!(
            Quantity::new(2).unwrap().saturating_add(Quantity::new(3).unwrap()),
            Quantity::new(5).unwrap()
        );
    }

    #[test]
    fn test_rejects_zero_on_deserialize() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("2").unwrap().get(), 2);
    }
}
