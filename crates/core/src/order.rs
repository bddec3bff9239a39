//! Shipping details and order confirmations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartLine;
use crate::types::Price;

/// A field of the shipping form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderField {
    RecipientName,
    Phone,
    Region,
    Locality,
    Street,
    StreetNumber,
    PostalCode,
}

impl OrderField {
    /// Every field, in form order.
    pub const ALL: [Self; 7] = [
        Self::RecipientName,
        Self::Phone,
        Self::Region,
        Self::Locality,
        Self::Street,
        Self::StreetNumber,
        Self::PostalCode,
    ];

    /// Form input name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RecipientName => "recipient_name",
            Self::Phone => "phone",
            Self::Region => "region",
            Self::Locality => "locality",
            Self::Street => "street",
            Self::StreetNumber => "street_number",
            Self::PostalCode => "postal_code",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::RecipientName => "Name",
            Self::Phone => "Phone",
            Self::Region => "County",
            Self::Locality => "City",
            Self::Street => "Street",
            Self::StreetNumber => "Number",
            Self::PostalCode => "Postal code",
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a form field name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown order field: {0}")]
pub struct UnknownOrderField(pub String);

impl FromStr for OrderField {
    type Err = UnknownOrderField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownOrderField(s.to_string()))
    }
}

/// Transient shipping details for the current order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    pub recipient_name: String,
    pub phone: String,
    pub region: String,
    pub locality: String,
    pub street: String,
    pub street_number: String,
    pub postal_code: String,
}

impl OrderForm {
    #[must_use]
    pub fn get(&self, field: OrderField) -> &str {
        match field {
            OrderField::RecipientName => &self.recipient_name,
            OrderField::Phone => &self.phone,
            OrderField::Region => &self.region,
            OrderField::Locality => &self.locality,
            OrderField::Street => &self.street,
            OrderField::StreetNumber => &self.street_number,
            OrderField::PostalCode => &self.postal_code,
        }
    }

    /// Overwrite one field.
    pub fn set(&mut self, field: OrderField, value: impl Into<String>) {
        let slot = match field {
            OrderField::RecipientName => &mut self.recipient_name,
            OrderField::Phone => &mut self.phone,
            OrderField::Region => &mut self.region,
            OrderField::Locality => &mut self.locality,
            OrderField::Street => &mut self.street,
            OrderField::StreetNumber => &mut self.street_number,
            OrderField::PostalCode => &mut self.postal_code,
        };
        *slot = value.into();
    }

    /// Fields that are empty or whitespace only, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<OrderField> {
        OrderField::ALL
            .into_iter()
            .filter(|&field| self.get(field).trim().is_empty())
            .collect()
    }

    /// Whether every field is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        OrderField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// What the shopper sees once an order has been placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub recipient_name: String,
    pub phone: String,
    pub lines: Vec<CartLine>,
    pub item_count: u32,
    pub total: Price,
}

impl OrderConfirmation {
    /// The thank-you notice shown after submission.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Thank you, {}! We will contact you at {} to confirm your order.",
            self.recipient_name, self.phone
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::CurrencyCode;

    #[test]
    fn test_field_names_roundtrip() {
        for field in OrderField::ALL {
            assert_eq!(field.as_str().parse::<OrderField>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = "email".parse::<OrderField>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown order field: email");
    }

    #[test]
    fn test_serde_name_matches_form_name() {
        let json = serde_json::to_string(&OrderField::StreetNumber).unwrap();
        assert_eq!(json, "\"street_number\"");
    }

    #[test]
    fn test_set_and_get() {
        let mut form = OrderForm::default();
        form.set(OrderField::Locality, "Cluj-Napoca");
        assert_eq!(form.get(OrderField::Locality), "Cluj-Napoca");
        assert_eq!(form.locality, "Cluj-Napoca");
        assert!(!form.is_empty());
    }

    #[test]
    fn test_missing_fields_treats_whitespace_as_blank() {
        let mut form = OrderForm::default();
        for field in OrderField::ALL {
            form.set(field, "x");
        }
        form.set(OrderField::Phone, "   ");
        assert_eq!(form.missing_fields(), vec![OrderField::Phone]);
    }

    #[test]
    fn test_reset_empties_every_field() {
        let mut form = OrderForm::default();
        for field in OrderField::ALL {
            form.set(field, "filled");
        }
        form.reset();
        assert!(form.is_empty());
        assert_eq!(form.missing_fields().len(), OrderField::ALL.len());
    }

    #[test]
    fn test_confirmation_message() {
        let confirmation = OrderConfirmation {
            recipient_name: "Ana".to_string(),
            phone: "0722 000 000".to_string(),
            lines: Vec::new(),
            item_count: 0,
            total: Price::zero(CurrencyCode::USD),
        };
        assert_eq!(
            confirmation.message(),
            "Thank you, Ana! We will contact you at 0722 000 000 to confirm your order."
        );
    }
}
