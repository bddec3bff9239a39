//! Per-session cart store.
//!
//! A [`CartStore`] owns everything one shopper has touched: the cart, the
//! shipping form, and where they are in the checkout flow.
//!
//! ```text
//!              begin_checkout (cart not empty)
//!   Browsing ─────────────────────────────────▶ ReviewingCheckout
//!      ▲                                                │
//!      └──────────── clear (run by submit_order) ───────┘
//! ```
//!
//! There is no cancel edge out of `ReviewingCheckout`; only a placed order
//! (or an explicit `clear`) returns the shopper to `Browsing`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, CartLine};
use crate::catalog::Product;
use crate::order::{OrderConfirmation, OrderField, OrderForm};
use crate::types::{CurrencyCode, Price, ProductId, Quantity};

/// Where the shopper is in the checkout flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    #[default]
    Browsing,
    ReviewingCheckout,
}

/// Reasons a checkout transition is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("Checkout has not been started")]
    NotInCheckout,
    #[error("Missing required fields: {}", field_labels(.0))]
    MissingFields(Vec<OrderField>),
}

fn field_labels(fields: &[OrderField]) -> String {
    fields
        .iter()
        .map(OrderField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The cart, shipping form, and checkout stage of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartStore {
    cart: Cart,
    form: OrderForm,
    stage: CheckoutStage,
    currency_code: CurrencyCode,
}

impl CartStore {
    /// Create an empty store that totals in `currency_code`.
    #[must_use]
    pub fn new(currency_code: CurrencyCode) -> Self {
        Self {
            currency_code,
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------------
    // Cart operations
    // -------------------------------------------------------------------------

    /// Add `quantity` of `product`; repeated adds accumulate.
    pub fn add_item(&mut self, product: &Product, quantity: Quantity) {
        self.cart.add_item(product, quantity);
    }

    /// Remove a product's line. Absent ids are ignored.
    pub fn remove_item(&mut self, id: ProductId) -> Option<CartLine> {
        self.cart.remove_item(id)
    }

    /// Set a line's quantity; zero removes the line.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) -> bool {
        self.cart.set_quantity(id, quantity)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// `price × quantity` for a single line.
    #[must_use]
    pub fn line_total(line: &CartLine) -> Price {
        line.line_total()
    }

    /// Sum of all line totals.
    ///
    /// Assumes every product was priced in this store's currency, which holds
    /// for products taken from the catalog the store was created for.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.total(self.currency_code)
    }

    /// Empty the cart, reset the form, and return to browsing.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.form.reset();
        self.stage = CheckoutStage::Browsing;
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    pub fn update_form_field(&mut self, field: OrderField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Open the checkout form.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` when there is nothing to check out.
    pub fn begin_checkout(&mut self) -> Result<(), CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.stage = CheckoutStage::ReviewingCheckout;
        Ok(())
    }

    /// Place the order and clear the session's cart and form.
    ///
    /// Nothing is sent anywhere; the confirmation is the only record.
    ///
    /// # Errors
    ///
    /// Returns `NotInCheckout` outside the checkout stage, `EmptyCart` when
    /// the cart was emptied after checkout began, and `MissingFields` when
    /// any shipping field is blank. The store is left untouched on error.
    pub fn submit_order(&mut self) -> Result<OrderConfirmation, CheckoutError> {
        if self.stage != CheckoutStage::ReviewingCheckout {
            return Err(CheckoutError::NotInCheckout);
        }
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let missing = self.form.missing_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields(missing));
        }

        let confirmation = OrderConfirmation {
            recipient_name: self.form.recipient_name.trim().to_string(),
            phone: self.form.phone.trim().to_string(),
            lines: self.cart.lines().cloned().collect(),
            item_count: self.item_count(),
            total: self.cart_total(),
        };
        self.clear();
        Ok(confirmation)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn form(&self) -> &OrderForm {
        &self.form
    }

    #[must_use]
    pub const fn stage(&self) -> CheckoutStage {
        self.stage
    }

    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }
}
