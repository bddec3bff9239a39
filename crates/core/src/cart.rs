//! Shopping cart lines keyed by product.
//!
//! Lines live in an `IndexMap` keyed by [`ProductId`], so a product can only
//! ever appear once and the order in which products were first added is the
//! display order. Quantities are [`Quantity`] values and therefore never
//! zero; a line that would drop to zero is removed instead.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{CurrencyCode, Price, ProductId, Quantity};

/// One product's presence in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the product at the time it was first added.
    pub product: Product,
    pub quantity: Quantity,
}

impl CartLine {
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Ordered collection of cart lines.
///
/// Serialized as a plain list of lines so session stores never have to deal
/// with integer map keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: IndexMap<ProductId, CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of `product`, merging into an existing line.
    pub fn add_item(&mut self, product: &Product, quantity: Quantity) {
        self.lines
            .entry(product.id)
            .and_modify(|line| line.quantity = line.quantity.saturating_add(quantity))
            .or_insert_with(|| CartLine {
                product: product.clone(),
                quantity,
            });
    }

    /// Remove the line for `id`, returning it if it was present.
    pub fn remove_item(&mut self, id: ProductId) -> Option<CartLine> {
        self.lines.shift_remove(&id)
    }

    /// Set the quantity of an existing line; zero removes it.
    ///
    /// Returns `false` when no line exists for `id`.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> bool {
        match Quantity::new(quantity) {
            Some(quantity) => match self.lines.get_mut(&id) {
                Some(line) => {
                    line.quantity = quantity;
                    true
                }
                None => false,
            },
            None => self.remove_item(id).is_some(),
        }
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.get(&id)
    }

    /// Lines in the order their products were first added.
    pub fn lines(&self) -> impl ExactSizeIterator<Item = &CartLine> {
        self.lines.values()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .values()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity.get()))
    }

    /// Sum of line totals, expressed in `currency_code`.
    ///
    /// Every line must already be priced in `currency_code`; a validated
    /// [`Catalog`](crate::Catalog) only ever hands out such products. A line
    /// in another currency is a caller bug: debug builds panic on it and
    /// release builds leave it out of the total.
    #[must_use]
    pub fn total(&self, currency_code: CurrencyCode) -> Price {
        self.lines
            .values()
            .map(CartLine::line_total)
            .fold(Price::zero(currency_code), |acc, line_total| {
                debug_assert_eq!(
                    line_total.currency_code, currency_code,
                    "cart line priced in a different currency"
                );
                acc.checked_add(line_total).unwrap_or(acc)
            })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            cart.add_item(&line.product, line.quantity);
        }
        cart
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines.into_values().collect()
    }
}
