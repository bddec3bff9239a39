//! Product catalog.
//!
//! Products are defined once at startup and never mutated afterwards. The
//! catalog enforces the invariants the cart relies on: unique ids,
//! non-negative prices no larger than [`MAX_UNIT_PRICE`], and a single
//! currency for every product.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CurrencyCode, Price, ProductId};

/// Highest unit price a catalog accepts, in the currency's standard unit.
///
/// Keeps `price × u32::MAX` summed over many lines well inside `Decimal`.
pub const MAX_UNIT_PRICE: i64 = 1_000_000;

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("Product {0} has a negative price")]
    NegativePrice(ProductId),
    #[error("Product {0} is priced above {max}", max = MAX_UNIT_PRICE)]
    PriceTooLarge(ProductId),
    #[error("Product {id} is priced in {found:?}, catalog uses {expected:?}")]
    MixedCurrency {
        id: ProductId,
        expected: CurrencyCode,
        found: CurrencyCode,
    },
    #[error("Catalog has no products")]
    Empty,
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// An immutable catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Path of the display image, relative to the static asset root.
    pub image: String,
}

/// The validated product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    currency_code: CurrencyCode,
}

impl Catalog {
    /// Validate and build a catalog, preserving listing order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for an empty list, duplicate ids, negative or
    /// oversized prices, or products priced in different currencies.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let currency_code = products
            .first()
            .map(|p| p.price.currency_code)
            .ok_or(CatalogError::Empty)?;

        let max_price = Decimal::from(MAX_UNIT_PRICE);
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.price.is_negative() {
                return Err(CatalogError::NegativePrice(product.id));
            }
            if product.price.amount > max_price {
                return Err(CatalogError::PriceTooLarge(product.id));
            }
            if product.price.currency_code != currency_code {
                return Err(CatalogError::MixedCurrency {
                    id: product.id,
                    expected: currency_code,
                    found: product.price.currency_code,
                });
            }
        }

        Ok(Self {
            products,
            currency_code,
        })
    }

    /// Parse a JSON array of products and validate it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` for malformed input, or any validation
    /// error from [`Catalog::new`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// The rose bouquets the shop launched with.
    #[must_use]
    pub fn roses() -> Self {
        let bouquet = |id, name: &str, dollars: i64, image: &str| Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::from_cents(dollars * 100, CurrencyCode::USD),
            image: image.to_string(),
        };

        Self {
            products: vec![
                bouquet(1, "Red Roses Bouquet", 20, "/static/images/rose1.jpg"),
                bouquet(2, "Pink Roses Bouquet", 18, "/static/images/rose2.jpg"),
                bouquet(3, "White Roses Bouquet", 22, "/static/images/rose3.jpg"),
            ],
            currency_code: CurrencyCode::USD,
        }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products in listing order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Currency shared by every product.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
