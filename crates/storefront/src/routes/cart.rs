//! Cart route handlers.
//!
//! Every mutation loads the shopper's [`CartStore`] from the session, applies
//! one operation, writes it back, and redirects to the cart section of the
//! storefront page (post/redirect/get).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use eternal_roses_core::{CartLine, CartStore, ProductId, Quantity};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::SessionCart;
use crate::state::AppState;

/// Where cart mutations send the browser back to.
pub const CART_SECTION: &str = "/#cart-summary";

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product.id.as_i32(),
            name: line.product.name.clone(),
            image: line.product.image.clone(),
            quantity: line.quantity.get(),
            price: line.product.price.to_string(),
            line_price: CartStore::line_total(line).to_string(),
        }
    }
}

impl From<&CartStore> for CartView {
    fn from(store: &CartStore) -> Self {
        Self {
            items: store.cart().lines().map(CartItemView::from).collect(),
            total: store.cart_total().to_string(),
            item_count: store.item_count(),
        }
    }
}

/// Add to cart form data.
///
/// `quantity` is kept as raw text; it is coerced here rather than rejected.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    #[serde(default)]
    pub quantity: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Floating cart indicator fragment.
///
/// Shares the partial with the storefront page, so it carries the same
/// `cart` view.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub cart: CartView,
}

/// Add item to cart.
///
/// Adding a product already in the cart increases its quantity.
#[instrument(skip(state, cart))]
pub async fn add(
    State(state): State<AppState>,
    mut cart: SessionCart,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = state
        .catalog()
        .get(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;
    let quantity = Quantity::from_input(&form.quantity);

    cart.add_item(product, quantity);
    cart.save().await?;

    tracing::info!(
        product_id = %product.id,
        quantity = quantity.get(),
        item_count = cart.item_count(),
        "Added to cart"
    );
    let product_id = product.id.to_string();
    let quantity = quantity.to_string();
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product_id.as_str()), ("quantity", quantity.as_str())]),
    );

    Ok(Redirect::to(CART_SECTION))
}

/// Set a line's quantity. Zero removes the line.
#[instrument(skip(cart))]
pub async fn update(mut cart: SessionCart, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let quantity = form
        .quantity
        .trim()
        .parse::<u32>()
        .map_err(|_| AppError::BadRequest(format!("invalid quantity: {}", form.quantity)))?
        .min(Quantity::MAX_INPUT);

    if cart.update_quantity(form.product_id, quantity) {
        cart.save().await?;
        tracing::info!(product_id = %form.product_id, quantity, "Cart line updated");
    }

    Ok(Redirect::to(CART_SECTION))
}

/// Remove a product from the cart. Unknown products are ignored.
#[instrument(skip(cart))]
pub async fn remove(
    mut cart: SessionCart,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    if let Some(line) = cart.remove_item(form.product_id) {
        cart.save().await?;
        tracing::info!(
            product_id = %form.product_id,
            removed = line.quantity.get(),
            "Removed from cart"
        );
        let product_id = form.product_id.to_string();
        add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", product_id.as_str())]));
    }

    Ok(Redirect::to(CART_SECTION))
}

/// Get the floating cart indicator (empty when the cart is).
#[instrument(skip(cart))]
pub async fn count(cart: SessionCart) -> impl IntoResponse {
    CartCountTemplate {
        cart: CartView::from(cart.store()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use eternal_roses_core::{Catalog, CurrencyCode};

    use super::*;

    fn store_with(quantities: &[(i32, u32)]) -> CartStore {
        let catalog = Catalog::roses();
        let mut store = CartStore::new(CurrencyCode::USD);
        for &(id, n) in quantities {
            let product = catalog.get(ProductId::new(id)).unwrap();
            store.add_item(product, Quantity::new(n).unwrap());
        }
        store
    }

    #[test]
    fn test_cart_count_hidden_when_empty() {
        let html = CartCountTemplate {
            cart: CartView::from(&store_with(&[])),
        }
        .render()
        .unwrap();
        assert!(!html.contains("cart-indicator"));
    }

    #[test]
    fn test_cart_count_shows_item_total() {
        let html = CartCountTemplate {
            cart: CartView::from(&store_with(&[(1, 2), (3, 4)])),
        }
        .render()
        .unwrap();
        assert!(html.contains(r#"class="cart-indicator""#));
        assert!(html.contains(">6<"));
    }

    #[test]
    fn test_cart_view_prices_lines() {
        let view = CartView::from(&store_with(&[(2, 3)]));
        assert_eq!(view.item_count, 3);
        assert_eq!(view.total, "$54.00");
        assert_eq!(view.items[0].line_price, "$54.00");
        assert_eq!(view.items[0].price, "$18.00");
    }
}
