//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Storefront page (hero, products, cart, checkout)
//! GET  /health                 - Health check
//!
//! # Cart (post/redirect/get back to /#cart-summary)
//! POST /cart/add               - Add to cart
//! POST /cart/update            - Set line quantity (0 removes)
//! POST /cart/remove            - Remove line
//! GET  /cart/count             - Floating cart indicator (fragment)
//!
//! # Checkout
//! POST /checkout               - Open the checkout form (redirects to /#checkout)
//! POST /checkout/field         - Store one shipping field (204)
//! POST /checkout/order         - Place the order (confirmation page)
//! ```

pub mod cart;
pub mod checkout;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout::begin))
        .route("/checkout/field", post(checkout::update_field))
        .route("/checkout/order", post(checkout::place_order))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .merge(checkout_routes())
}
