//! Storefront page route handler.
//!
//! The whole shop is one page: hero, product grid, cart summary, and (once
//! the shopper has asked to finalize the order) the checkout form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use eternal_roses_core::{CheckoutStage, Product};
use tracing::instrument;

use crate::filters;
use crate::middleware::{CspNonce, SessionCart};
use crate::routes::cart::CartView;
use crate::routes::checkout::CheckoutFormView;
use crate::state::AppState;

// =============================================================================
// Hero (static content)
// =============================================================================

/// Hero banner above the product grid.
#[derive(Clone)]
pub struct HeroView {
    pub title: String,
    pub subtitle: String,
    pub video_path: String,
}

impl Default for HeroView {
    fn default() -> Self {
        Self {
            title: "From the heart of nature, into your pot".to_string(),
            subtitle: "Beauty born in our garden".to_string(),
            video_path: "/static/video/rose-video.mp4".to_string(),
        }
    }
}

// =============================================================================
// Product Views
// =============================================================================

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
        }
    }
}

/// Storefront page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub hero: HeroView,
    pub products: Vec<ProductView>,
    pub cart: CartView,
    /// Present only while the shopper is reviewing checkout.
    pub checkout: Option<CheckoutFormView>,
    pub scroll_delay_ms: u32,
    pub nonce: String,
}

/// Display the storefront page.
#[instrument(skip(state, cart, nonce))]
pub async fn home(
    State(state): State<AppState>,
    cart: SessionCart,
    CspNonce(nonce): CspNonce,
) -> impl IntoResponse {
    let checkout = (cart.stage() == CheckoutStage::ReviewingCheckout)
        .then(|| CheckoutFormView::from(cart.form()));

    HomeTemplate {
        hero: HeroView::default(),
        products: state.catalog().products().iter().map(ProductView::from).collect(),
        cart: CartView::from(cart.store()),
        checkout,
        scroll_delay_ms: state.config().scroll_delay_ms,
        nonce,
    }
}
