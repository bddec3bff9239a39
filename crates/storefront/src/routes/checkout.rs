//! Checkout route handlers.
//!
//! Checkout never leaves the site: placing an order shows a confirmation
//! and clears the session's cart. No payment or order record is involved.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use eternal_roses_core::{CartStore, CheckoutStage, OrderConfirmation, OrderField, OrderForm};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::SessionCart;
use crate::routes::cart::CartItemView;

/// Where the checkout form lives on the storefront page.
pub const CHECKOUT_SECTION: &str = "/#checkout";

/// One shipping field for templates.
#[derive(Clone)]
pub struct FormFieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// Shipping form display data for templates.
#[derive(Clone)]
pub struct CheckoutFormView {
    pub fields: Vec<FormFieldView>,
}

impl From<&OrderForm> for CheckoutFormView {
    fn from(form: &OrderForm) -> Self {
        Self {
            fields: OrderField::ALL
                .into_iter()
                .map(|field| FormFieldView {
                    name: field.as_str(),
                    label: field.label(),
                    value: form.get(field).to_string(),
                })
                .collect(),
        }
    }
}

/// Confirmation display data for templates.
#[derive(Clone)]
pub struct ConfirmationView {
    pub message: String,
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub total: String,
}

impl From<&OrderConfirmation> for ConfirmationView {
    fn from(confirmation: &OrderConfirmation) -> Self {
        Self {
            message: confirmation.message(),
            items: confirmation.lines.iter().map(CartItemView::from).collect(),
            item_count: confirmation.item_count,
            total: confirmation.total.to_string(),
        }
    }
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub confirmation: ConfirmationView,
}

/// Single field update form data.
#[derive(Debug, Deserialize)]
pub struct FieldForm {
    pub field: String,
    #[serde(default)]
    pub value: String,
}

/// Full shipping form data. Omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct OrderFormInput {
    pub recipient_name: Option<String>,
    pub phone: Option<String>,
    pub region: Option<String>,
    pub locality: Option<String>,
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub postal_code: Option<String>,
}

impl OrderFormInput {
    /// Write every submitted field into the store.
    fn apply(self, store: &mut CartStore) {
        let submitted = [
            (OrderField::RecipientName, self.recipient_name),
            (OrderField::Phone, self.phone),
            (OrderField::Region, self.region),
            (OrderField::Locality, self.locality),
            (OrderField::Street, self.street),
            (OrderField::StreetNumber, self.street_number),
            (OrderField::PostalCode, self.postal_code),
        ];
        for (field, value) in submitted {
            if let Some(value) = value {
                store.update_form_field(field, value);
            }
        }
    }
}

/// Open the checkout form for a non-empty cart.
#[instrument(skip(cart))]
pub async fn begin(mut cart: SessionCart) -> Result<Redirect> {
    cart.begin_checkout()?;
    cart.save().await?;

    tracing::info!(item_count = cart.item_count(), "Checkout started");
    add_breadcrumb("checkout", "Checkout started", None);

    Ok(Redirect::to(CHECKOUT_SECTION))
}

/// Overwrite one shipping field.
///
/// Called by the page script as the shopper edits each input. Outside
/// checkout the write is dropped: a late save must not resurrect a store
/// that an order has already cleared.
#[instrument(skip(cart))]
pub async fn update_field(mut cart: SessionCart, Form(form): Form<FieldForm>) -> Result<StatusCode> {
    let field: OrderField = form.field.parse()?;

    if cart.stage() != CheckoutStage::ReviewingCheckout {
        tracing::debug!(%field, "Ignoring field update outside checkout");
        return Ok(StatusCode::NO_CONTENT);
    }

    cart.update_form_field(field, form.value);
    cart.save().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Place the order.
///
/// Submitted fields are stored even when the order is refused, so the form
/// keeps what the shopper typed.
#[instrument(skip(cart, form))]
pub async fn place_order(
    mut cart: SessionCart,
    Form(form): Form<OrderFormInput>,
) -> Result<impl IntoResponse> {
    form.apply(&mut cart);

    let outcome = cart.submit_order();
    cart.save().await?;

    let confirmation = outcome.inspect_err(|e| {
        tracing::info!(reason = %e, "Order refused");
    })?;

    tracing::info!(
        item_count = confirmation.item_count,
        total = %confirmation.total,
        "Order placed"
    );
    add_breadcrumb("checkout", "Order placed", None);

    Ok(ConfirmationTemplate {
        confirmation: ConfirmationView::from(&confirmation),
    })
}
