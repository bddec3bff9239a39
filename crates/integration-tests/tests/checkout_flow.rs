//! Integration tests for checkout: opening the form, field edits, refusals,
//! and placing an order.

use axum::http::StatusCode;
use eternal_roses_core::OrderField;
use eternal_roses_integration_tests::TestShopper;

const SHIPPING: [(&str, &str); 7] = [
    ("recipient_name", "Ana Pop"),
    ("phone", "0712 345 678"),
    ("region", "Cluj"),
    ("locality", "Cluj-Napoca"),
    ("street", "Memorandumului"),
    ("street_number", "28"),
    ("postal_code", "400114"),
];

async fn shopper_with_roses() -> TestShopper {
    let mut shopper = TestShopper::new();
    shopper
        .post_form("/cart/add", &[("product_id", "1"), ("quantity", "2")])
        .await;
    shopper
        .post_form("/cart/add", &[("product_id", "3"), ("quantity", "1")])
        .await;
    shopper
}

// =============================================================================
// Begin Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_with_empty_cart_is_refused() {
    let mut shopper = TestShopper::new();
    let resp = shopper.post_form("/checkout", &[]).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.contains("empty"));

    let page = shopper.get("/").await;
    assert!(!page.body.contains(r#"id="checkout""#));
}

#[tokio::test]
async fn test_begin_checkout_shows_form() {
    let mut shopper = shopper_with_roses().await;
    let resp = shopper.post_form("/checkout", &[]).await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/#checkout"));

    let page = shopper.get("/").await;
    assert!(page.body.contains(r#"id="checkout""#));
    for field in OrderField::ALL {
        assert!(
            page.body
                .contains(&format!(r#"data-order-field="{}""#, field.as_str())),
            "missing input for {field}"
        );
    }
    assert!(page.body.contains(r#"data-scroll-delay="200""#));
}

#[tokio::test]
async fn test_begin_checkout_twice_is_harmless() {
    let mut shopper = shopper_with_roses().await;
    shopper.post_form("/checkout", &[]).await;
    let resp = shopper.post_form("/checkout", &[]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
}

// =============================================================================
// Field Updates
// =============================================================================

#[tokio::test]
async fn test_field_update_is_kept_in_form() {
    let mut shopper = shopper_with_roses().await;
    shopper.post_form("/checkout", &[]).await;

    let resp = shopper
        .post_form(
            "/checkout/field",
            &[("field", "locality"), ("value", "Sibiu")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let page = shopper.get("/").await;
    assert!(page.body.contains(r#"value="Sibiu""#));
}

#[tokio::test]
async fn test_unknown_field_is_rejected() {
    let mut shopper = shopper_with_roses().await;
    shopper.post_form("/checkout", &[]).await;

    let resp = shopper
        .post_form("/checkout/field", &[("field", "email"), ("value", "x")])
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Placing Orders
// =============================================================================

#[tokio::test]
async fn test_order_without_checkout_is_refused() {
    let mut shopper = shopper_with_roses().await;
    let resp = shopper.post_form("/checkout/order", &SHIPPING).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    // Cart survives the refusal
    let count = shopper.get("/cart/count").await;
    assert!(count.body.contains(">3<"));
}

#[tokio::test]
async fn test_order_with_blank_fields_lists_them() {
    let mut shopper = shopper_with_roses().await;
    shopper.post_form("/checkout", &[]).await;

    let resp = shopper
        .post_form(
            "/checkout/order",
            &[("recipient_name", "Ana Pop"), ("phone", "   ")],
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.contains("Phone"));
    assert!(resp.body.contains("Postal code"));
    assert!(!resp.body.contains("Name,"));

    // What was typed is kept and the cart is untouched
    let page = shopper.get("/").await;
    assert!(page.body.contains(r#"value="Ana Pop""#));
    assert!(page.body.contains(r#"id="checkout""#));
    assert!(page.body.contains("$62.00"));
}

#[tokio::test]
async fn test_full_order_confirms_and_empties_cart() {
    let mut shopper = shopper_with_roses().await;
    shopper.post_form("/checkout", &[]).await;

    let resp = shopper.post_form("/checkout/order", &SHIPPING).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(
        "Thank you, Ana Pop! We will contact you at 0712 345 678 to confirm your order."
    ));
    assert!(resp.body.contains("3 pcs"));
    // 2 * 20 + 22
    assert!(resp.body.contains("$62.00"));

    let page = shopper.get("/").await;
    assert!(page.body.contains("Your cart is empty."));
    assert!(!page.body.contains(r#"id="checkout""#));
    assert!(!page.body.contains(r#"class="cart-indicator""#));
}

#[tokio::test]
async fn test_order_uses_fields_saved_one_by_one() {
    let mut shopper = shopper_with_roses().await;
    shopper.post_form("/checkout", &[]).await;

    for (field, value) in SHIPPING {
        let resp = shopper
            .post_form("/checkout/field", &[("field", field), ("value", value)])
            .await;
        assert_eq!(resp.status, StatusCode::NO_CONTENT);
    }

    let resp = shopper.post_form("/checkout/order", &[]).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Thank you, Ana Pop!"));
}

#[tokio::test]
async fn test_field_save_after_order_does_not_restore_cart() {
    let mut shopper = shopper_with_roses().await;
    shopper.post_form("/checkout", &[]).await;
    let resp = shopper.post_form("/checkout/order", &SHIPPING).await;
    assert_eq!(resp.status, StatusCode::OK);

    // A field save that lands after the order was placed
    let late = shopper
        .post_form("/checkout/field", &[("field", "street"), ("value", "Late Street")])
        .await;
    assert_eq!(late.status, StatusCode::NO_CONTENT);

    let page = shopper.get("/").await;
    assert!(page.body.contains("Your cart is empty."));
    assert!(!page.body.contains(r#"id="checkout""#));

    // Nor does it leak into the next checkout
    shopper.post_form("/cart/add", &[("product_id", "2")]).await;
    shopper.post_form("/checkout", &[]).await;
    let page = shopper.get("/").await;
    assert!(!page.body.contains("Late Street"));
}

#[tokio::test]
async fn test_field_save_before_checkout_is_ignored() {
    let mut shopper = shopper_with_roses().await;
    let resp = shopper
        .post_form("/checkout/field", &[("field", "locality"), ("value", "Sibiu")])
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    shopper.post_form("/checkout", &[]).await;
    let page = shopper.get("/").await;
    assert!(!page.body.contains(r#"value="Sibiu""#));
}

#[tokio::test]
async fn test_order_form_waits_for_field_saves() {
    let mut shopper = shopper_with_roses().await;
    shopper.post_form("/checkout", &[]).await;

    let page = shopper.get("/").await;
    assert!(page.body.contains("data-order-form"));
    assert!(page.body.contains("Promise.all"));
}

#[tokio::test]
async fn test_second_order_needs_a_new_checkout() {
    let mut shopper = shopper_with_roses().await;
    shopper.post_form("/checkout", &[]).await;
    shopper.post_form("/checkout/order", &SHIPPING).await;

    shopper.post_form("/cart/add", &[("product_id", "2")]).await;
    let resp = shopper.post_form("/checkout/order", &SHIPPING).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}
