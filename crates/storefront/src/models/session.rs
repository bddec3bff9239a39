//! Session-related types.

/// Session keys for per-shopper state.
pub mod keys {
    /// Key for the shopper's cart store (cart lines, shipping form, checkout stage).
    pub const CART_STORE: &str = "cart_store";
}
