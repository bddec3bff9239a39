//! Eternal Roses Core - Cart store and catalog types.
//!
//! This crate is shared by:
//! - `storefront` - Public-facing site that renders the catalog and checkout
//! - `integration-tests` - End-to-end flows over the storefront router
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions. A
//! [`CartStore`] is a plain value; callers load it, mutate it, and persist it
//! wherever they keep per-session state.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, and quantities
//! - [`catalog`] - Immutable product records and catalog validation
//! - [`cart`] - Cart lines keyed by product
//! - [`order`] - Shipping form fields and order confirmations
//! - [`store`] - The per-session cart store and checkout state machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod store;
pub mod types;

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, CatalogError, Product};
pub use order::{OrderConfirmation, OrderField, OrderForm, UnknownOrderField};
pub use store::{CartStore, CheckoutError, CheckoutStage};
pub use types::*;
