//! Core types for Eternal Roses.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod quantity;

pub use id::*;
pub use price::{CurrencyCode, Price};
pub use quantity::Quantity;
