//! Storefront models.
//!
//! Domain types live in `eternal_roses_core`; this module only holds what
//! is specific to keeping them in a web session.

pub mod session;

pub use session::keys as session_keys;
