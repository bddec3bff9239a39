//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded on the span, echoed in the response)
//! 4. CSP nonce (per-request nonce for the inline script)
//! 5. Security headers (CSP built from the nonce, plus the usual hardening)
//! 6. Session layer (tower-sessions with an in-memory store)
//!
//! [`SessionCart`] is an extractor rather than a layer; it reads the session
//! installed by step 6.

pub mod cart;
pub mod csp;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use cart::SessionCart;
pub use csp::{CspNonce, csp_nonce_middleware};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
