//! Content Security Policy nonce.
//!
//! The storefront page carries one inline script (the checkout scroll hint
//! and field autosave). It is allowed by a per-request nonce instead of
//! `'unsafe-inline'`.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::URL_SAFE};
use rand::RngCore;

/// A per-request nonce for inline scripts (128-bit, URL-safe base64 so it
/// survives HTML attribute escaping untouched).
#[derive(Clone, Debug)]
pub struct CspNonce(pub String);

impl CspNonce {
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut bytes);
        Self(URL_SAFE.encode(bytes))
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// The full policy for a response rendered with this nonce.
    ///
    /// ```text
    /// default-src 'none';
    /// script-src 'self' 'nonce-<nonce>';
    /// style-src 'self';
    /// img-src 'self';
    /// media-src 'self';
    /// connect-src 'self';
    /// form-action 'self';
    /// base-uri 'self';
    /// frame-ancestors 'none';
    /// object-src 'none'
    /// ```
    #[must_use]
    pub fn policy(&self) -> String {
        format!(
            "default-src 'none'; \
             script-src 'self' 'nonce-{}'; \
             style-src 'self'; \
             img-src 'self'; \
             media-src 'self'; \
             connect-src 'self'; \
             form-action 'self'; \
             base-uri 'self'; \
             frame-ancestors 'none'; \
             object-src 'none'",
            self.0
        )
    }
}

/// Generate a nonce and store it in request extensions.
///
/// Must wrap `security_headers_middleware` so the nonce exists when the CSP
/// header is built.
pub async fn csp_nonce_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(CspNonce::generate());
    next.run(request).await
}

impl<S> FromRequestParts<S> for CspNonce
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned().unwrap_or_else(|| {
            tracing::warn!("CSP nonce missing from request extensions");
            Self(String::new())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonces_are_unique() {
        let a = CspNonce::generate();
        let b = CspNonce::generate();
        assert_ne!(a.value(), b.value());
        // 16 bytes base64-encoded with padding
        assert_eq!(a.value().len(), 24);
    }

    #[test]
    fn test_policy_embeds_nonce() {
        let nonce = CspNonce("abc123".to_string());
        let policy = nonce.policy();
        assert!(policy.contains("script-src 'self' 'nonce-abc123'"));
        assert!(policy.contains("default-src 'none'"));
        assert!(!policy.contains("unsafe-inline"));
    }
}
