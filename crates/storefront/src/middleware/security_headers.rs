//! Security headers middleware.
//!
//! Adds restrictive headers to every response, including static assets.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

use super::CspNonce;

/// Add security headers to all responses.
///
/// Headers applied:
/// - `Content-Security-Policy` - see [`CspNonce::policy`]
/// - `X-Frame-Options: DENY`
/// - `X-Content-Type-Options: nosniff`
/// - `Referrer-Policy: no-referrer`
/// - `Permissions-Policy` - camera, microphone, geolocation, and payment denied
/// - `Cache-Control: no-store, max-age=0` - cart pages are per-session
/// - `Cross-Origin-Opener-Policy: same-origin`
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let policy = request.extensions().get::<CspNonce>().map(CspNonce::policy);

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    match policy.as_deref().map(HeaderValue::from_str) {
        Some(Ok(value)) => {
            headers.insert(CONTENT_SECURITY_POLICY, value);
        }
        _ => {
            // No nonce: forbid inline scripts entirely
            headers.insert(
                CONTENT_SECURITY_POLICY,
                HeaderValue::from_static("default-src 'self'; object-src 'none'; frame-ancestors 'none'"),
            );
        }
    }

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static("camera=(), microphone=(), geolocation=(), payment=()"),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0"));
    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );

    response
}
