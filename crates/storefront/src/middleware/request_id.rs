//! Request ID middleware for request tracing and correlation.
//!
//! Reuses an upstream `x-request-id` when it looks sane, otherwise generates
//! a UUID v4. The ID is recorded on the request span, tagged in Sentry, and
//! echoed back in the response headers.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream request ID we are willing to propagate.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Middleware that ensures every request has a unique request ID.
///
/// Must run inside the `TraceLayer` span, which declares an empty
/// `request_id` field for this middleware to fill.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(upstream_request_id)
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    Span::current().record("request_id", request_id.as_str());

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Accept an upstream ID only if it is short, non-empty, visible ASCII.
fn upstream_request_id(value: &str) -> Option<&str> {
    let value = value.trim();
    let valid = !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|b| b.is_ascii_graphic());
    valid.then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_proxy_ids() {
        assert_eq!(upstream_request_id("abc-123"), Some("abc-123"));
        assert_eq!(upstream_request_id("  abc  "), Some("abc"));
    }

    #[test]
    fn test_rejects_empty_and_oversized_ids() {
        assert_eq!(upstream_request_id(""), None);
        assert_eq!(upstream_request_id("   "), None);
        assert_eq!(upstream_request_id(&"x".repeat(MAX_REQUEST_ID_LEN + 1)), None);
    }

    #[test]
    fn test_rejects_inner_whitespace() {
        assert_eq!(upstream_request_id("two words"), None);
    }
}
