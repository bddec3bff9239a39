//! Integration tests for Eternal Roses.
//!
//! Tests drive the full storefront router in-process with
//! [`tower::ServiceExt::oneshot`]; no socket is bound and nothing needs to be
//! running first.
//!
//! ```bash
//! cargo test -p eternal-roses-integration-tests
//! ```
//!
//! [`TestShopper`] plays one browser: it remembers the session cookie the
//! storefront hands out and sends it back on every request.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use eternal_roses_storefront::{
    app, config::StorefrontConfig, middleware::session::SESSION_COOKIE_NAME, state::AppState,
};
use tower::ServiceExt;
use tower_sessions::cookie::Cookie;

/// Largest response body the tests will read.
const BODY_LIMIT: usize = 1024 * 1024;

/// A response with its body already collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// One shopper with their own session.
pub struct TestShopper {
    app: Router,
    cookie: Option<String>,
}

impl TestShopper {
    /// A shopper against a storefront with the built-in rose catalog.
    #[must_use]
    pub fn new() -> Self {
        let state = AppState::from_config(StorefrontConfig::default())
            .expect("default config builds state");
        Self::with_app(app(state))
    }

    /// A shopper against an existing router, sharing its session store.
    #[must_use]
    pub const fn with_app(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// The router this shopper talks to.
    #[must_use]
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Whether the storefront has issued this shopper a session.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty()).expect("valid request");
        self.send(request).await
    }

    /// Post an urlencoded form, e.g. `post_form("/cart/add", &[("product_id", "1")])`.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("valid request");
        self.send(request).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.expect("infallible router");

        if let Some(cookie) = session_cookie(response.headers()) {
            self.cookie = Some(cookie);
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("readable body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestShopper {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull `er_session=<id>` out of the response's `Set-Cookie` headers.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| Cookie::parse(v).ok())
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.stripped().to_string())
}
