//! Custom Askama template filters.

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Renders a quantity with its unit, e.g. `3 pcs`.
///
/// Usage in templates: `{{ item.quantity|pieces }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn pieces(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("{value} pcs"))
}
