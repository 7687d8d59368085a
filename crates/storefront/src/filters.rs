//! Askama filters used by the page layout.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::Datelike;

/// Unhashed stylesheet, used when the build could not fingerprint it.
const PLAIN_STYLESHEET: &str = "/static/css/main.css";

/// Year for the footer copyright line.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(chrono::Utc::now().year())
}

/// Stylesheet URL, fingerprinted with the build-time `CSS_HASH`.
///
/// Usage in templates: `{{ ""|stylesheet_href|safe }}`
#[askama::filter_fn]
pub fn stylesheet_href(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(stylesheet_path(env!("CSS_HASH")))
}

fn stylesheet_path(hash: &str) -> String {
    if hash.is_empty() {
        PLAIN_STYLESHEET.to_owned()
    } else {
        format!("/static/css/derived/main.{hash}.css")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_path_is_fingerprinted() {
        assert_eq!(stylesheet_path("1a2b3c4d"), "/static/css/derived/main.1a2b3c4d.css");
    }

    #[test]
    fn test_stylesheet_path_without_hash_falls_back() {
        assert_eq!(stylesheet_path(""), PLAIN_STYLESHEET);
    }
}
