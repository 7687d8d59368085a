//! CSP nonce generation and the site's Content-Security-Policy.
//!
//! Each request gets a fresh nonce. Templates put it on their `<script>`
//! tags and [`content_security_policy`] names it in `script-src`, so only
//! scripts rendered by this server for this response run.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

/// Origin the HTMX script is loaded from.
pub const HTMX_ORIGIN: &str = "https://unpkg.com";

/// Origin of the hero and about-section photography.
const PHOTO_ORIGIN: &str = "https://images.unsplash.com";

/// Origin of the embedded location map.
const MAP_ORIGIN: &str = "https://www.google.com";

/// A CSP nonce value for inline scripts (128-bit, base64url-encoded).
#[derive(Clone, Debug)]
pub struct CspNonce(pub String);

impl CspNonce {
    /// Generate a new random nonce.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Get the nonce value for use in templates.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Build the policy for a response carrying `nonce`.
#[must_use]
pub fn content_security_policy(nonce: &str) -> String {
    format!(
        "default-src 'none'; \
         script-src 'self' 'nonce-{nonce}' {HTMX_ORIGIN}; \
         style-src 'self'; \
         font-src 'self'; \
         img-src 'self' {PHOTO_ORIGIN}; \
         connect-src 'self'; \
         frame-src {MAP_ORIGIN}; \
         object-src 'none'; \
         base-uri 'self'; \
         form-action 'self'; \
         frame-ancestors 'none'"
    )
}

/// Middleware that generates a CSP nonce and stores it in request extensions.
///
/// Must run before `security_headers_middleware` so the nonce is available
/// when the CSP header is built.
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
            tracing::warn!(
                "CSP nonce not found in request extensions - middleware may be misconfigured"
            );
            Self(String::new())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonces_are_unique() {
        assert_ne!(CspNonce::generate().0, CspNonce::generate().0);
    }

    #[test]
    fn test_nonce_is_base64_of_16_bytes() {
        let nonce = CspNonce::generate();
        assert_eq!(URL_SAFE_NO_PAD.decode(nonce.value()).map(|b| b.len()).ok(), Some(16));
    }

    #[test]
    fn test_policy_names_nonce_and_allowed_origins() {
        let policy = content_security_policy("abc123");
        assert!(policy.contains("'nonce-abc123'"));
        assert!(policy.contains(HTMX_ORIGIN));
        assert!(policy.contains("img-src 'self' https://images.unsplash.com"));
        assert!(policy.contains("frame-ancestors 'none'"));
    }
}
