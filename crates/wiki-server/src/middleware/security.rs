//! Response hardening headers.
//!
//! Every response, including 404s and 500s, carries the same fixed set of
//! headers. Page bodies are user text rendered into HTML, so scripts are
//! disabled outright and the only form target allowed is this origin.

use axum::http::HeaderValue;
use axum::http::header::{self, HeaderName};
use tower_http::set_header::SetResponseHeaderLayer;

type HeaderLayer = SetResponseHeaderLayer<HeaderValue>;

/// Content-Security-Policy for wiki pages.
const PAGE_CSP: &str = "default-src 'self'; \
                        script-src 'none'; \
                        style-src 'self' 'unsafe-inline'; \
                        img-src 'self' data:; \
                        form-action 'self'; \
                        frame-ancestors 'none'";

/// Header layer that replaces any value set by a handler.
fn fixed(name: HeaderName, value: &'static str) -> HeaderLayer {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

pub(crate) fn csp() -> HeaderLayer {
    fixed(header::CONTENT_SECURITY_POLICY, PAGE_CSP)
}

pub(crate) fn nosniff() -> HeaderLayer {
    fixed(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
}

pub(crate) fn deny_framing() -> HeaderLayer {
    fixed(header::X_FRAME_OPTIONS, "DENY")
}

/// Page titles appear in URLs; keep them off other origins.
pub(crate) fn same_origin_referrer() -> HeaderLayer {
    fixed(header::REFERRER_POLICY, "same-origin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_csp_blocks_scripts() {
        assert!(PAGE_CSP.contains("script-src 'none'"));
        assert!(PAGE_CSP.contains("form-action 'self'"));
        assert!(PAGE_CSP.contains("frame-ancestors 'none'"));
    }

    #[test]
    fn test_page_csp_is_valid_header_value() {
        assert!(HeaderValue::from_str(PAGE_CSP).is_ok());
    }
}
