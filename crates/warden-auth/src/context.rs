//! Request-scoped view of the inbound credential transport.

use axum_extra::extract::cookie::CookieJar;
use http::HeaderMap;
use http::header::{COOKIE, HeaderName, HeaderValue};

/// The parts of an inbound request a strategy may read a credential from.
///
/// Built by the HTTP layer from the request headers; tests build it directly.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    headers: HeaderMap,
}

impl RequestContext {
    /// An empty context, as seen for an anonymous request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing header map.
    pub fn from_headers(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// Builder-style header insertion. Invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Builder-style cookie insertion, appended to any existing `Cookie` header.
    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        let pair = format!("{name}={value}");
        let combined = match self.headers.get(COOKIE).and_then(|v| v.to_str().ok()) {
            Some(existing) if !existing.is_empty() => format!("{existing}; {pair}"),
            _ => pair,
        };
        if let Ok(value) = HeaderValue::from_str(&combined) {
            self.headers.insert(COOKIE, value);
        }
        self
    }

    /// Value of a header, if present and valid UTF-8. Blank values count as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Value of a cookie, if present. Blank values count as absent.
    pub fn cookie(&self, name: &str) -> Option<String> {
        CookieJar::from_headers(&self.headers)
            .get(name)
            .map(|c| c.value().trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// The underlying headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
