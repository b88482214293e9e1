use serde_json::Value;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::sync::Arc;

/// Maximum inline headers before heap allocation.
/// Most responses carry well under 16 headers.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage.
///
/// Header names use `Arc<str>` because the same names (Content-Type, Allow,
/// ...) repeat across responses and `Arc::clone()` is an O(1) atomic
/// increment; values are per-response data and stay `String`.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// A full HTTP response object: status code, headers, body bytes.
///
/// Headers are a multi-value collection: [`add_header`](Self::add_header)
/// appends (repeated headers are allowed), [`set_header`](Self::set_header)
/// replaces every existing value for the name. Lookups are case-insensitive
/// per RFC 7230.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code (200, 204, 404, 405, ...)
    pub status: u16,
    /// Response headers, in insertion order
    pub headers: HeaderVec,
    /// Response body
    pub body: Vec<u8>,
}

impl Default for Response {
    fn default() -> Self {
        Self::with_status(200)
    }
}

impl Response {
    /// Create an empty response with the given status code.
    #[must_use]
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            headers: HeaderVec::new(),
            body: Vec::new(),
        }
    }

    /// Create a JSON response: serializes `body` and sets the content type.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut response = Self::with_status(status);
        response.set_header("Content-Type", "application/json");
        response.body = serde_json::to_vec(&body).unwrap_or_default();
        response
    }

    /// Get the first value of a header (case-insensitive).
    #[inline]
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get every value recorded for a header, in insertion order.
    #[must_use]
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Append a header line, preserving any existing values for the name.
    pub fn add_header(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.headers.push((Arc::from(name), value.into()));
        self
    }

    /// Set a header, replacing every existing value for the name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value.into()));
        self
    }

    /// Replace the response body.
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) -> &mut Self {
        self.body = body.into();
        self
    }

    /// The body as text (lossy on invalid UTF-8).
    #[must_use]
    pub fn body_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Parse the body as JSON, if it is JSON.
    #[must_use]
    pub fn json_body(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// Canonical reason phrase for a status code.
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}
