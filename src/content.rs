//! Body decoding and content-type classification.
//!
//! Decoding is total: malformed JSON degrades to an empty object instead of
//! failing the dispatch, so handlers see "no input" rather than an error
//! when a client sends an unknown content shape.

use serde_json::{Map, Value};
use tracing::debug;

/// JSON media types recognized by default.
pub const DEFAULT_JSON_CONTENT_TYPES: &[&str] = &["application/hal+json", "application/json"];

/// Whether a content-type header value names one of `candidates`.
///
/// Matching is case-insensitive, ignores a trailing parameter section
/// (`; charset=utf-8`) and surrounding whitespace. `application/json` and
/// `application/json; charset=utf-8` match `application/json`; `text/json`
/// does not.
#[must_use]
pub fn content_type_matches(content_type: &str, candidates: &[impl AsRef<str>]) -> bool {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    if essence.is_empty() {
        return false;
    }
    candidates
        .iter()
        .any(|candidate| essence.eq_ignore_ascii_case(candidate.as_ref().trim()))
}

/// Whether the request body should be parsed as JSON.
#[must_use]
pub fn is_json(content_type: Option<&str>, json_types: &[impl AsRef<str>]) -> bool {
    content_type.is_some_and(|ct| content_type_matches(ct, json_types))
}

/// Decode a request body according to its declared content type.
///
/// JSON media types (per `json_types`) parse as JSON; everything else is
/// treated as a URL-encoded form.
#[must_use]
pub fn decode_body(content_type: Option<&str>, json_types: &[impl AsRef<str>], body: &[u8]) -> Value {
    if is_json(content_type, json_types) {
        decode_json(body)
    } else {
        decode_form(body)
    }
}

/// Parse a JSON body.
///
/// A parse failure yields an empty object, never an error: absent or
/// malformed JSON is indistinguishable from empty input downstream.
#[must_use]
pub fn decode_json(body: &[u8]) -> Value {
    match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "body is not valid JSON, decoding as empty");
            Value::Object(Map::new())
        }
    }
}

/// Parse a URL-encoded form body into an object of string values.
#[must_use]
pub fn decode_form(body: &[u8]) -> Value {
    let map: Map<String, Value> = url::form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect();
    Value::Object(map)
}
