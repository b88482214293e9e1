//! Typed extraction of dispatch data.
//!
//! Handlers that want a concrete struct instead of a raw
//! [`serde_json::Value`] can merge the request parameters and decoded body
//! into one object and deserialize it in a single step. Conversion failure
//! maps to a 400 response rather than an error escaping the handler.

use crate::request::RestRequest;
use crate::response::Response;
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

/// Deserialize the decoded body, merged with the request's parameters,
/// into `T`.
///
/// Merge order (later wins): query parameters, route parameters, then the
/// decoded body's fields. A non-object body lands under a `"body"` key.
///
/// ```
/// use http::Method;
/// use restdispatch::{typed, RestRequest};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct NewNote {
///     id: u64,
///     title: String,
/// }
///
/// let request = RestRequest::new(Method::POST).with_route_param("id", 7);
/// let note: NewNote = typed::from_decoded(&request, json!({"title": "first"})).unwrap();
/// assert_eq!(note.id, 7);
/// assert_eq!(note.title, "first");
/// ```
pub fn from_decoded<T: DeserializeOwned>(request: &RestRequest, decoded: Value) -> Result<T> {
    let mut merged = Map::new();

    for (name, value) in request.query_params() {
        merged.insert(name.clone(), Value::String(value.clone()));
    }
    for (name, value) in request.route_params() {
        merged.insert(name.clone(), value.clone());
    }
    match decoded {
        Value::Object(fields) => {
            for (name, value) in fields {
                merged.insert(name, value);
            }
        }
        Value::Null => {}
        other => {
            merged.insert("body".to_string(), other);
        }
    }

    Ok(serde_json::from_value(Value::Object(merged))?)
}

/// The 400 response for a failed typed conversion.
#[must_use]
pub fn bad_request(err: &anyhow::Error) -> Response {
    Response::json(
        400,
        json!({"error": "Invalid request data", "message": err.to_string()}),
    )
}
