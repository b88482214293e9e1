use http::Method;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Inbound request data consumed by one dispatch.
///
/// Carries everything the dispatch engine needs to pick and invoke a
/// handler: the HTTP method, the route parameters produced by the routing
/// layer, query parameters, an optional explicit action name that bypasses
/// verb-based resolution, the raw body bytes, and the declared content type.
///
/// The value is immutable for the duration of a dispatch; construction is
/// builder-style:
///
/// ```
/// use http::Method;
/// use restdispatch::RestRequest;
///
/// let request = RestRequest::new(Method::PUT)
///     .with_route_param("id", 7)
///     .with_content_type("application/json")
///     .with_body(r#"{"name":"updated"}"#);
/// assert_eq!(request.method(), &Method::PUT);
/// ```
#[derive(Debug, Clone)]
pub struct RestRequest {
    method: Method,
    route_params: HashMap<String, Value>,
    query_params: HashMap<String, String>,
    action: Option<String>,
    body: Vec<u8>,
    content_type: Option<String>,
}

impl RestRequest {
    /// Create a request for the given HTTP method.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            route_params: HashMap::new(),
            query_params: HashMap::new(),
            action: None,
            body: Vec::new(),
            content_type: None,
        }
    }

    /// Create a request from a method name.
    ///
    /// Names are case-insensitive and normalized to upper-case, so `"post"`
    /// and `"POST"` are the same method and `"describe"` becomes the
    /// extension method `DESCRIBE`. An invalid method token falls back to
    /// GET with a warning rather than failing construction.
    #[must_use]
    pub fn from_method_name(name: &str) -> Self {
        let normalized = name.to_ascii_uppercase();
        let method = match Method::from_bytes(normalized.as_bytes()) {
            Ok(method) => method,
            Err(_) => {
                warn!(method = %name, "invalid HTTP method token, defaulting to GET");
                Method::GET
            }
        };
        Self::new(method)
    }

    /// Set a route parameter extracted by the routing layer.
    ///
    /// Values are `serde_json::Value` so the routing layer can distinguish
    /// a numeric identifier of `0` (present) from `false` (explicitly
    /// absent, falls back to the query string during identifier lookup).
    #[must_use]
    pub fn with_route_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.route_params.insert(name.into(), value.into());
        self
    }

    /// Set a query string parameter.
    #[must_use]
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    /// Set an explicit action name, bypassing verb-based resolution.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Set the raw request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the declared content type of the body.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get a route parameter by name.
    #[inline]
    #[must_use]
    pub fn route_param(&self, name: &str) -> Option<&Value> {
        self.route_params.get(name)
    }

    /// Get a query parameter by name.
    #[inline]
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn route_params(&self) -> &HashMap<String, Value> {
        &self.route_params
    }

    #[must_use]
    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// The explicit action name, if the routing layer resolved one.
    #[inline]
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    #[inline]
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}
