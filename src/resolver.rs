//! Verb resolution: picks the handler for a request.
//!
//! Resolution order: an explicit action name wins outright, then a custom
//! verb registered on the dispatcher (custom entries override the built-in
//! table), then the REST convention table, and anything left over is
//! method-not-allowed.

use crate::request::RestRequest;
use http::Method;
use serde_json::Value;

/// The handler a dispatch resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    GetList,
    Get,
    Create,
    Update,
    ReplaceList,
    Patch,
    PatchList,
    Delete,
    DeleteList,
    Head,
    Options,
    /// A custom HTTP method registered on the dispatcher (upper-cased name).
    Custom(String),
    /// An explicit action (normalized name), bypassing REST convention.
    Action(String),
}

impl Verb {
    /// Handler name, for logging.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Verb::GetList => "get_list",
            Verb::Get => "get",
            Verb::Create => "create",
            Verb::Update => "update",
            Verb::ReplaceList => "replace_list",
            Verb::Patch => "patch",
            Verb::PatchList => "patch_list",
            Verb::Delete => "delete",
            Verb::DeleteList => "delete_list",
            Verb::Head => "head",
            Verb::Options => "options",
            Verb::Custom(name) | Verb::Action(name) => name,
        }
    }
}

/// The argument shape a resolved handler is called with.
///
/// Resolved once here and consumed uniformly by the invoker, so call sites
/// never vary their arity ad hoc. Custom verbs and explicit actions receive
/// the whole request instead and carry [`ArgShape::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgShape {
    None,
    Identifier,
    Data,
    IdentifierAndData,
}

/// A resolved handler plus the argument shape it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAction {
    pub verb: Verb,
    pub args: ArgShape,
}

/// Outcome of verb resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedAction),
    /// No mapping for the method: a 405 outcome, not a handler.
    NotAllowed,
}

/// Resolve a request to a handler.
///
/// `has_custom` answers whether a custom handler is registered for a method
/// name; custom entries are consulted before the built-in table so a custom
/// registration can override a built-in verb.
pub fn resolve<F>(
    method: &Method,
    explicit_action: Option<&str>,
    identifier_present: bool,
    has_custom: F,
) -> Resolution
where
    F: Fn(&str) -> bool,
{
    if let Some(action) = explicit_action.filter(|a| !a.is_empty()) {
        return Resolution::Resolved(ResolvedAction {
            verb: Verb::Action(normalize_action(action)),
            args: ArgShape::None,
        });
    }

    if has_custom(method.as_str()) {
        return Resolution::Resolved(ResolvedAction {
            verb: Verb::Custom(method.as_str().to_string()),
            args: ArgShape::None,
        });
    }

    let (verb, args) = match *method {
        Method::GET => {
            if identifier_present {
                (Verb::Get, ArgShape::Identifier)
            } else {
                (Verb::GetList, ArgShape::None)
            }
        }
        // The body is the canonical source of the new entity; a route
        // identifier, if any, is ignored for POST.
        Method::POST => (Verb::Create, ArgShape::Data),
        Method::PUT => {
            if identifier_present {
                (Verb::Update, ArgShape::IdentifierAndData)
            } else {
                (Verb::ReplaceList, ArgShape::Data)
            }
        }
        Method::PATCH => {
            if identifier_present {
                (Verb::Patch, ArgShape::IdentifierAndData)
            } else {
                (Verb::PatchList, ArgShape::Data)
            }
        }
        Method::DELETE => {
            if identifier_present {
                (Verb::Delete, ArgShape::Identifier)
            } else {
                (Verb::DeleteList, ArgShape::None)
            }
        }
        Method::HEAD => {
            if identifier_present {
                (Verb::Head, ArgShape::Identifier)
            } else {
                (Verb::Head, ArgShape::None)
            }
        }
        Method::OPTIONS => (Verb::Options, ArgShape::None),
        _ => return Resolution::NotAllowed,
    };

    Resolution::Resolved(ResolvedAction { verb, args })
}

/// Normalize a raw action name to its lower-camel handler key.
///
/// Words are split on `.`, `-` and `_`, title-cased, and joined; the first
/// character of the result is lower-cased:
///
/// ```
/// use restdispatch::resolver::normalize_action;
///
/// assert_eq!(
///     normalize_action("test.some-strangely_separated.words"),
///     "testSomeStrangelySeparatedWords"
/// );
/// ```
#[must_use]
pub fn normalize_action(action: &str) -> String {
    let mut out = String::with_capacity(action.len());
    for word in action.split(['.', '-', '_']).filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) if out.is_empty() => out.extend(first.to_lowercase()),
            Some(first) => out.extend(first.to_uppercase()),
            None => {}
        }
        out.push_str(chars.as_str());
    }
    out
}

/// Extract the resource identifier from a request.
///
/// Route parameters are consulted first under `identifier_name`; a missing
/// entry, `null`, or an explicit `false` falls back to the query string.
/// A value of `0` counts as present.
pub fn extract_identifier(request: &RestRequest, identifier_name: &str) -> Option<Value> {
    match request.route_param(identifier_name) {
        None | Some(Value::Bool(false)) | Some(Value::Null) => {}
        Some(value) => return Some(value.clone()),
    }
    request
        .query_param(identifier_name)
        .map(|v| Value::String(v.to_owned()))
}
