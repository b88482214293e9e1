//! The built-in REST handler table.
//!
//! One trait method per REST-convention handler. Every method has a default
//! body returning the canonical 405 response, so a concrete controller
//! implements only the verbs it supports and the rest behave exactly like
//! an unsupported method.

use crate::dispatcher::DispatchOutcome;
use crate::request::RestRequest;
use crate::shaper;
use serde_json::Value;

/// A RESTful resource controller.
///
/// The dispatch engine resolves an inbound request to one of these methods
/// and calls it with the argument shape the verb implies: nothing, the
/// resource identifier, the decoded body, or both. Handlers return either
/// structured data for rendering or a full response object; the engine
/// never inspects the value beyond verb-specific shaping.
///
/// ```
/// use restdispatch::{DispatchOutcome, RestController};
/// use serde_json::{json, Value};
///
/// struct Notes {
///     items: Vec<Value>,
/// }
///
/// impl RestController for Notes {
///     fn get_list(&mut self) -> DispatchOutcome {
///         DispatchOutcome::Payload(json!({ "notes": self.items }))
///     }
///
///     fn create(&mut self, data: Value) -> DispatchOutcome {
///         self.items.push(data.clone());
///         DispatchOutcome::Payload(json!({ "note": data }))
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait RestController {
    /// GET without an identifier: return the collection.
    fn get_list(&mut self) -> DispatchOutcome {
        shaper::method_not_allowed()
    }

    /// GET with an identifier: return a single resource.
    fn get(&mut self, identifier: &Value) -> DispatchOutcome {
        shaper::method_not_allowed()
    }

    /// POST: create a resource from the decoded body.
    fn create(&mut self, data: Value) -> DispatchOutcome {
        shaper::method_not_allowed()
    }

    /// PUT with an identifier: replace a single resource.
    fn update(&mut self, identifier: &Value, data: Value) -> DispatchOutcome {
        shaper::method_not_allowed()
    }

    /// PUT without an identifier: replace the whole collection.
    fn replace_list(&mut self, data: Value) -> DispatchOutcome {
        shaper::method_not_allowed()
    }

    /// PATCH with an identifier: partially update a single resource.
    fn patch(&mut self, identifier: &Value, data: Value) -> DispatchOutcome {
        shaper::method_not_allowed()
    }

    /// PATCH without an identifier: partially update the collection.
    fn patch_list(&mut self, data: Value) -> DispatchOutcome {
        shaper::method_not_allowed()
    }

    /// DELETE with an identifier: delete a single resource.
    fn delete(&mut self, identifier: &Value) -> DispatchOutcome {
        shaper::method_not_allowed()
    }

    /// DELETE without an identifier: clear the collection. The returned
    /// value is discarded by response shaping; this handler is
    /// side-effect-only.
    fn delete_list(&mut self) -> DispatchOutcome {
        shaper::method_not_allowed()
    }

    /// HEAD, with or without an identifier. The response body is stripped
    /// by shaping; status and headers survive.
    fn head(&mut self, identifier: Option<&Value>) -> DispatchOutcome {
        shaper::method_not_allowed()
    }

    /// OPTIONS. Shaping sets the `Allow` header from the method registry on
    /// whatever this returns.
    fn options(&mut self) -> DispatchOutcome {
        shaper::method_not_allowed()
    }
}

/// A handler for a custom HTTP method or an explicit action.
///
/// Unlike the built-in verbs, these receive the whole request: the engine
/// does not guess an argument shape for verbs it does not know, so the
/// handler decides what to extract (and may call
/// [`crate::content::decode_body`] itself).
pub type MethodHandler<C> = Box<dyn Fn(&mut C, &RestRequest) -> DispatchOutcome + Send + Sync>;
