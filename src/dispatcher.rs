//! Dispatch orchestration: resolve → decode → invoke → shape, bracketed by
//! the pre/post hook pipeline.
//!
//! A dispatch is synchronous and total: every recognized input combination
//! produces a [`DispatchOutcome`], never an error. Unsupported methods and
//! unimplemented built-ins yield the canonical 405 response, an unknown
//! explicit action yields 404, and a malformed body decodes as empty input.

use crate::content;
use crate::controller::{MethodHandler, RestController};
use crate::hooks::{self, HookPhase, HookSet, SharedHooks};
use crate::request::RestRequest;
use crate::resolver::{self, ArgShape, Resolution, ResolvedAction, Verb};
use crate::response::Response;
use crate::shaper;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// HTTP methods always announced in the `Allow` header. TRACE is announced
/// but has no built-in handler; OPTIONS itself is not listed.
const BUILTIN_ALLOW: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "TRACE"];

/// The normalized result of one dispatch.
///
/// Either structured data for downstream rendering, or a full response
/// object when the handler (or shaping) already decided status, headers
/// and body. Consumers must support both.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// A structured value (mapping/sequence) for template rendering.
    Payload(Value),
    /// A complete response object.
    Response(Response),
}

impl DispatchOutcome {
    #[inline]
    #[must_use]
    pub fn is_response(&self) -> bool {
        matches!(self, DispatchOutcome::Response(_))
    }

    #[must_use]
    pub fn as_payload(&self) -> Option<&Value> {
        match self {
            DispatchOutcome::Payload(value) => Some(value),
            DispatchOutcome::Response(_) => None,
        }
    }

    #[must_use]
    pub fn as_response(&self) -> Option<&Response> {
        match self {
            DispatchOutcome::Response(response) => Some(response),
            DispatchOutcome::Payload(_) => None,
        }
    }
}

impl From<Value> for DispatchOutcome {
    fn from(value: Value) -> Self {
        DispatchOutcome::Payload(value)
    }
}

impl From<Response> for DispatchOutcome {
    fn from(response: Response) -> Self {
        DispatchOutcome::Response(response)
    }
}

/// The dispatch engine for one controller instance.
///
/// Owns the controller, the custom method and action registries, the
/// instance hook set, and the identifier/content-type configuration.
/// Registries and configuration live for the lifetime of the dispatcher
/// and may be mutated between dispatches (`&mut self` enforces that they
/// cannot change under an in-flight dispatch on the same instance).
pub struct Dispatcher<C> {
    controller: C,
    methods: HashMap<String, MethodHandler<C>>,
    actions: HashMap<String, MethodHandler<C>>,
    hooks: HookSet,
    shared_hooks: Option<Arc<SharedHooks>>,
    identifier_name: String,
    json_content_types: Vec<String>,
}

impl<C: RestController> Dispatcher<C> {
    /// Create a dispatcher around a controller, with the default
    /// identifier name (`"id"`) and JSON media types.
    #[must_use]
    pub fn new(controller: C) -> Self {
        Self {
            controller,
            methods: HashMap::new(),
            actions: HashMap::new(),
            hooks: HookSet::new(),
            shared_hooks: None,
            identifier_name: "id".to_string(),
            json_content_types: content::DEFAULT_JSON_CONTENT_TYPES
                .iter()
                .map(|ct| (*ct).to_string())
                .collect(),
        }
    }

    #[must_use]
    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    #[must_use]
    pub fn into_controller(self) -> C {
        self.controller
    }

    /// The route/query parameter name used for identifier lookup.
    #[must_use]
    pub fn identifier_name(&self) -> &str {
        &self.identifier_name
    }

    /// Change the identifier parameter name for future dispatches.
    pub fn set_identifier_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.identifier_name = name.into();
        self
    }

    /// The media types decoded as JSON.
    #[must_use]
    pub fn json_content_types(&self) -> &[String] {
        &self.json_content_types
    }

    /// Replace the set of media types decoded as JSON.
    pub fn set_json_content_types(&mut self, types: Vec<String>) -> &mut Self {
        self.json_content_types = types;
        self
    }

    /// Register a handler for a custom HTTP method.
    ///
    /// The name is case-insensitive (stored upper-case) and is recognized
    /// by resolution on the very next dispatch. Registering a name that
    /// collides with a built-in verb overrides the built-in for this
    /// dispatcher only; registering an existing custom name replaces it.
    pub fn add_http_method_handler<F>(&mut self, method: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut C, &RestRequest) -> DispatchOutcome + Send + Sync + 'static,
    {
        let name = method.to_ascii_uppercase();
        if self.methods.insert(name.clone(), Box::new(handler)).is_some() {
            warn!(method = %name, "replaced existing custom method handler");
        } else {
            debug!(method = %name, total_methods = self.methods.len(), "custom method registered");
        }
        self
    }

    /// Register a handler for an explicit action name.
    ///
    /// The name is normalized with [`resolver::normalize_action`] on
    /// insert, so `"purge-all"` and `"purgeAll"` register the same handler.
    pub fn register_action<F>(&mut self, action: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut C, &RestRequest) -> DispatchOutcome + Send + Sync + 'static,
    {
        let name = resolver::normalize_action(action);
        if self.actions.insert(name.clone(), Box::new(handler)).is_some() {
            warn!(action = %name, "replaced existing action handler");
        }
        self
    }

    /// Register a hook in this dispatcher's instance scope.
    pub fn attach_hook<F>(&mut self, phase: HookPhase, priority: i32, callback: F) -> &mut Self
    where
        F: Fn(&RestRequest, Option<&DispatchOutcome>) -> Option<DispatchOutcome>
            + Send
            + Sync
            + 'static,
    {
        self.hooks.attach(phase, priority, callback);
        self
    }

    /// Attach a shared hook registry. Shared hooks merge with instance
    /// hooks at dispatch time, winning priority ties.
    pub fn set_shared_hooks(&mut self, shared: Arc<SharedHooks>) -> &mut Self {
        self.shared_hooks = Some(shared);
        self
    }

    /// Every method name this dispatcher answers for, built-ins first,
    /// then registered custom methods. Order is not significant.
    #[must_use]
    pub fn allowed_methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = BUILTIN_ALLOW.iter().map(|m| (*m).to_string()).collect();
        for name in self.methods.keys() {
            if !methods.iter().any(|m| m == name) {
                methods.push(name.clone());
            }
        }
        methods
    }

    /// Dispatch one request.
    ///
    /// Order: pre-hooks (may short-circuit everything) → verb resolution →
    /// body decoding for data-carrying shapes → handler invocation →
    /// post-hooks (may replace the raw result) → verb-specific shaping.
    pub fn dispatch(&mut self, request: &RestRequest) -> DispatchOutcome {
        debug!(method = %request.method(), action = ?request.action(), "dispatch start");

        if let Some(result) = hooks::run_phase(
            HookPhase::Pre,
            &self.hooks,
            self.shared_hooks.as_deref(),
            request,
            None,
        ) {
            debug!(method = %request.method(), "pre-dispatch hook short-circuited");
            return result;
        }

        let identifier = resolver::extract_identifier(request, &self.identifier_name);

        let resolved = match resolver::resolve(
            request.method(),
            request.action(),
            identifier.is_some(),
            |name| self.methods.contains_key(name),
        ) {
            Resolution::Resolved(resolved) => resolved,
            Resolution::NotAllowed => {
                warn!(method = %request.method(), "no handler mapping for method");
                return shaper::method_not_allowed();
            }
        };

        debug!(
            handler = %resolved.verb.name(),
            args = ?resolved.args,
            identifier_present = identifier.is_some(),
            "dispatch target resolved"
        );

        let data = match resolved.args {
            ArgShape::Data | ArgShape::IdentifierAndData => Some(content::decode_body(
                request.content_type(),
                &self.json_content_types,
                request.body(),
            )),
            ArgShape::None | ArgShape::Identifier => None,
        };

        let raw = invoke(
            &mut self.controller,
            &self.methods,
            &self.actions,
            &resolved,
            identifier.as_ref(),
            data,
            request,
        );

        let result = match hooks::run_phase(
            HookPhase::Post,
            &self.hooks,
            self.shared_hooks.as_deref(),
            request,
            Some(&raw),
        ) {
            Some(replacement) => {
                debug!(handler = %resolved.verb.name(), "post-dispatch hook replaced result");
                replacement
            }
            None => raw,
        };

        shaper::shape(&resolved.verb, result, &self.allowed_methods())
    }
}

/// Call the resolved handler with exactly the arguments its shape implies,
/// and capture whatever it returns, unexamined.
fn invoke<C: RestController>(
    controller: &mut C,
    methods: &HashMap<String, MethodHandler<C>>,
    actions: &HashMap<String, MethodHandler<C>>,
    resolved: &ResolvedAction,
    identifier: Option<&Value>,
    data: Option<Value>,
    request: &RestRequest,
) -> DispatchOutcome {
    info!(handler = %resolved.verb.name(), "invoking handler");
    let data = data.unwrap_or_else(|| Value::Object(Map::new()));

    match &resolved.verb {
        Verb::GetList => controller.get_list(),
        Verb::Get => {
            let Some(id) = identifier else {
                return shaper::method_not_allowed();
            };
            controller.get(id)
        }
        Verb::Create => controller.create(data),
        Verb::Update => {
            let Some(id) = identifier else {
                return shaper::method_not_allowed();
            };
            controller.update(id, data)
        }
        Verb::ReplaceList => controller.replace_list(data),
        Verb::Patch => {
            let Some(id) = identifier else {
                return shaper::method_not_allowed();
            };
            controller.patch(id, data)
        }
        Verb::PatchList => controller.patch_list(data),
        Verb::Delete => {
            let Some(id) = identifier else {
                return shaper::method_not_allowed();
            };
            controller.delete(id)
        }
        Verb::DeleteList => controller.delete_list(),
        Verb::Head => controller.head(identifier),
        Verb::Options => controller.options(),
        Verb::Custom(name) => match methods.get(name) {
            Some(handler) => handler(controller, request),
            // Resolution only yields Custom for names present in the registry.
            None => shaper::method_not_allowed(),
        },
        Verb::Action(name) => match actions.get(name) {
            Some(handler) => handler(controller, request),
            None => {
                warn!(action = %name, "no handler registered for action");
                shaper::not_found()
            }
        },
    }
}
