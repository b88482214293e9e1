//! # restdispatch
//!
//! A REST-convention HTTP method dispatch engine: given an inbound request
//! (method, optional resource identifier, body, content type) and no
//! explicit action name, it resolves and invokes the right handler
//! following REST conventions, decodes the body according to declared
//! content-type support, and produces a normalized result that downstream
//! rendering can consume.
//!
//! ## Overview
//!
//! The library is organized into small, single-purpose modules:
//!
//! - **[`request`]** - the immutable per-dispatch request value
//! - **[`resolver`]** - verb/identifier-driven handler resolution and
//!   explicit-action name normalization
//! - **[`content`]** - content-type classification and body decoding
//!   (JSON / URL-encoded form)
//! - **[`controller`]** - the built-in REST handler table, one trait method
//!   per verb, with 405 defaults for unimplemented handlers
//! - **[`hooks`]** - pre/post dispatch interception with priorities, a
//!   shared scope, and first-result short-circuiting
//! - **[`dispatcher`]** - orchestration and custom method/action registries
//! - **[`shaper`]** - verb-specific response shaping (HEAD, OPTIONS,
//!   collection delete, 404/405 paths)
//! - **[`response`]** - the full response object with multi-value headers
//! - **[`typed`]** - optional typed extraction of decoded dispatch data
//!
//! ## Dispatch flow
//!
//! 1. Pre-hooks run over the merged shared + instance hook sequence; the
//!    first hook returning a result short-circuits the whole dispatch.
//! 2. The resolver picks a handler: explicit action name first, then
//!    registered custom methods, then the REST table
//!    (GET → `get`/`get_list`, POST → `create`, PUT →
//!    `update`/`replace_list`, PATCH → `patch`/`patch_list`, DELETE →
//!    `delete`/`delete_list`, HEAD, OPTIONS). Unknown methods become 405.
//! 3. For data-carrying verbs the body is decoded - JSON when the content
//!    type matches the declared JSON media types, URL-encoded form
//!    otherwise. Malformed JSON decodes as empty input.
//! 4. The handler runs with exactly the arguments its verb implies.
//! 5. Post-hooks may replace the raw result.
//! 6. Shaping applies verb-specific HTTP semantics: HEAD loses its body,
//!    OPTIONS gets an `Allow` header from the live method registry, a
//!    collection delete collapses to 204 with a deletion marker.
//!
//! A dispatch never fails: every input combination yields a
//! [`DispatchOutcome`].
//!
//! ## Quick start
//!
//! ```
//! use http::Method;
//! use restdispatch::{DispatchOutcome, Dispatcher, RestController, RestRequest};
//! use serde_json::{json, Value};
//!
//! struct Notes {
//!     items: Vec<Value>,
//! }
//!
//! impl RestController for Notes {
//!     fn get_list(&mut self) -> DispatchOutcome {
//!         DispatchOutcome::Payload(json!({ "notes": self.items }))
//!     }
//!
//!     fn create(&mut self, data: Value) -> DispatchOutcome {
//!         self.items.push(data.clone());
//!         DispatchOutcome::Payload(json!({ "note": data }))
//!     }
//! }
//!
//! let mut dispatcher = Dispatcher::new(Notes { items: Vec::new() });
//!
//! let request = RestRequest::new(Method::POST)
//!     .with_content_type("application/json")
//!     .with_body(r#"{"title":"first"}"#);
//! let outcome = dispatcher.dispatch(&request);
//!
//! assert_eq!(
//!     outcome.as_payload(),
//!     Some(&json!({ "note": { "title": "first" } }))
//! );
//! assert_eq!(dispatcher.controller().items.len(), 1);
//! ```
//!
//! Custom HTTP methods register at runtime and resolve on the next
//! dispatch; hooks intercept before and after invocation:
//!
//! ```
//! use http::Method;
//! use restdispatch::{
//!     DispatchOutcome, Dispatcher, HookPhase, Response, RestController, RestRequest,
//! };
//! use serde_json::json;
//!
//! struct Empty;
//! impl RestController for Empty {}
//!
//! let mut dispatcher = Dispatcher::new(Empty);
//! dispatcher.add_http_method_handler("DESCRIBE", |_controller, _request| {
//!     DispatchOutcome::Payload(json!({ "description": "a resource" }))
//! });
//! dispatcher.attach_hook(HookPhase::Pre, 10, |request, _in_progress| {
//!     (request.method() == Method::TRACE)
//!         .then(|| DispatchOutcome::Response(Response::with_status(403)))
//! });
//!
//! let outcome = dispatcher.dispatch(&RestRequest::from_method_name("describe"));
//! assert!(outcome.as_payload().is_some());
//! ```
//!
//! ## Concurrency
//!
//! A single dispatch is synchronous and sequential, with no internal
//! suspension points and no I/O of its own. Independent dispatchers may
//! run on different threads; registry and configuration mutation takes
//! `&mut self`, so it cannot interleave with an in-flight dispatch on the
//! same instance.

pub mod content;
pub mod controller;
pub mod dispatcher;
pub mod hooks;
pub mod request;
pub mod resolver;
pub mod response;
pub mod shaper;
pub mod typed;

pub use controller::{MethodHandler, RestController};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use hooks::{HookPhase, SharedHooks};
pub use request::RestRequest;
pub use resolver::{ArgShape, Resolution, ResolvedAction, Verb};
pub use response::{HeaderVec, Response};
