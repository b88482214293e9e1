//! Verb-specific response shaping.
//!
//! Applied after hooks, as the last step of a dispatch: HEAD strips the
//! body, OPTIONS gets an `Allow` header computed from the live method
//! registry, a collection delete collapses to 204 with a marker header,
//! and the unresolved/unknown paths get their canonical 405/404 responses.

use crate::dispatcher::DispatchOutcome;
use crate::resolver::Verb;
use crate::response::Response;
use serde_json::json;
use tracing::debug;

/// Shape a raw handler result for its verb.
///
/// Handlers other than `head`, `options` and `delete_list` pass through
/// untouched. `allowed_methods` is the dispatcher's current method set,
/// used to populate the `Allow` header.
#[must_use]
pub fn shape(verb: &Verb, raw: DispatchOutcome, allowed_methods: &[String]) -> DispatchOutcome {
    match verb {
        // A HEAD response never carries a body; status and headers from the
        // handler survive.
        Verb::Head => {
            let mut response = match raw {
                DispatchOutcome::Response(response) => response,
                DispatchOutcome::Payload(_) => Response::with_status(200),
            };
            response.body.clear();
            debug!(status = response.status, "stripped body from HEAD response");
            DispatchOutcome::Response(response)
        }
        Verb::Options => {
            let mut response = match raw {
                DispatchOutcome::Response(response) => response,
                DispatchOutcome::Payload(_) => Response::with_status(200),
            };
            response.set_header("Allow", allowed_methods.join(", "));
            DispatchOutcome::Response(response)
        }
        // delete_list is side-effect-only: the handler's return value is
        // discarded and the response is always 204 with a deletion marker.
        // The canonical 405 of an unimplemented handler passes through so
        // the client still sees method-not-allowed.
        Verb::DeleteList => {
            if let DispatchOutcome::Response(response) = &raw {
                if response.status == 405 {
                    return raw;
                }
            }
            let mut response = Response::with_status(204);
            response.set_header("X-Deleted", "true");
            DispatchOutcome::Response(response)
        }
        _ => raw,
    }
}

/// The canonical 405 outcome, used both when no handler mapping exists for
/// a method and when a built-in resolves to an unimplemented default - the
/// two are indistinguishable to the client.
#[must_use]
pub fn method_not_allowed() -> DispatchOutcome {
    DispatchOutcome::Response(Response::json(405, json!({"content": "Method Not Allowed"})))
}

/// The canonical 404 outcome for an explicit action with no registered
/// handler; carries a structured payload for rendering.
#[must_use]
pub fn not_found() -> DispatchOutcome {
    DispatchOutcome::Response(Response::json(404, json!({"content": "Page not found"})))
}
