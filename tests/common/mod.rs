//! Shared test fixtures: an in-memory notes controller that implements the
//! full built-in handler table, and an empty controller that implements
//! nothing (every built-in falls back to its 405 default).

use restdispatch::{DispatchOutcome, Response, RestController, RestRequest};
use serde_json::{json, Map, Value};

/// A controller over an in-memory collection. Each handler records its
/// invocation in `invoked` so tests can assert which side effects ran.
pub struct NotesController {
    pub entities: Vec<Value>,
    pub entity: Value,
    pub head_response: Option<Response>,
    pub invoked: Vec<&'static str>,
}

impl NotesController {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            entity: Value::Null,
            head_response: None,
            invoked: Vec::new(),
        }
    }
}

impl Default for NotesController {
    fn default() -> Self {
        Self::new()
    }
}

impl RestController for NotesController {
    fn get_list(&mut self) -> DispatchOutcome {
        self.invoked.push("get_list");
        DispatchOutcome::Payload(json!({ "entities": self.entities }))
    }

    fn get(&mut self, identifier: &Value) -> DispatchOutcome {
        self.invoked.push("get");
        DispatchOutcome::Payload(json!({ "entity": self.entity, "id": identifier }))
    }

    fn create(&mut self, data: Value) -> DispatchOutcome {
        self.invoked.push("create");
        self.entities.push(data.clone());
        DispatchOutcome::Payload(json!({ "entity": data }))
    }

    fn update(&mut self, identifier: &Value, data: Value) -> DispatchOutcome {
        self.invoked.push("update");
        let mut entity = Map::new();
        entity.insert("id".to_string(), identifier.clone());
        if let Value::Object(fields) = data {
            for (name, value) in fields {
                entity.insert(name, value);
            }
        }
        DispatchOutcome::Payload(json!({ "entity": entity }))
    }

    fn replace_list(&mut self, data: Value) -> DispatchOutcome {
        self.invoked.push("replace_list");
        DispatchOutcome::Payload(data)
    }

    fn patch(&mut self, identifier: &Value, data: Value) -> DispatchOutcome {
        self.invoked.push("patch");
        let mut entity = match &self.entity {
            Value::Object(fields) => fields.clone(),
            _ => Map::new(),
        };
        entity.insert("id".to_string(), identifier.clone());
        if let Value::Object(fields) = data {
            for (name, value) in fields {
                entity.insert(name, value);
            }
        }
        DispatchOutcome::Payload(json!({ "entity": entity }))
    }

    fn patch_list(&mut self, data: Value) -> DispatchOutcome {
        self.invoked.push("patch_list");
        DispatchOutcome::Payload(data)
    }

    fn delete(&mut self, _identifier: &Value) -> DispatchOutcome {
        self.invoked.push("delete");
        self.entity = json!({});
        DispatchOutcome::Payload(json!({}))
    }

    fn delete_list(&mut self) -> DispatchOutcome {
        self.invoked.push("delete_list");
        self.entities.clear();
        // Shaping discards this; returning data proves it.
        DispatchOutcome::Payload(json!({ "leftover": "should be discarded" }))
    }

    fn head(&mut self, identifier: Option<&Value>) -> DispatchOutcome {
        self.invoked.push("head");
        if let Some(response) = self.head_response.take() {
            return DispatchOutcome::Response(response);
        }
        match identifier {
            Some(id) => {
                let mut response = Response::with_status(200);
                response.set_header("X-Note-Id", id.to_string());
                response.set_body("single entity body");
                DispatchOutcome::Response(response)
            }
            None => DispatchOutcome::Payload(json!({ "entities": self.entities })),
        }
    }

    fn options(&mut self) -> DispatchOutcome {
        self.invoked.push("options");
        DispatchOutcome::Response(Response::with_status(200))
    }
}

/// A controller with no handler implementations: every built-in verb falls
/// back to its method-not-allowed default.
pub struct EmptyController;

impl RestController for EmptyController {}

/// Custom-verb handler used by the DESCRIBE registration tests.
pub fn describe(controller: &mut NotesController, _request: &RestRequest) -> DispatchOutcome {
    controller.invoked.push("describe");
    DispatchOutcome::Payload(json!({ "description": "NotesController::describe" }))
}
