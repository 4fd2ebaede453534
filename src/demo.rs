//! Demo resources for the bundled binary.
//!
//! Two small resources that exercise every callback slot: a facts lookup
//! over an in-memory store (`GET /facts?node=<name>`) and a command
//! acknowledgement endpoint (`POST /commands?command=<text>`). Bodies are
//! rendered by negotiated JSON providers, so send `Accept:
//! application/json` to get one; without an `Accept` header negotiation
//! is skipped and successful walks come back bodiless.

use std::sync::Arc;

use axum::http::Method;
use dashmap::DashMap;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::http::Provider;
use crate::machine::Engine;
use crate::resource::{CallbackError, CallbackMap, CallbackReturn, MethodSet};

/// Node name → facts document.
pub type FactStore = DashMap<String, Value>;

/// Populate the store with a couple of recognizable nodes.
pub fn seed_facts(store: &FactStore) {
    store.insert(
        "n1".to_string(),
        json!({
            "name": "n1",
            "kernel": "Linux",
            "memory_mb": 16384,
            "roles": ["db", "cache"],
        }),
    );
    store.insert(
        "n2".to_string(),
        json!({
            "name": "n2",
            "kernel": "OpenBSD",
            "memory_mb": 4096,
            "roles": ["edge"],
        }),
    );
}

/// Facts lookup: 400 without a `node` parameter, 404 for unknown nodes,
/// otherwise the stored document as JSON.
pub fn facts_engine(store: Arc<FactStore>) -> Result<Engine, CallbackError> {
    let callbacks = CallbackMap::new()
        .with("malformed-request?", |req, _heap, resp| {
            if req.params.contains_key("node") {
                CallbackReturn::of(false)
            } else {
                let response = resp
                    .clone()
                    .with_body(r#"{"error":"missing query parameter: node"}"#);
                CallbackReturn::of(true).with_response(response)
            }
        })?
        .with("resource-exists?", move |req, heap, resp| {
            let node = req.params.get("node").cloned().unwrap_or_default();
            match store.get(&node) {
                Some(facts) => {
                    // Stash the document for the provider.
                    let mut heap = heap.clone();
                    heap.insert("facts".to_string(), facts.value().clone());
                    CallbackReturn::of(true).with_heap(heap)
                }
                None => {
                    let body = json!({ "error": format!("Could not find facts for {node}") });
                    CallbackReturn::of(false).with_response(resp.clone().with_body(body.to_string()))
                }
            }
        })?
        .with("content-types-provided", |_req, _heap, _resp| {
            CallbackReturn::of(vec![("application/json".to_string(), facts_provider())])
        })?;
    Ok(Engine::new(callbacks))
}

fn facts_provider() -> Provider {
    Arc::new(|_req, heap, resp| {
        let facts = heap.get("facts").cloned().unwrap_or(Value::Null);
        resp.clone().with_body(facts.to_string())
    })
}

/// Command submission: POST only, 400 without a `command` parameter,
/// otherwise an acknowledgement carrying a fresh submission id.
pub fn commands_engine() -> Result<Engine, CallbackError> {
    let callbacks = CallbackMap::new()
        .with("allowed-methods", |_req, _heap, _resp| {
            CallbackReturn::of(MethodSet::from([Method::POST]))
        })?
        .with("malformed-request?", |req, _heap, resp| {
            if req.params.contains_key("command") {
                CallbackReturn::of(false)
            } else {
                let response = resp
                    .clone()
                    .with_body(r#"{"error":"missing query parameter: command"}"#);
                CallbackReturn::of(true).with_response(response)
            }
        })?
        .with("content-types-provided", |_req, _heap, _resp| {
            CallbackReturn::of(vec![("application/json".to_string(), ack_provider())])
        })?;
    Ok(Engine::new(callbacks))
}

fn ack_provider() -> Provider {
    Arc::new(|req, _heap, resp| {
        let command = req.params.get("command").cloned().unwrap_or_default();
        let body = json!({
            "received": true,
            "command": command,
            "id": Uuid::new_v4().to_string(),
        });
        resp.clone().with_body(body.to_string())
    })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::http::Request;

    fn store() -> Arc<FactStore> {
        let store = Arc::new(FactStore::new());
        seed_facts(&store);
        store
    }

    #[test]
    fn test_facts_lookup_renders_the_stored_document() {
        let engine = facts_engine(store()).unwrap();
        let request = Request::new(Method::GET, "/facts")
            .with_param("node", "n1")
            .with_header("Accept", "application/json");
        let response = engine.handle(&request).unwrap();

        assert_eq!(response.status, StatusCode::OK);
        let body: Value = serde_json::from_slice(response.body.as_bytes().unwrap()).unwrap();
        assert_eq!(body["kernel"], "Linux");
    }

    #[test]
    fn test_facts_without_node_is_400() {
        let engine = facts_engine(store()).unwrap();
        let request = Request::new(Method::GET, "/facts");
        let response = engine.handle(&request).unwrap();

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(!response.body.is_empty());
    }

    #[test]
    fn test_facts_for_unknown_node_is_404_with_an_error_body() {
        let engine = facts_engine(store()).unwrap();
        let request = Request::new(Method::GET, "/facts").with_param("node", "n9");
        let response = engine.handle(&request).unwrap();

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_slice(response.body.as_bytes().unwrap()).unwrap();
        assert!(body["error"].as_str().unwrap().contains("n9"));
    }

    #[test]
    fn test_commands_rejects_get() {
        let engine = commands_engine().unwrap();
        let request = Request::new(Method::GET, "/commands");
        let response = engine.handle(&request).unwrap();

        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_command_submission_is_acknowledged() {
        let engine = commands_engine().unwrap();
        let request = Request::new(Method::POST, "/commands")
            .with_param("command", "deactivate n2")
            .with_header("Accept", "application/json");
        let response = engine.handle(&request).unwrap();

        assert_eq!(response.status, StatusCode::OK);
        let body: Value = serde_json::from_slice(response.body.as_bytes().unwrap()).unwrap();
        assert_eq!(body["received"], true);
        assert_eq!(body["command"], "deactivate n2");
    }
}
