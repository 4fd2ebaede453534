//! The walk driver.
//!
//! An [`Engine`] is built once per resource from a validated
//! [`CallbackMap`], merging the supplied callbacks over the defaults. Per
//! request it owns a fresh heap and response, walks the graph from b13
//! until a terminal status, and materializes the body if content
//! negotiation left a provider in the slot. Engines are immutable after
//! construction and cheap to clone, so one engine serves any number of
//! concurrent requests.

use axum::http::StatusCode;
use thiserror::Error;

use super::graph;
use super::state::{State, StateId};
use super::transitions;
use crate::http::{Body, Request, Response};
use crate::resource::{
    default_callback, Callback, CallbackMap, CallbackName, CallbackResult, Heap, MethodSet,
    ProviderOffers,
};

/// A programmer error surfaced during a walk.
///
/// These are contract violations, not HTTP outcomes: the walk is aborted
/// and the error propagates to the embedder, which is expected to answer
/// with a bare 500.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A callback returned a result of the wrong shape for its slot.
    #[error("callback {callback} returned {got}, expected {expected}")]
    ResultShape {
        /// The slot that was dispatched.
        callback: CallbackName,
        /// The shape the transition needed.
        expected: &'static str,
        /// The shape the callback produced.
        got: &'static str,
    },

    /// An offered media type cannot be used as a `Content-Type` value.
    #[error("offered media type {0:?} is not a valid Content-Type value")]
    MediaType(String),
}

/// A request handler for one resource.
#[derive(Clone)]
pub struct Engine {
    allowed_methods: Callback,
    resource_exists: Callback,
    malformed_request: Callback,
    content_types_provided: Callback,
}

impl Engine {
    /// Build a handler from a validated callback map, merging the
    /// supplied callbacks over the defaults.
    pub fn new(callbacks: CallbackMap) -> Self {
        let resolve = |name: CallbackName| {
            callbacks
                .get(name)
                .cloned()
                .unwrap_or_else(|| default_callback(name))
        };
        Self {
            allowed_methods: resolve(CallbackName::AllowedMethods),
            resource_exists: resolve(CallbackName::ResourceExists),
            malformed_request: resolve(CallbackName::MalformedRequest),
            content_types_provided: resolve(CallbackName::ContentTypesProvided),
        }
    }

    fn callback(&self, name: CallbackName) -> &Callback {
        match name {
            CallbackName::AllowedMethods => &self.allowed_methods,
            CallbackName::ResourceExists => &self.resource_exists,
            CallbackName::MalformedRequest => &self.malformed_request,
            CallbackName::ContentTypesProvided => &self.content_types_provided,
        }
    }

    /// Walk the graph for one request and produce its response.
    pub fn handle(&self, request: &Request) -> Result<Response, EngineError> {
        let mut walk = Walk {
            engine: self,
            request,
            heap: Heap::new(),
            response: Response::new(),
        };
        let status = walk.run()?;

        let Walk { heap, mut response, .. } = walk;
        response.status = status;

        // Materialize the negotiated body. The provider sees the terminal
        // status and accumulated headers, but an emptied body slot; its
        // return value is the final response.
        match std::mem::take(&mut response.body) {
            Body::Provider(provider) => Ok(provider(request, &heap, &response)),
            body => {
                response.body = body;
                Ok(response)
            }
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

/// One in-flight walk. Owns the per-request cells; nothing here outlives
/// the request.
pub(crate) struct Walk<'a> {
    engine: &'a Engine,
    pub(crate) request: &'a Request,
    pub(crate) heap: Heap,
    pub(crate) response: Response,
}

impl Walk<'_> {
    /// Step from b13 until a terminal status.
    fn run(&mut self) -> Result<StatusCode, EngineError> {
        let mut state = StateId::START;
        // One step per decision node; running past that bound means the
        // graph grew a cycle and the only honest answer is a 500.
        for _ in 0..StateId::ALL.len() {
            let outcome = transitions::evaluate(state, self)?;
            let branches = graph::branches(state);
            let next = if outcome { branches.on_true } else { branches.on_false };
            tracing::trace!(state = %state, outcome, "decision");
            match next {
                State::Decision(id) => state = id,
                State::Done(status) => return Ok(status),
            }
        }
        tracing::error!(state = %state, "walk exceeded one step per node without terminating");
        Ok(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Invoke a callback with snapshots of the walk state and fold its
    /// replacements back in. Both replacements land before this returns,
    /// so the next transition sees either all of the callback's updates
    /// or none of them.
    fn dispatch(&mut self, name: CallbackName) -> Result<CallbackResult, EngineError> {
        let callback = self.engine.callback(name).clone();
        let ret = callback(self.request, &self.heap, &self.response);
        if let Some(heap) = ret.heap {
            self.heap = heap;
        }
        if let Some(response) = ret.response {
            self.response = response;
        }
        Ok(ret.result)
    }

    pub(crate) fn dispatch_bool(&mut self, name: CallbackName) -> Result<bool, EngineError> {
        match self.dispatch(name)? {
            CallbackResult::Bool(value) => Ok(value),
            other => Err(EngineError::ResultShape {
                callback: name,
                expected: "bool",
                got: other.kind(),
            }),
        }
    }

    pub(crate) fn dispatch_methods(&mut self, name: CallbackName) -> Result<MethodSet, EngineError> {
        match self.dispatch(name)? {
            CallbackResult::Methods(methods) => Ok(methods),
            other => Err(EngineError::ResultShape {
                callback: name,
                expected: "method set",
                got: other.kind(),
            }),
        }
    }

    pub(crate) fn dispatch_providers(
        &mut self,
        name: CallbackName,
    ) -> Result<ProviderOffers, EngineError> {
        match self.dispatch(name)? {
            CallbackResult::Providers(offers) => Ok(offers),
            other => Err(EngineError::ResultShape {
                callback: name,
                expected: "provider offers",
                got: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::header::LOCATION;
    use axum::http::Method;
    use serde_json::json;

    use super::*;
    use crate::resource::CallbackReturn;

    fn get(path: &str) -> Request {
        Request::new(Method::GET, path)
    }

    #[test]
    fn test_default_get_reaches_200_with_an_empty_body() {
        let engine = Engine::new(CallbackMap::new());
        let response = engine.handle(&get("/foo")).unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_if_match_star_on_a_missing_resource_is_412() {
        let callbacks = CallbackMap::new()
            .with("resource-exists?", |_req, _heap, _resp| {
                CallbackReturn::of(false)
            })
            .unwrap();
        let engine = Engine::new(callbacks);
        let request = get("/gone").with_header("If-Match", "*");
        let response = engine.handle(&request).unwrap();
        assert_eq!(response.status, StatusCode::PRECONDITION_FAILED);
    }

    #[test]
    fn test_delete_on_an_existing_resource_is_204() {
        let callbacks = CallbackMap::new()
            .with("allowed-methods", |_req, _heap, _resp| {
                CallbackReturn::of(MethodSet::from([Method::DELETE]))
            })
            .unwrap();
        let engine = Engine::new(callbacks);
        let response = engine.handle(&Request::new(Method::DELETE, "/x")).unwrap();
        assert_eq!(response.status, StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_put_with_a_location_header_is_201() {
        let callbacks = CallbackMap::new()
            .with("allowed-methods", |_req, _heap, _resp| {
                CallbackReturn::of(MethodSet::from([Method::PUT]))
            })
            .unwrap()
            .with("resource-exists?", |_req, _heap, resp| {
                let mut response = resp.clone();
                response
                    .headers
                    .insert(LOCATION, "/things/1".parse().unwrap());
                CallbackReturn::of(false).with_response(response)
            })
            .unwrap();
        let engine = Engine::new(callbacks);
        let response = engine.handle(&Request::new(Method::PUT, "/things/1")).unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.headers.get(LOCATION).unwrap(), "/things/1");
    }

    #[test]
    fn test_post_to_a_missing_resource_is_accepted_by_the_stubs() {
        let callbacks = CallbackMap::new()
            .with("allowed-methods", |_req, _heap, _resp| {
                CallbackReturn::of(MethodSet::from([Method::POST]))
            })
            .unwrap()
            .with("resource-exists?", |_req, _heap, _resp| {
                CallbackReturn::of(false)
            })
            .unwrap();
        let engine = Engine::new(callbacks);
        let response = engine.handle(&Request::new(Method::POST, "/queue")).unwrap();
        // l7 → m7 → n11 → p11 → o20: no body, no Location, so 204.
        assert_eq!(response.status, StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_callback_updates_are_visible_to_later_transitions() {
        // malformed-request? (b9) stashes a value; resource-exists? (g7)
        // reads it back. Exercises the snapshot-in, delta-out contract.
        let callbacks = CallbackMap::new()
            .with("malformed-request?", |_req, heap, _resp| {
                let mut heap = heap.clone();
                heap.insert("looked-up".into(), json!("n1"));
                CallbackReturn::of(false).with_heap(heap)
            })
            .unwrap()
            .with("resource-exists?", |_req, heap, _resp| {
                CallbackReturn::of(heap.contains_key("looked-up"))
            })
            .unwrap();
        let engine = Engine::new(callbacks);
        let response = engine.handle(&get("/facts")).unwrap();
        assert_eq!(response.status, StatusCode::OK);
    }

    #[test]
    fn test_wrong_result_shape_aborts_the_walk() {
        let callbacks = CallbackMap::new()
            .with("resource-exists?", |_req, _heap, _resp| {
                CallbackReturn::of(MethodSet::from([Method::GET]))
            })
            .unwrap();
        let engine = Engine::new(callbacks);
        let err = engine.handle(&get("/x")).unwrap_err();
        match err {
            EngineError::ResultShape { callback, expected, .. } => {
                assert_eq!(callback, CallbackName::ResourceExists);
                assert_eq!(expected, "bool");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_heap_is_fresh_for_every_request() {
        let callbacks = CallbackMap::new()
            .with("resource-exists?", |_req, heap, _resp| {
                // A leftover marker from a previous request would flip
                // this to false.
                let fresh = !heap.contains_key("marker");
                let mut heap = heap.clone();
                heap.insert("marker".into(), json!(true));
                CallbackReturn::of(fresh).with_heap(heap)
            })
            .unwrap();
        let engine = Engine::new(callbacks);
        for _ in 0..3 {
            let response = engine.handle(&get("/foo")).unwrap();
            assert_eq!(response.status, StatusCode::OK);
        }
    }

    #[test]
    fn test_provider_sees_terminal_status_and_cleared_body_slot() {
        let provider: crate::http::Provider = Arc::new(|_req, _heap, resp| {
            assert_eq!(resp.status, StatusCode::OK);
            assert!(resp.body.is_empty());
            resp.clone().with_body("rendered")
        });
        let callbacks = CallbackMap::new()
            .with("content-types-provided", move |_req, _heap, _resp| {
                CallbackReturn::of(vec![("text/plain".to_string(), provider.clone())])
            })
            .unwrap();
        let engine = Engine::new(callbacks);
        let request = get("/x").with_header("Accept", "text/plain");
        let response = engine.handle(&request).unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body.as_bytes().unwrap(), "rendered");
    }
}
