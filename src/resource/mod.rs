//! The callback contract between resource authors and the engine.
//!
//! A resource parameterizes the walk through four named callbacks. Every
//! callback receives the request plus snapshots of the per-request heap
//! and response, and hands back its result together with optional
//! replacements for either. Names outside the recognized set are rejected
//! when the map is built, before any request is served.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use axum::http::Method;
use serde_json::Value;
use thiserror::Error;

use crate::http::{Provider, Request, Response};

/// Per-request scratch space shared by all callbacks within one walk.
pub type Heap = HashMap<String, Value>;

/// The set of methods a resource answers to.
pub type MethodSet = HashSet<Method>;

/// Media types a resource can render, each paired with the provider that
/// renders it. Ordered: when several offers are acceptable, the first
/// acceptable one is selected.
pub type ProviderOffers = Vec<(String, Provider)>;

/// The recognized callback slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackName {
    /// `allowed-methods`: the methods the resource answers to.
    AllowedMethods,
    /// `resource-exists?`: whether the requested resource is there.
    ResourceExists,
    /// `malformed-request?`: whether the request is unusable.
    MalformedRequest,
    /// `content-types-provided`: the media types the resource offers.
    ContentTypesProvided,
}

impl CallbackName {
    /// All recognized slots.
    pub const ALL: [CallbackName; 4] = [
        CallbackName::AllowedMethods,
        CallbackName::ResourceExists,
        CallbackName::MalformedRequest,
        CallbackName::ContentTypesProvided,
    ];

    /// The wire name resources register under.
    pub fn as_str(self) -> &'static str {
        match self {
            CallbackName::AllowedMethods => "allowed-methods",
            CallbackName::ResourceExists => "resource-exists?",
            CallbackName::MalformedRequest => "malformed-request?",
            CallbackName::ContentTypesProvided => "content-types-provided",
        }
    }

    /// Resolve a wire name.
    pub fn parse(name: &str) -> Result<Self, CallbackError> {
        CallbackName::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == name)
            .ok_or_else(|| CallbackError::UnknownName(name.to_string()))
    }
}

impl fmt::Display for CallbackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Misuse of the callback contract at construction time.
#[derive(Debug, Error)]
pub enum CallbackError {
    /// The supplied name is not one of the recognized callback slots.
    #[error("unknown callback name {0:?}")]
    UnknownName(String),
}

/// What a callback computes.
#[derive(Clone)]
pub enum CallbackResult {
    /// A yes/no answer (`resource-exists?`, `malformed-request?`).
    Bool(bool),
    /// A method set (`allowed-methods`).
    Methods(MethodSet),
    /// Ordered media-type offers (`content-types-provided`).
    Providers(ProviderOffers),
}

impl CallbackResult {
    /// Shape name, for error reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            CallbackResult::Bool(_) => "bool",
            CallbackResult::Methods(_) => "method set",
            CallbackResult::Providers(_) => "provider offers",
        }
    }
}

impl fmt::Debug for CallbackResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackResult::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            CallbackResult::Methods(methods) => f.debug_tuple("Methods").field(methods).finish(),
            CallbackResult::Providers(offers) => {
                let types: Vec<&str> = offers.iter().map(|(t, _)| t.as_str()).collect();
                f.debug_tuple("Providers").field(&types).finish()
            }
        }
    }
}

impl From<bool> for CallbackResult {
    fn from(value: bool) -> Self {
        CallbackResult::Bool(value)
    }
}

impl From<MethodSet> for CallbackResult {
    fn from(value: MethodSet) -> Self {
        CallbackResult::Methods(value)
    }
}

impl From<ProviderOffers> for CallbackResult {
    fn from(value: ProviderOffers) -> Self {
        CallbackResult::Providers(value)
    }
}

/// What a callback hands back to the walk.
///
/// `heap` and `response`, when present, replace the walk's current cells
/// before the next transition runs; the two land together.
pub struct CallbackReturn {
    /// The result consumed by the calling transition.
    pub result: CallbackResult,
    /// Replacement heap, superseding the current one.
    pub heap: Option<Heap>,
    /// Replacement response, superseding the current one.
    pub response: Option<Response>,
}

impl CallbackReturn {
    /// A return carrying only a result.
    pub fn of(result: impl Into<CallbackResult>) -> Self {
        Self {
            result: result.into(),
            heap: None,
            response: None,
        }
    }

    /// Attach a replacement heap.
    pub fn with_heap(mut self, heap: Heap) -> Self {
        self.heap = Some(heap);
        self
    }

    /// Attach a replacement response.
    pub fn with_response(mut self, response: Response) -> Self {
        self.response = Some(response);
        self
    }
}

/// A user-supplied callback.
pub type Callback = Arc<dyn Fn(&Request, &Heap, &Response) -> CallbackReturn + Send + Sync>;

/// The default for a slot the resource author left out.
pub(crate) fn default_callback(name: CallbackName) -> Callback {
    match name {
        CallbackName::AllowedMethods => Arc::new(|_req, _heap, _resp| {
            CallbackReturn::of(MethodSet::from([Method::GET, Method::HEAD]))
        }),
        CallbackName::ResourceExists => Arc::new(|_req, _heap, _resp| CallbackReturn::of(true)),
        CallbackName::MalformedRequest => Arc::new(|_req, _heap, _resp| CallbackReturn::of(false)),
        CallbackName::ContentTypesProvided => {
            Arc::new(|_req, _heap, _resp| CallbackReturn::of(ProviderOffers::new()))
        }
    }
}

/// The validated, name-keyed callbacks of one resource.
///
/// Built before serving; registration under an unrecognized name fails
/// here, so no handler is ever constructed from a misspelled map.
#[derive(Clone, Default)]
pub struct CallbackMap {
    entries: HashMap<CallbackName, Callback>,
}

impl CallbackMap {
    /// An empty map; every slot falls back to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback under its wire name.
    pub fn with<F>(mut self, name: &str, callback: F) -> Result<Self, CallbackError>
    where
        F: Fn(&Request, &Heap, &Response) -> CallbackReturn + Send + Sync + 'static,
    {
        let name = CallbackName::parse(name)?;
        self.entries.insert(name, Arc::new(callback));
        Ok(self)
    }

    /// The registered callback for a slot, if any.
    pub fn get(&self, name: CallbackName) -> Option<&Callback> {
        self.entries.get(&name)
    }
}

impl fmt::Debug for CallbackMap {
    // Holds closures; show the registered slot names only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.entries.keys().map(|n| n.as_str()).collect();
        f.debug_struct("CallbackMap").field("entries", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recognized_names() {
        for name in CallbackName::ALL {
            assert_eq!(CallbackName::parse(name.as_str()).unwrap(), name);
        }
    }

    #[test]
    fn test_parse_unknown_name_fails() {
        let err = CallbackName::parse("not-a-callback").unwrap_err();
        assert!(err.to_string().contains("not-a-callback"));
    }

    #[test]
    fn test_registration_rejects_unknown_names() {
        let result = CallbackMap::new().with("not-a-callback", |_req, _heap, _resp| {
            CallbackReturn::of(true)
        });
        assert!(matches!(result, Err(CallbackError::UnknownName(_))));
    }

    #[test]
    fn test_registration_accepts_recognized_names() {
        let map = CallbackMap::new()
            .with("resource-exists?", |_req, _heap, _resp| {
                CallbackReturn::of(false)
            })
            .unwrap();
        assert!(map.get(CallbackName::ResourceExists).is_some());
        assert!(map.get(CallbackName::AllowedMethods).is_none());
    }

    #[test]
    fn test_default_allowed_methods_is_get_head() {
        let callback = default_callback(CallbackName::AllowedMethods);
        let request = Request::default();
        let ret = callback(&request, &Heap::new(), &Response::new());
        match ret.result {
            CallbackResult::Methods(methods) => {
                assert_eq!(methods, MethodSet::from([Method::GET, Method::HEAD]));
            }
            other => panic!("expected a method set, got {other:?}"),
        }
    }
}
