//! The request value the engine walks over.

use std::collections::HashMap;

use axum::http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde_json::Value;

/// A parsed HTTP request as the engine sees it.
///
/// The engine reads the method and a handful of headers; `params` and
/// `globals` are opaque to it and exist for callbacks. Header lookup is
/// case-insensitive throughout (`HeaderMap` normalizes names).
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Request method. Extension methods outside the eight known verbs
    /// are representable and fail the known-method gate.
    pub method: Method,
    /// Request path, informational for callbacks.
    pub path: String,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request parameters, as extracted by the embedding server.
    pub params: HashMap<String, String>,
    /// Embedder-supplied values carried for callbacks.
    pub globals: HashMap<String, Value>,
}

impl Request {
    /// A request with the given method and path and nothing else.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Self::default()
        }
    }

    /// Add a header, replacing any previous value under the same name.
    /// Invalid names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add a request parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}
