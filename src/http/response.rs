//! The response value the engine accumulates.

use std::fmt;
use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use bytes::Bytes;

use crate::http::Request;
use crate::resource::Heap;

/// Renders the response body once the walk has terminated.
///
/// Selected during content negotiation and invoked exactly once, with the
/// request, the final heap, and the response as accumulated so far (status
/// and headers set, body slot cleared). Its return value is the final
/// response.
pub type Provider = Arc<dyn Fn(&Request, &Heap, &Response) -> Response + Send + Sync>;

/// The body slot of a response under construction.
#[derive(Clone, Default)]
pub enum Body {
    /// Nothing yet.
    #[default]
    Empty,
    /// Literal bytes, ready to send.
    Value(Bytes),
    /// A provider to invoke when the walk terminates.
    Provider(Provider),
}

impl Body {
    /// True when the slot holds neither bytes nor a provider.
    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }

    /// The literal bytes, when the slot holds them.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Body::Value(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Empty"),
            Body::Value(bytes) => f.debug_tuple("Value").field(bytes).finish(),
            Body::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

impl From<&'static str> for Body {
    fn from(value: &'static str) -> Self {
        Body::Value(Bytes::from_static(value.as_bytes()))
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Body::Value(Bytes::from(value))
    }
}

impl From<Bytes> for Body {
    fn from(value: Bytes) -> Self {
        Body::Value(value)
    }
}

/// An HTTP response under construction.
#[derive(Debug, Clone)]
pub struct Response {
    /// Status code. Starts at the 400 sentinel and is overwritten with the
    /// terminal status when the walk ends.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Body slot.
    pub body: Body,
}

impl Response {
    /// An empty response carrying the walk sentinel status.
    pub fn new() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            headers: HeaderMap::new(),
            body: Body::Empty,
        }
    }

    /// Replace the body slot.
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}
