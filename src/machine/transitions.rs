//! One boolean question per decision node.
//!
//! Fixed transitions are computed by the engine and never overridable;
//! dispatching transitions ask the resource's callbacks; the rest are
//! wired to a constant polarity. The polarities are load-bearing: they are
//! what makes a plain GET against an existing resource land on 200, so
//! changing one changes the default behavior of every resource.

use axum::http::header::{ACCEPT, CONTENT_TYPE, IF_MATCH, LOCATION};
use axum::http::{HeaderValue, Method};

use super::driver::{EngineError, Walk};
use super::state::StateId;
use crate::conneg;
use crate::http::Body;
use crate::resource::CallbackName;

/// The eight verbs the engine recognizes at b12.
const KNOWN_METHODS: [Method; 8] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::TRACE,
    Method::CONNECT,
    Method::OPTIONS,
];

/// Answer the question a node asks.
pub(crate) fn evaluate(state: StateId, walk: &mut Walk<'_>) -> Result<bool, EngineError> {
    use StateId::*;

    match state {
        // Stubbed polarities. b13 keeps the service available, b8 keeps it
        // authorized, m7/n5 accept POSTs to missing resources, m20 treats
        // deletes as enacted.
        B13 | B8 | M7 | M20 | N5 => Ok(true),
        B3 | B4 | B5 | B6 | B7 | B11 | D4 | E5 | F6 | G8 | H10 | I12 | K5 | K7 | L5 | L13
        | N11 | O14 | O18 | P3 => Ok(false),

        // Known method?
        B12 => Ok(KNOWN_METHODS.contains(&walk.request.method)),

        // Method allowed by the resource?
        B10 => {
            let allowed = walk.dispatch_methods(CallbackName::AllowedMethods)?;
            Ok(allowed.contains(&walk.request.method))
        }

        // Malformed request?
        B9 => walk.dispatch_bool(CallbackName::MalformedRequest),

        // Accept header present?
        C3 => Ok(walk.request.headers.contains_key(ACCEPT)),

        // Some offered media type acceptable?
        C4 => negotiate(walk),

        // Resource exists?
        G7 => walk.dispatch_bool(CallbackName::ResourceExists),

        // If-Match: * against a resource that is not there?
        H7 => Ok(walk
            .request
            .headers
            .get(IF_MATCH)
            .is_some_and(|value| value.as_bytes() == b"*")),

        I7 | O16 => Ok(walk.request.method == Method::PUT),
        L7 | M5 | N16 => Ok(walk.request.method == Method::POST),
        M16 => Ok(walk.request.method == Method::DELETE),

        // Response body slot holds something?
        O20 => Ok(!walk.response.body.is_empty()),

        // New resource announced through a Location header?
        P11 => Ok(walk.response.headers.contains_key(LOCATION)),
    }
}

/// c4: pick the first acceptable offer. On success the negotiated type
/// becomes the response `Content-Type` and the offer's provider takes the
/// body slot, to be rendered when the walk terminates.
fn negotiate(walk: &mut Walk<'_>) -> Result<bool, EngineError> {
    let offers = walk.dispatch_providers(CallbackName::ContentTypesProvided)?;

    // c3 guarantees presence; a non-UTF-8 value can match nothing.
    let accept = match walk.request.headers.get(ACCEPT).and_then(|v| v.to_str().ok()) {
        Some(accept) => accept.to_string(),
        None => return Ok(false),
    };

    for (media_type, provider) in offers {
        if conneg::acceptable(&media_type, &accept) {
            let value = HeaderValue::from_str(&media_type)
                .map_err(|_| EngineError::MediaType(media_type.clone()))?;
            walk.response.headers.insert(CONTENT_TYPE, value);
            walk.response.body = Body::Provider(provider);
            return Ok(true);
        }
    }
    Ok(false)
}
