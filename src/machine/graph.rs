//! The decision graph.
//!
//! A static table mapping every decision node to its two successors, keyed
//! on the node's boolean outcome. The table is fixed at build time and
//! immutable at runtime; transition logic lives in `transitions`, never
//! here. Chains of the source diagram whose tail nodes carry no transition
//! in this engine (language/charset/encoding negotiation, the etag and
//! date conditionals) are collapsed into their head node, with the true
//! branch wired to the chain's failure terminal.

use axum::http::StatusCode;

use super::state::{State, StateId};

/// Successors of a decision node.
#[derive(Debug, Clone, Copy)]
pub struct Branches {
    /// Next step when the node's question answers true.
    pub on_true: State,
    /// Next step when it answers false.
    pub on_false: State,
}

const fn step(id: StateId) -> State {
    State::Decision(id)
}

const fn done(status: StatusCode) -> State {
    State::Done(status)
}

const fn branch(on_true: State, on_false: State) -> Branches {
    Branches { on_true, on_false }
}

/// Look up the successors of a node.
pub fn branches(state: StateId) -> Branches {
    use StateId::*;

    match state {
        // Request sanity column.
        B13 => branch(step(B12), done(StatusCode::SERVICE_UNAVAILABLE)),
        B12 => branch(step(B11), done(StatusCode::NOT_IMPLEMENTED)),
        B11 => branch(done(StatusCode::URI_TOO_LONG), step(B10)),
        B10 => branch(step(B9), done(StatusCode::METHOD_NOT_ALLOWED)),
        B9 => branch(done(StatusCode::BAD_REQUEST), step(B8)),
        B8 => branch(step(B7), done(StatusCode::UNAUTHORIZED)),
        B7 => branch(done(StatusCode::FORBIDDEN), step(B6)),
        B6 => branch(done(StatusCode::NOT_IMPLEMENTED), step(B5)),
        B5 => branch(done(StatusCode::UNSUPPORTED_MEDIA_TYPE), step(B4)),
        B4 => branch(done(StatusCode::PAYLOAD_TOO_LARGE), step(B3)),
        B3 => branch(done(StatusCode::OK), step(C3)),

        // Content negotiation.
        C3 => branch(step(C4), step(D4)),
        C4 => branch(step(D4), done(StatusCode::NOT_ACCEPTABLE)),
        D4 => branch(done(StatusCode::NOT_ACCEPTABLE), step(E5)),
        E5 => branch(done(StatusCode::NOT_ACCEPTABLE), step(F6)),
        F6 => branch(done(StatusCode::NOT_ACCEPTABLE), step(G7)),

        // Existence and preconditions.
        G7 => branch(step(G8), step(H7)),
        G8 => branch(done(StatusCode::PRECONDITION_FAILED), step(H10)),
        H7 => branch(done(StatusCode::PRECONDITION_FAILED), step(I7)),
        H10 => branch(done(StatusCode::PRECONDITION_FAILED), step(I12)),
        I7 => branch(step(P3), step(K7)),
        I12 => branch(done(StatusCode::NOT_MODIFIED), step(L13)),

        // Resources that are gone or were never there.
        K5 => branch(done(StatusCode::MOVED_PERMANENTLY), step(L5)),
        K7 => branch(step(K5), step(L7)),
        L5 => branch(done(StatusCode::TEMPORARY_REDIRECT), step(M5)),
        L7 => branch(step(M7), done(StatusCode::NOT_FOUND)),
        L13 => branch(done(StatusCode::NOT_MODIFIED), step(M16)),
        M5 => branch(step(N5), done(StatusCode::GONE)),
        M7 => branch(step(N11), done(StatusCode::NOT_FOUND)),
        N5 => branch(step(N11), done(StatusCode::GONE)),

        // Method-dispatch tail.
        M16 => branch(step(M20), step(N16)),
        M20 => branch(step(O20), done(StatusCode::ACCEPTED)),
        N11 => branch(done(StatusCode::SEE_OTHER), step(P11)),
        N16 => branch(step(N11), step(O16)),
        O14 => branch(done(StatusCode::CONFLICT), step(P11)),
        O16 => branch(step(O14), step(O18)),
        O18 => branch(done(StatusCode::MULTIPLE_CHOICES), done(StatusCode::OK)),
        O20 => branch(step(O18), done(StatusCode::NO_CONTENT)),
        P3 => branch(done(StatusCode::CONFLICT), step(P11)),
        P11 => branch(done(StatusCode::CREATED), step(O20)),
    }
}
