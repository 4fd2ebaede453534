//! Decision-node identifiers and step targets.

use axum::http::StatusCode;

/// The decision nodes of the graph, named by their position in the HTTP
/// decision diagram the graph is drawn from (column letter + row number,
/// starting at b13).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    B13,
    B12,
    B11,
    B10,
    B9,
    B8,
    B7,
    B6,
    B5,
    B4,
    B3,
    C3,
    C4,
    D4,
    E5,
    F6,
    G7,
    G8,
    H7,
    H10,
    I7,
    I12,
    K5,
    K7,
    L5,
    L7,
    L13,
    M5,
    M7,
    M16,
    M20,
    N5,
    N11,
    N16,
    O14,
    O16,
    O18,
    O20,
    P3,
    P11,
}

impl StateId {
    /// Every decision node, in diagram order.
    pub const ALL: [StateId; 40] = [
        StateId::B13,
        StateId::B12,
        StateId::B11,
        StateId::B10,
        StateId::B9,
        StateId::B8,
        StateId::B7,
        StateId::B6,
        StateId::B5,
        StateId::B4,
        StateId::B3,
        StateId::C3,
        StateId::C4,
        StateId::D4,
        StateId::E5,
        StateId::F6,
        StateId::G7,
        StateId::G8,
        StateId::H7,
        StateId::H10,
        StateId::I7,
        StateId::I12,
        StateId::K5,
        StateId::K7,
        StateId::L5,
        StateId::L7,
        StateId::L13,
        StateId::M5,
        StateId::M7,
        StateId::M16,
        StateId::M20,
        StateId::N5,
        StateId::N11,
        StateId::N16,
        StateId::O14,
        StateId::O16,
        StateId::O18,
        StateId::O20,
        StateId::P3,
        StateId::P11,
    ];

    /// Every walk enters the graph here.
    pub const START: StateId = StateId::B13;

    /// Diagram name of the node.
    pub fn name(self) -> &'static str {
        match self {
            StateId::B13 => "b13",
            StateId::B12 => "b12",
            StateId::B11 => "b11",
            StateId::B10 => "b10",
            StateId::B9 => "b9",
            StateId::B8 => "b8",
            StateId::B7 => "b7",
            StateId::B6 => "b6",
            StateId::B5 => "b5",
            StateId::B4 => "b4",
            StateId::B3 => "b3",
            StateId::C3 => "c3",
            StateId::C4 => "c4",
            StateId::D4 => "d4",
            StateId::E5 => "e5",
            StateId::F6 => "f6",
            StateId::G7 => "g7",
            StateId::G8 => "g8",
            StateId::H7 => "h7",
            StateId::H10 => "h10",
            StateId::I7 => "i7",
            StateId::I12 => "i12",
            StateId::K5 => "k5",
            StateId::K7 => "k7",
            StateId::L5 => "l5",
            StateId::L7 => "l7",
            StateId::L13 => "l13",
            StateId::M5 => "m5",
            StateId::M7 => "m7",
            StateId::M16 => "m16",
            StateId::M20 => "m20",
            StateId::N5 => "n5",
            StateId::N11 => "n11",
            StateId::N16 => "n16",
            StateId::O14 => "o14",
            StateId::O16 => "o16",
            StateId::O18 => "o18",
            StateId::O20 => "o20",
            StateId::P3 => "p3",
            StateId::P11 => "p11",
        }
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a step lands: another decision node, or a terminal status that
/// ends the walk and becomes the response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Keep walking from this node.
    Decision(StateId),
    /// Stop; the status code is the outcome of the request.
    Done(StatusCode),
}

/// The statuses a walk can terminate at.
pub const TERMINAL_STATUSES: [StatusCode; 24] = [
    StatusCode::OK,
    StatusCode::CREATED,
    StatusCode::ACCEPTED,
    StatusCode::NO_CONTENT,
    StatusCode::MULTIPLE_CHOICES,
    StatusCode::MOVED_PERMANENTLY,
    StatusCode::SEE_OTHER,
    StatusCode::NOT_MODIFIED,
    StatusCode::TEMPORARY_REDIRECT,
    StatusCode::BAD_REQUEST,
    StatusCode::UNAUTHORIZED,
    StatusCode::FORBIDDEN,
    StatusCode::NOT_FOUND,
    StatusCode::METHOD_NOT_ALLOWED,
    StatusCode::NOT_ACCEPTABLE,
    StatusCode::CONFLICT,
    StatusCode::GONE,
    StatusCode::PRECONDITION_FAILED,
    StatusCode::PAYLOAD_TOO_LARGE,
    StatusCode::URI_TOO_LONG,
    StatusCode::UNSUPPORTED_MEDIA_TYPE,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::NOT_IMPLEMENTED,
    StatusCode::SERVICE_UNAVAILABLE,
];
