//! The decision state machine.
//!
//! # Data Flow
//! ```text
//! Request
//!     → driver.rs (fresh heap + response, walk from b13)
//!     → transitions.rs (answer the current node's question;
//!       fixed check, stub polarity, or callback dispatch)
//!     → graph.rs (successor for that answer)
//!     → ... until a terminal status
//!     → driver.rs (assign status, invoke the negotiated provider)
//! Response
//! ```
//!
//! The graph is compile-time constant and acyclic; a walk visits each
//! node at most once. All per-request state lives in the walk, so one
//! engine serves concurrent requests without sharing anything mutable.

pub mod driver;
pub mod graph;
pub mod state;

mod transitions;

pub use driver::{Engine, EngineError};
pub use state::{State, StateId, TERMINAL_STATUSES};
