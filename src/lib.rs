//! Declarative HTTP resources driven by a decision state machine.
//!
//! Resource authors supply a handful of named callbacks (method gating,
//! malformedness, existence, content-type providers); the engine walks a
//! fixed HTTP decision graph and arrives at a semantically correct status
//! code and negotiated body.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────┐
//!                   │                 DECISION SERVER               │
//!                   │                                               │
//!   Client Request  │  ┌─────────┐   ┌──────────┐   ┌────────────┐ │
//!   ────────────────┼─▶│  http   │──▶│ machine  │──▶│  resource  │ │
//!                   │  │ server  │   │  driver  │   │ callbacks  │ │
//!                   │  └─────────┘   └────┬─────┘   └────────────┘ │
//!                   │                     │                         │
//!                   │                     ▼                         │
//!                   │               ┌──────────┐   ┌────────────┐  │
//!   Client Response │               │  graph + │   │   conneg   │  │
//!   ◀───────────────┼───────────────│transitions│◀──│  matcher   │  │
//!                   │               └──────────┘   └────────────┘  │
//!                   │                                               │
//!                   │  config · lifecycle · observability           │
//!                   └──────────────────────────────────────────────┘
//! ```

// Decision core
pub mod conneg;
pub mod machine;
pub mod resource;

// HTTP model and axum embedding
pub mod http;

// Server runtime
pub mod config;
pub mod lifecycle;
pub mod observability;

// Bundled demo resources
pub mod demo;

pub use config::ServerConfig;
pub use http::{Body, HttpServer, Mount, Provider, Request, Response};
pub use lifecycle::Shutdown;
pub use machine::{Engine, EngineError};
pub use resource::{
    CallbackError, CallbackMap, CallbackName, CallbackResult, CallbackReturn, Heap, MethodSet,
    ProviderOffers,
};
