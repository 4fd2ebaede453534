//! HTTP values and the axum embedding.
//!
//! `request.rs` and `response.rs` define the engine-side shapes the walk
//! reads and accumulates; `server.rs` bridges them to axum, one mount per
//! resource.

pub mod request;
pub mod response;
pub mod server;

pub use request::Request;
pub use response::{Body, Provider, Response};
pub use server::{HttpServer, Mount};
