//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//! ```
//!
//! Config is immutable once loaded; all fields have defaults so a
//! minimal (or absent) file works.

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::{ListenerConfig, ObservabilityConfig, ServerConfig, TimeoutConfig};
