//! Lifecycle management subsystem.
//!
//! Shutdown is a broadcast: the binary triggers it on SIGINT and every
//! long-running task drains on receipt.

pub mod shutdown;

pub use shutdown::Shutdown;
