//! Structured logging.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to
/// this crate and `tower_http`.
pub fn init(log_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("turnstile={log_level},tower_http={log_level}"))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
