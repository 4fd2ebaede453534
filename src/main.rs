//! Decision server binary.
//!
//! Mounts the demo resources and serves them. Pass a TOML config path as
//! the only argument; without one the defaults apply.

use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

use turnstile::config::loader::load_config;
use turnstile::demo::{self, FactStore};
use turnstile::{HttpServer, Mount, ServerConfig, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => ServerConfig::default(),
    };

    turnstile::observability::logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => turnstile::observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = Arc::new(FactStore::new());
    demo::seed_facts(&store);

    let mounts = vec![
        Mount::new("/facts", demo::facts_engine(store)?),
        Mount::new("/commands", demo::commands_engine()?),
    ];

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(config, mounts);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
