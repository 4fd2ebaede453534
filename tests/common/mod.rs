//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use turnstile::demo::{self, FactStore};
use turnstile::{HttpServer, Mount, ServerConfig, Shutdown};

/// Start the demo server on `addr`. The returned handle stops it.
#[allow(dead_code)]
pub async fn start_demo_server(addr: SocketAddr) -> Shutdown {
    let mut config = ServerConfig::default();
    config.listener.bind_address = addr.to_string();

    let store = Arc::new(FactStore::new());
    demo::seed_facts(&store);
    let mounts = vec![
        Mount::new("/facts", demo::facts_engine(store).unwrap()),
        Mount::new("/commands", demo::commands_engine().unwrap()),
    ];

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, mounts);
    let listener = TcpListener::bind(addr).await.unwrap();
    let receiver = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    shutdown
}
