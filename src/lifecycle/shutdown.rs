//! Shutdown coordination for the server.

use tokio::sync::broadcast;

/// Graceful-shutdown broadcaster.
///
/// The server (and any other long-running task) holds a receiver and
/// drains when the signal fires. Triggering is idempotent; receivers that
/// subscribe after the trigger still observe a closed channel and stop.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Tasks that already exited are not an error.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Spawn a task that fires the signal on Ctrl+C.
    pub fn trigger_on_ctrl_c(&self) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Ctrl+C received");
                let _ = tx.send(());
            }
        });
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
