//! Periodic expiry sweep.

use std::sync::Arc;
use std::time::Duration;

use super::Registry;

/// Background worker that evicts expired registrations on a fixed
/// interval. Runs until the shutdown signal fires.
pub async fn sweep_worker(
    registry: Arc<Registry>,
    interval: Duration,
    mut shutdown: tokio::sync::broadcast::Receiver<()>,
) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "🧹 Expiry sweep worker started"
    );

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {
                let removed = registry.sweep().await;
                if removed > 0 {
                    tracing::info!(removed, "Swept expired registrations");
                } else {
                    tracing::debug!("Sweep pass found nothing to remove");
                }
            }
            _ = shutdown.recv() => {
                tracing::info!("🧹 Expiry sweep worker shutting down");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemoryStore;

    #[tokio::test]
    async fn worker_sweeps_on_interval_and_stops_on_shutdown() {
        let store = Arc::new(MemoryStore::new());
        // Zero TTL: everything is expired the moment it lands
        let registry = Arc::new(Registry::new(store, 0));

        registry.create("id-image".to_string()).await;
        assert_eq!(registry.active_count().await, 1);

        let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);
        let worker = tokio::spawn(sweep_worker(
            registry.clone(),
            Duration::from_millis(10),
            shutdown_rx,
        ));

        // Give the worker a few intervals to run a pass
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(registry.active_count().await, 0);

        shutdown_tx.send(()).expect("worker listening");
        worker.await.expect("worker exits cleanly");
    }
}
