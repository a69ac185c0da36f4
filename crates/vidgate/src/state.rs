//! Application state and shared resources.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::registry::{MemoryStore, Registry};
use crate::verify::{FaceVerifier, SimulatedVerifier};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Registration records and expiry policy
    pub registry: Arc<Registry>,

    /// Face verification capability
    pub verifier: Arc<dyn FaceVerifier>,
}

impl AppState {
    /// Create new application state with the in-memory store and the
    /// simulated verifier
    pub fn new(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let registry = Arc::new(Registry::new(store, config.registration.ttl_secs));

        let verifier = Arc::new(SimulatedVerifier::new(
            Duration::from_millis(config.verifier.delay_ms),
            config.verifier.failure_rate,
        ));

        Self {
            config,
            registry,
            verifier,
        }
    }
}
