//! Dynamic endpoint registry.
//!
//! Maps `(method, url)` pairs to the response they were configured with.
//! Lookups share a read lock and run in parallel; registration and reset take
//! the write lock for the whole mutation, so a reader sees either all of a
//! batch or none of it.

use super::key::{EndpointKey, EndpointKeyer};
use super::types::{DynamicEndpointSpec, ResponseSpec};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Registry of configured dynamic endpoints
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    keyer: EndpointKeyer,
    endpoints: RwLock<HashMap<EndpointKey, Arc<ResponseSpec>>>,
}

impl EndpointRegistry {
    /// Create an empty registry with a freshly seeded keyer
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `spec` to every endpoint in `endpoints`, overwriting earlier bindings.
    pub fn register(&self, endpoints: &[DynamicEndpointSpec], spec: ResponseSpec) {
        let spec = Arc::new(spec);
        // Keys are computed before locking to keep the critical section short.
        let keys: Vec<EndpointKey> = endpoints
            .iter()
            .map(|endpoint| self.keyer.key(&endpoint.method, &endpoint.url))
            .collect();

        let mut map = self.endpoints.write();
        for key in keys {
            map.insert(key, Arc::clone(&spec));
        }
        debug!(
            "Registered {} dynamic endpoint(s), {} total",
            endpoints.len(),
            map.len()
        );
    }

    /// Find the spec bound to a literal method and request target.
    pub fn lookup(&self, method: &str, url: &str) -> Option<Arc<ResponseSpec>> {
        let key = self.keyer.key(method, url);
        self.endpoints.read().get(&key).cloned()
    }

    /// Remove every binding.
    pub fn clear(&self) {
        let mut map = self.endpoints.write();
        let removed = map.len();
        map.clear();
        debug!("Cleared {} dynamic endpoint(s)", removed);
    }

    pub fn len(&self) -> usize {
        self.endpoints.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.read().is_empty()
    }
}
