//! Endpoint key derivation.

use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};

/// Lookup key of the dynamic endpoint registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointKey(u64);

impl fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Derives [`EndpointKey`]s from `(method, url)` pairs.
///
/// The seed is chosen when the keyer is created, so keys are only comparable
/// between calls on the same instance. Every call hashes with a fresh hasher;
/// the keyer itself holds no mutable state and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct EndpointKeyer {
    state: RandomState,
}

impl EndpointKeyer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the key for a literal method and request target.
    pub fn key(&self, method: &str, url: &str) -> EndpointKey {
        let mut hasher = self.state.build_hasher();
        // `str` hashing appends a terminator, so ("GE", "T/x") and ("GET", "/x") differ.
        method.hash(&mut hasher);
        url.hash(&mut hasher);
        EndpointKey(hasher.finish())
    }
}
