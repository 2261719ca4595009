//! Capabilities document describing the routes of this server.
//!
//! The descriptor is embedded at build time as YAML, parsed on first use and
//! cached for the life of the cache instance.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

const EMBEDDED_DESCRIPTOR: &str = include_str!("capabilities.yaml");

/// Parsed capabilities document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitiesDoc {
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

/// A single route description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl CapabilitiesDoc {
    /// Parse a YAML descriptor
    pub fn from_yaml(source: &str) -> Result<Self, CapabilitiesError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Projection keeping only the path of each endpoint, in order
    pub fn quiet(&self) -> Self {
        Self {
            endpoints: self
                .endpoints
                .iter()
                .map(|endpoint| Endpoint {
                    path: endpoint.path.clone(),
                    ..Default::default()
                })
                .collect(),
        }
    }
}

/// Error loading the capabilities descriptor
#[derive(Debug, thiserror::Error)]
pub enum CapabilitiesError {
    #[error("Failed to parse capabilities descriptor: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Lazily parsed, shared capabilities document.
///
/// Concurrent first callers block on the same initialization; the descriptor
/// is parsed at most once per successful load.
#[derive(Debug)]
pub struct CapabilitiesCache {
    source: Cow<'static, str>,
    doc: OnceCell<CapabilitiesDoc>,
}

impl Default for CapabilitiesCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CapabilitiesCache {
    /// Cache backed by the descriptor built into the binary
    pub fn new() -> Self {
        Self::from_source(EMBEDDED_DESCRIPTOR)
    }

    /// Cache backed by a custom YAML descriptor
    pub fn from_source(source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            source: source.into(),
            doc: OnceCell::new(),
        }
    }

    /// Return the cached document, parsing it on first access.
    pub fn get(&self) -> Result<&CapabilitiesDoc, CapabilitiesError> {
        self.doc.get_or_try_init(|| {
            debug!("Loading capabilities descriptor");
            CapabilitiesDoc::from_yaml(&self.source)
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.doc.get().is_some()
    }
}
