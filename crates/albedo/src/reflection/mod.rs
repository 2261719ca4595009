//! Reflection of caller-specified responses.
//!
//! - `types`: wire types (`ResponseSpec`, `DynamicEndpointSpec`, `ConfigureReflectionRequest`)
//! - `key`: endpoint key derivation
//! - `registry`: dynamic endpoint registry
//! - `engine`: response synthesis

mod engine;
mod key;
mod registry;
mod types;


pub use engine::{effective_status, reflect, resolve_body, truncate_for_log, LOGGED_BODY_LIMIT};
pub use key::{EndpointKey, EndpointKeyer};
pub use registry::EndpointRegistry;
pub use types::{ConfigureReflectionRequest, DynamicEndpointSpec, ResponseSpec};
