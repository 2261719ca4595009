//! Error types shared by the reflection engine and the HTTP handlers.
//!
//! The `Display` text of each variant is what the client receives as the
//! plain-text body of the 400 response.

/// Boxed error produced by a request body stream
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while turning a [`ResponseSpec`](crate::reflection::ResponseSpec)
/// into a response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReflectionError {
    #[error("Invalid status code: {0}")]
    InvalidStatus(i64),
    #[error("Informational status {0} cannot be reflected as a final response")]
    InformationalStatus(i64),
    #[error("invalid base64 encoding of response body")]
    InvalidEncoding,
}

/// Errors raised while reading a reflection or configuration request
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Failed to parse request body")]
    UnreadableBody(#[source] BoxError),
    #[error("Invalid JSON in request body")]
    InvalidJson(#[source] serde_json::Error),
}
