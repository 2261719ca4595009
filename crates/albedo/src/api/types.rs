//! Shared state and response helpers for the HTTP API.

use crate::capabilities::CapabilitiesCache;
use crate::error::{BoxError, RequestError};
use crate::reflection::EndpointRegistry;
use crate::response::ResponseBuilder;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Body;
use hyper::{Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, enabled, Level};

/// State shared by every request handler
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub registry: Arc<EndpointRegistry>,
    pub capabilities: Arc<CapabilitiesCache>,
}

impl AppState {
    pub fn new(registry: Arc<EndpointRegistry>, capabilities: Arc<CapabilitiesCache>) -> Self {
        Self {
            registry,
            capabilities,
        }
    }
}

// =============================================================================
// Response helper functions
// =============================================================================

/// Create a JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());
    ResponseBuilder::new(status)
        .header("Content-Type", "application/json")
        .body(json)
        .build()
}

/// Create a plain-text response
pub fn text_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    ResponseBuilder::new(status).text(message).build()
}

/// Create an empty 200 response
pub fn empty_response() -> Response<Full<Bytes>> {
    ResponseBuilder::new(StatusCode::OK).build()
}

/// Map a request error to the 400 the client sees
pub fn bad_request(error: &RequestError) -> Response<Full<Bytes>> {
    text_response(StatusCode::BAD_REQUEST, &error.to_string())
}

// =============================================================================
// Request helper functions
// =============================================================================

/// Collect request body into bytes
pub async fn collect_body<B>(req: Request<B>) -> Result<Bytes, RequestError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    debug!("Reading body");
    let body = req
        .into_body()
        .collect()
        .await
        .map(|c| c.to_bytes())
        .map_err(|e| RequestError::UnreadableBody(e.into()))?;

    if enabled!(Level::DEBUG) {
        let (size, unit) = human_readable_size(body.len() as u64);
        debug!("Body size: {}{}", size, unit);
    }
    Ok(body)
}

/// Collect the request body and parse it as JSON
pub async fn read_json<T, B>(req: Request<B>) -> Result<T, RequestError>
where
    T: DeserializeOwned,
    B: Body,
    B::Error: Into<BoxError>,
{
    let body = collect_body(req).await?;
    serde_json::from_slice(&body).map_err(RequestError::InvalidJson)
}

/// First value of a query parameter, percent-decoded
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    query?
        .split('&')
        .filter_map(|pair| match pair.split_once('=') {
            Some((key, value)) => Some((key, value)),
            None if !pair.is_empty() => Some((pair, "")),
            None => None,
        })
        .find(|(key, _)| decode_component(key) == name)
        .map(|(_, value)| decode_component(value))
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

/// Scale a byte count down by thousands while it exceeds 10000
pub fn human_readable_size(bytes: u64) -> (u64, &'static str) {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes;
    let mut unit = 0;
    while size > 10_000 {
        size /= 1000;
        unit += 1;
    }
    (size, UNITS.get(unit).copied().unwrap_or("(too big...)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param() {
        assert_eq!(query_param(Some("quiet=true"), "quiet").as_deref(), Some("true"));
        assert_eq!(
            query_param(Some("a=1&quiet=false&quiet=true"), "quiet").as_deref(),
            Some("false")
        );
        assert_eq!(query_param(Some("quiet"), "quiet").as_deref(), Some(""));
        assert_eq!(query_param(Some("q%75iet=tr%75e"), "quiet").as_deref(), Some("true"));
        assert_eq!(query_param(Some("a=b+c"), "a").as_deref(), Some("b c"));
        assert_eq!(query_param(Some("other=1"), "quiet"), None);
        assert_eq!(query_param(Some(""), "quiet"), None);
        assert_eq!(query_param(None, "quiet"), None);
    }

    #[test]
    fn test_human_readable_size() {
        assert_eq!(human_readable_size(0), (0, "B"));
        assert_eq!(human_readable_size(10_000), (10_000, "B"));
        assert_eq!(human_readable_size(10_001), (10, "KB"));
        assert_eq!(human_readable_size(25_000_000), (25, "MB"));
        assert_eq!(human_readable_size(5_000_000_000_000), (5000, "GB"));
        assert_eq!(human_readable_size(50_000_000_000_000_000), (50, "(too big...)"));
    }

    #[test]
    fn test_json_response() {
        let body = serde_json::json!({"test": "value"});
        let resp = json_response(StatusCode::OK, &body);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_empty_response() {
        let resp = empty_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().is_empty());
    }

    #[tokio::test]
    async fn test_read_json_invalid() {
        let req = Request::new(Full::new(Bytes::from_static(b"{not json")));
        let result: Result<serde_json::Value, _> = read_json(req).await;
        assert!(matches!(result, Err(RequestError::InvalidJson(_))));
    }

    #[tokio::test]
    async fn test_read_json_valid() {
        let req = Request::new(Full::new(Bytes::from_static(br#"{"a": 1}"#)));
        let value: serde_json::Value = read_json(req).await.unwrap();
        assert_eq!(value["a"], 1);
    }
}
