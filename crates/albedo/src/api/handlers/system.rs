//! System handlers: capabilities.

use crate::api::types::{json_response, query_param, text_response, AppState};
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use tracing::{error, info};

/// GET /capabilities[?quiet=true] - describe the available endpoints
pub fn handle_capabilities(query: Option<&str>, state: &AppState) -> Response<Full<Bytes>> {
    info!("Received capabilities request");

    let doc = match state.capabilities.get() {
        Ok(doc) => doc,
        Err(e) => {
            error!("{}", e);
            return text_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Capabilities are unavailable",
            );
        }
    };

    if query_param(query, "quiet").as_deref() == Some("true") {
        json_response(StatusCode::OK, &doc.quiet())
    } else {
        json_response(StatusCode::OK, doc)
    }
}
