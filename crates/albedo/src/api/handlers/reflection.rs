//! Reflection handlers: default traffic, stateless reflect, configure, reset.

use crate::api::types::{bad_request, empty_response, read_json, AppState};
use crate::error::BoxError;
use crate::reflection::{reflect, ConfigureReflectionRequest, ResponseSpec};
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Body;
use hyper::{Request, Response};
use tracing::{debug, info, warn};

/// Any unmatched route: reflect the configured endpoint or answer an empty 200.
pub fn handle_default<B>(req: &Request<B>, state: &AppState) -> Response<Full<Bytes>> {
    let method = req.method().as_str();
    let target = req.uri().to_string();

    match state.registry.lookup(method, &target) {
        Some(spec) => reflect(&spec, method, &target),
        None => {
            info!("Received default request to {}", target);
            empty_response()
        }
    }
}

/// POST /reflect - reflect the response described by the body, once
pub async fn handle_reflect<B>(req: Request<B>) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    info!("Received reflection request");
    let method = req.method().clone();
    let target = req.uri().to_string();

    let spec: ResponseSpec = match read_json(req).await {
        Ok(spec) => spec,
        Err(e) => {
            warn!("{}", e);
            return bad_request(&e);
        }
    };

    reflect(&spec, method.as_str(), &target)
}

/// POST /configure_reflection - bind a response to a set of endpoints
pub async fn handle_configure<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    info!("Received configuration request");

    let request: ConfigureReflectionRequest = match read_json(req).await {
        Ok(request) => request,
        Err(e) => {
            info!("{}", e);
            return bad_request(&e);
        }
    };

    for endpoint in &request.endpoints {
        debug!("Binding '{}' request to '{}'", endpoint.method, endpoint.url);
    }
    state
        .registry
        .register(&request.endpoints, request.response);
    info!(
        "Configured {} dynamic endpoint(s)",
        request.endpoints.len()
    );

    empty_response()
}

/// PUT /reset - discard every dynamic endpoint
pub fn handle_reset(state: &AppState) -> Response<Full<Bytes>> {
    info!("Received reset request. Discarding all endpoint configurations now");
    state.registry.clear();
    empty_response()
}
