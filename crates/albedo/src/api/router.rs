//! Route dispatch logic.
//!
//! Known routes match on method and path, with a single trailing slash
//! accepted as an alias. Paths below a known route (`/reflect/x`,
//! `/capabilities/x`) are not treated as part of it. Everything else goes to
//! the default handler, so those paths and any other method on a known path
//! are available as dynamic endpoints.

use crate::api::handlers::{reflection, system};
use crate::api::types::AppState;
use crate::error::BoxError;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Body;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::debug;

/// Parsed route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    /// Any method on /capabilities
    Capabilities,
    /// POST /reflect
    Reflect,
    /// POST /configure_reflection
    ConfigureReflection,
    /// PUT /reset
    Reset,
    /// Everything else
    Default,
}

impl Route {
    fn parse(method: &Method, path: &str) -> Self {
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };

        match (method, path) {
            (_, "/capabilities") => Route::Capabilities,
            (&Method::POST, "/reflect") => Route::Reflect,
            (&Method::POST, "/configure_reflection") => Route::ConfigureReflection,
            (&Method::PUT, "/reset") => Route::Reset,
            _ => Route::Default,
        }
    }
}

/// Main request router
pub async fn route_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let route = Route::parse(req.method(), req.uri().path());
    debug!("{} {} -> {:?}", req.method(), req.uri(), route);

    let response = match route {
        Route::Capabilities => system::handle_capabilities(req.uri().query(), &state),
        Route::Reflect => reflection::handle_reflect(req).await,
        Route::ConfigureReflection => reflection::handle_configure(req, &state).await,
        Route::Reset => reflection::handle_reset(&state),
        Route::Default => reflection::handle_default(&req, &state),
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    #[test]
    fn test_route_parse() {
        assert_eq!(Route::parse(&Method::GET, "/capabilities"), Route::Capabilities);
        assert_eq!(Route::parse(&Method::DELETE, "/capabilities/"), Route::Capabilities);
        assert_eq!(Route::parse(&Method::POST, "/reflect"), Route::Reflect);
        assert_eq!(Route::parse(&Method::POST, "/reflect/"), Route::Reflect);
        assert_eq!(
            Route::parse(&Method::POST, "/configure_reflection"),
            Route::ConfigureReflection
        );
        assert_eq!(
            Route::parse(&Method::POST, "/configure_reflection/"),
            Route::ConfigureReflection
        );
        assert_eq!(Route::parse(&Method::PUT, "/reset"), Route::Reset);
        assert_eq!(Route::parse(&Method::PUT, "/reset/"), Route::Reset);

        // Wrong method or unknown path falls through to the default handler
        assert_eq!(Route::parse(&Method::GET, "/reflect"), Route::Default);
        assert_eq!(Route::parse(&Method::GET, "/reset"), Route::Default);
        assert_eq!(Route::parse(&Method::POST, "/reflect/extra"), Route::Default);
        assert_eq!(Route::parse(&Method::POST, "/reflect//"), Route::Default);
        assert_eq!(Route::parse(&Method::GET, "/"), Route::Default);
        assert_eq!(Route::parse(&Method::GET, "/foo"), Route::Default);
    }

    #[test]
    fn test_subpaths_are_not_part_of_known_routes() {
        for (method, path) in [
            (Method::POST, "/reflect/anything"),
            (Method::GET, "/capabilities/x"),
            (Method::POST, "/configure_reflection/x"),
            (Method::PUT, "/reset/x/y"),
        ] {
            assert_eq!(Route::parse(&method, path), Route::Default, "{method} {path}");
        }
    }

    #[tokio::test]
    async fn test_route_request_end_to_end() {
        let state = Arc::new(AppState::default());
        let configure = Request::builder()
            .method(Method::POST)
            .uri("/configure_reflection/")
            .body(Full::new(Bytes::from_static(
                br#"{"status": 409, "body": "conflict", "endpoints": [{"method": "GET", "url": "/reflect"}]}"#,
            )))
            .unwrap();
        let response = route_request(configure, Arc::clone(&state)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // GET /reflect is not the reflect route, so it can be bound
        let get = Request::builder()
            .method(Method::GET)
            .uri("/reflect")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let response = route_request(get, Arc::clone(&state)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, "conflict");
    }
}
