//! Response synthesis from a [`ResponseSpec`].

use super::types::ResponseSpec;
use crate::error::ReflectionError;
use crate::response::ResponseBuilder;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use tracing::{debug, info, warn};

/// Bodies longer than this many characters are shortened in the log.
pub const LOGGED_BODY_LIMIT: usize = 200;

/// Build the response described by `spec` for a request with the given
/// method and request target.
///
/// Configured headers are applied first and survive on every outcome. An
/// unusable status (out of range or 1xx) or an undecodable `encoded_body`
/// turns the response into a 400 with a plain-text explanation.
pub fn reflect(spec: &ResponseSpec, method: &str, target: &str) -> Response<Full<Bytes>> {
    info!("Reflecting response for '{}' request to '{}'", method, target);

    if !spec.log_message.is_empty() {
        info!("{}", spec.log_message);
    }

    let mut builder = ResponseBuilder::default();
    for (name, value) in &spec.headers {
        info!("Reflecting header '{}':'{}'", name, value);
        builder.append_header(name, value);
    }

    let status = match effective_status(spec.status) {
        Ok(status) => status,
        Err(e) => return reject(builder, e),
    };
    info!("Reflecting status '{}'", status.as_u16());
    let builder = builder.status(status);

    let body = match resolve_body(spec) {
        Ok(body) => body,
        Err(e) => return reject(builder, e),
    };

    if body.is_empty() {
        return builder.build();
    }

    info!("Reflecting body '{}'", truncate_for_log(&body));
    builder.body(body).build()
}

/// Map the configured status to the one to send. `0` selects 200 OK.
///
/// A 1xx code is never a final response, so it is refused rather than sent.
pub fn effective_status(status: i64) -> Result<StatusCode, ReflectionError> {
    if status == 0 {
        return Ok(StatusCode::OK);
    }
    if !(100..600).contains(&status) {
        return Err(ReflectionError::InvalidStatus(status));
    }
    if status < 200 {
        return Err(ReflectionError::InformationalStatus(status));
    }
    u16::try_from(status)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or(ReflectionError::InvalidStatus(status))
}

/// Pick the payload: `body` verbatim, else decoded `encoded_body`, else empty.
pub fn resolve_body(spec: &ResponseSpec) -> Result<Bytes, ReflectionError> {
    if !spec.body.is_empty() {
        return Ok(Bytes::from(spec.body.clone()));
    }
    if spec.encoded_body.is_empty() {
        return Ok(Bytes::new());
    }

    debug!("Decoding body");
    // Line breaks inside the encoded text are tolerated.
    let compact: String = spec
        .encoded_body
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect();
    STANDARD
        .decode(compact)
        .map(Bytes::from)
        .map_err(|_| ReflectionError::InvalidEncoding)
}

/// Render a body for the log, cut to [`LOGGED_BODY_LIMIT`] characters plus `...`.
pub fn truncate_for_log(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(LOGGED_BODY_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.into_owned(),
    }
}

fn reject(builder: ResponseBuilder, error: ReflectionError) -> Response<Full<Bytes>> {
    let message = error.to_string();
    match error {
        ReflectionError::InformationalStatus(_) => warn!("{}", message),
        _ => info!("{}", message),
    }
    builder
        .status(StatusCode::BAD_REQUEST)
        .text(message)
        .build()
}
