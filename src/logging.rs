//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::{Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use time::OffsetDateTime;
use tokio::time::Instant;

use crate::body::buffer_request_body;

/// Bodies longer than this many bytes are truncated in `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// The method, URI, status, time taken and the time the request arrived are
/// logged at the `info` level along with the bodies. If a body is longer than
/// [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated and logged in full at the
/// `debug` level.
///
/// Request bodies over the 2 MiB body limit are rejected with 413 Payload Too
/// Large before reaching the inner service.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let received_at = OffsetDateTime::now_utc();
    let start = Instant::now();

    let (parts, body) = request.into_parts();
    let body_bytes = match buffer_request_body(body).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!(
                "Could not read request body for {} {}: {error}",
                parts.method,
                parts.uri
            );
            return error.into_response();
        }
    };
    log_request(&parts.method, &parts.uri, &String::from_utf8_lossy(&body_bytes));

    let method = parts.method.clone();
    let uri = parts.uri.clone();
    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    tracing::info!(
        "REQUEST: method: {method}, uri: {uri}, status: {}, elapsed: {:?}, datetime: {received_at}",
        parts.status.as_u16(),
        start.elapsed(),
    );
    log_response(parts.status, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

fn truncate(body: &str) -> &str {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        return body;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

fn log_request(method: &Method, uri: &Uri, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!("Received request: {method} {uri}\nbody: {:}...", truncate(body));
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {method} {uri}\nbody: {body:?}");
    }
}

fn log_response(status: StatusCode, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!("Sending response: {status}\nbody: {:}...", truncate(body));
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {status}\nbody: {body:?}");
    }
}
