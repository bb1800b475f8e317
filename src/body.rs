//! Buffering request bodies into memory.

use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request},
};

use crate::Error;

/// Read the whole request `body` into memory.
///
/// Reading stops at axum's default body limit of 2 MiB.
///
/// # Errors
/// Returns an [Error::PayloadTooLarge] if the body is over the limit, or an
/// [Error::InvalidJson] if it could not be read.
pub(crate) async fn buffer_request_body(body: Body) -> Result<Bytes, Error> {
    Bytes::from_request(Request::new(body), &())
        .await
        .map_err(Error::from)
}
