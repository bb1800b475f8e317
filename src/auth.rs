//! Placeholder authorization middleware.
//!
//! None of the guards here authenticate anyone. The date header check only
//! confirms that the client sends an `Authorization` header shaped like
//! `November 10, 2009`, and the token check compares the header against a
//! shared string. Do not rely on either to protect data.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The layout the `Authorization` header must follow in
/// [AuthGuard::DateHeader] mode, e.g. "November 10, 2009".
const DATE_HEADER_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:long case_sensitive:false] [day padding:none], [year]");

/// Decides which requests may reach the expense routes.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthGuard {
    /// The `Authorization` header must be a date such as "November 10, 2009".
    DateHeader,
    /// The `Authorization` header must equal the token.
    Token(String),
    /// Every request is let through.
    Disabled,
}

impl AuthGuard {
    /// Whether a request carrying `header` as its `Authorization` value passes.
    pub fn is_authorized(&self, header: Option<&str>) -> bool {
        match (self, header) {
            (AuthGuard::Disabled, _) => true,
            (_, None) => false,
            (AuthGuard::DateHeader, Some(header)) => parse_date_header(header).is_ok(),
            (AuthGuard::Token(token), Some(header)) => header == token,
        }
    }
}

/// Parse an `Authorization` header in the "Month D, YYYY" layout.
pub fn parse_date_header(header: &str) -> Result<Date, time::error::Parse> {
    Date::parse(header, DATE_HEADER_FORMAT)
}

/// Middleware function that rejects requests failing the [AuthGuard] check
/// with 401 Unauthorized.
pub async fn auth_guard(State(guard): State<AuthGuard>, request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if guard.is_authorized(header) {
        next.run(request).await
    } else {
        tracing::debug!(
            "Rejected {} {}: authorization header {header:?} failed the check",
            request.method(),
            request.uri()
        );
        Error::Unauthorized.into_response()
    }
}
