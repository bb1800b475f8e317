//! Defines the app level error type and its conversion to JSON responses.

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The message sent to clients when an expense ID does not match any row.
pub const EXPENSE_NOT_FOUND_MESSAGE: &str = "expense not found with given id";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The expense ID in the request path is not an integer.
    ///
    /// Callers should pass in the complete message to show the client, which
    /// should include the original parse error.
    #[error("{0}")]
    InvalidId(String),

    /// The request body could not be decoded as an expense.
    ///
    /// Callers should pass in the decoder's diagnostic unchanged.
    #[error("{0}")]
    InvalidJson(String),

    /// The request body is larger than the body limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The requested expense was not found.
    ///
    /// Internally, this error occurs when a query returns no rows.
    #[error("expense not found with given id")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("{0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The request did not pass the authorization check.
    #[error("Unauthorized")]
    Unauthorized,

    /// The database named by the connection string could not be opened.
    #[error("could not open database: {0}")]
    Connection(rusqlite::Error),

    /// The connection string was empty or otherwise unusable.
    #[error("invalid database connection string \"{0}\"")]
    InvalidConnectionString(String),

    /// The expenses table could not be created.
    #[error("can't create table: {0}")]
    Schema(rusqlite::Error),

    /// Token authorization was selected without a token to compare against.
    #[error("the auth mode 'token' requires an auth token to be set")]
    MissingAuthToken,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<BytesRejection> for Error {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Error::PayloadTooLarge(rejection.body_text())
        } else {
            Error::InvalidJson(rejection.body_text())
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidId(_) | Error::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::Connection(_)
            | Error::InvalidConnectionString(_)
            | Error::Schema(_)
            | Error::MissingAuthToken => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            // The auth check answers in plain text rather than JSON.
            Error::Unauthorized => (status, "Unauthorized").into_response(),
            error => (status, Json(json!({ "message": error.to_string() }))).into_response(),
        }
    }
}
