//! Extracting an expense from a request body.

use axum::{
    Json,
    body::Body,
    extract::{FromRequest, Request},
};

use crate::{Error, body::buffer_request_body, expense::ExpenseData};

/// An [ExpenseData] decoded from a JSON request body.
///
/// A request without a body decodes to [ExpenseData::default], the same as an
/// empty JSON object. A non-empty body must be JSON sent with a JSON content
/// type.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseBody(pub ExpenseData);

impl<S> FromRequest<S> for ExpenseBody
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();
        let bytes = buffer_request_body(body).await?;

        if bytes.is_empty() {
            return Ok(Self(ExpenseData::default()));
        }

        let request = Request::from_parts(parts, Body::from(bytes));
        let Json(data) = Json::<ExpenseData>::from_request(request, state)
            .await
            .map_err(|rejection| Error::InvalidJson(rejection.body_text()))?;

        Ok(Self(data))
    }
}
