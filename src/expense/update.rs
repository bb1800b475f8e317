//! Expense update endpoint.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::PathRejection,
    },
    http::StatusCode,
};

use crate::{
    AppState, Error,
    expense::{Expense, ExpenseBody, ExpenseStore, parse_expense_id},
};

/// A route handler for replacing every field of an expense.
///
/// The update is applied by ID without checking that the expense exists, and
/// the response echoes the ID from the path with the new fields. A request
/// without a body resets every field to its zero value.
///
/// # Errors
/// Responds with 400 if the ID is not an integer or the body is not a valid
/// expense, and 500 if the update statement fails.
pub async fn update_expense_endpoint<S>(
    State(state): State<AppState<S>>,
    raw_id: Result<Path<String>, PathRejection>,
    body: Result<ExpenseBody, Error>,
) -> Result<(StatusCode, Json<Expense>), Error>
where
    S: ExpenseStore,
{
    let Path(raw_id) = raw_id.map_err(|rejection| Error::InvalidId(rejection.body_text()))?;
    let id = parse_expense_id(&raw_id).map_err(|error| Error::InvalidId(error.to_string()))?;
    let ExpenseBody(data) = body?;

    let expense = state.expense_store.update(id, data)?;

    Ok((StatusCode::OK, Json(expense)))
}
