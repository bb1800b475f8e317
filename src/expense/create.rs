//! Expense creation endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState, Error,
    expense::{Expense, ExpenseBody, ExpenseStore},
};

/// A route handler for creating a new expense.
///
/// Responds with 201 Created and the stored expense, including its new ID.
/// A request without a body creates an expense with zero values.
///
/// # Errors
/// Responds with 400 if the body is not a valid expense and 500 if the
/// expense could not be stored.
pub async fn create_expense_endpoint<S>(
    State(state): State<AppState<S>>,
    ExpenseBody(data): ExpenseBody,
) -> Result<(StatusCode, Json<Expense>), Error>
where
    S: ExpenseStore,
{
    let expense = state.expense_store.create(data)?;

    Ok((StatusCode::CREATED, Json(expense)))
}
