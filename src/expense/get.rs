//! Endpoints for reading expenses.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};

use crate::{
    AppState, Error,
    expense::{Expense, ExpenseStore, parse_expense_id},
};

/// A route handler for getting an expense by its database ID.
///
/// # Errors
/// Responds with 400 if the ID is not an integer, 404 if there is no expense
/// with that ID and 500 for any other storage error.
pub async fn get_expense_endpoint<S>(
    State(state): State<AppState<S>>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<(StatusCode, Json<Expense>), Error>
where
    S: ExpenseStore,
{
    let Path(raw_id) = raw_id.map_err(|rejection| Error::InvalidId(rejection.body_text()))?;
    let id = parse_expense_id(&raw_id)
        .map_err(|error| Error::InvalidId(format!("id should be int {error}")))?;

    let expense = state.expense_store.get(id)?;

    Ok((StatusCode::OK, Json(expense)))
}

/// A route handler for listing every expense.
///
/// The order of the expenses is whatever order the store returns them in.
///
/// # Errors
/// Responds with 500 if the expenses could not be read.
pub async fn get_all_expenses_endpoint<S>(
    State(state): State<AppState<S>>,
) -> Result<(StatusCode, Json<Vec<Expense>>), Error>
where
    S: ExpenseStore,
{
    let expenses = state.expense_store.get_all()?;

    Ok((StatusCode::OK, Json(expenses)))
}


#[cfg(test)]
mod get_all_expenses_endpoint_tests {
    use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

    use crate::{
        AppState, AuthGuard,
        expense::{Expense, ExpenseData, ExpenseStore, get_all_expenses_endpoint},
        test_utils::{FailingExpenseStore, get_test_server, get_test_state, smoothie},
    };

    #[tokio::test]
    async fn get_all_expenses_on_empty_table_returns_empty_array() {
        let server = get_test_server();

        let response = server.get("/expenses").await;

        response.assert_status_ok();
        response.assert_text("[]");
    }

    #[tokio::test]
    async fn get_all_expenses_returns_every_expense() {
        let state = get_test_state();
        let mut inserted = vec![
            state.expense_store.create(smoothie()).unwrap(),
            state
                .expense_store
                .create(ExpenseData {
                    title: "bus fare".to_owned(),
                    amount: 15.0,
                    note: String::new(),
                    tags: vec!["transport".to_owned()],
                })
                .unwrap(),
        ];

        let (status, Json(mut expenses)) = get_all_expenses_endpoint(State(state))
            .await
            .expect("Could not get expenses");

        assert_eq!(status, StatusCode::OK);
        inserted.sort_by_key(|expense| expense.id);
        expenses.sort_by_key(|expense| expense.id);
        assert_eq!(expenses, inserted);
    }

    #[tokio::test]
    async fn get_all_expenses_through_router() {
        let server = get_test_server();
        let created = server.post("/expenses").json(&smoothie()).await.json::<Expense>();

        let response = server.get("/expenses").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Expense>>(), vec![created]);
    }

    #[tokio::test]
    async fn get_all_expenses_store_failure_is_internal_server_error() {
        let state = AppState::new(FailingExpenseStore, AuthGuard::Disabled);

        let response = get_all_expenses_endpoint(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
