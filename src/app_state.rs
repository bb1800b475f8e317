//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{Error, auth::AuthGuard, db::initialize, expense::SQLiteExpenseStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<S> {
    /// The store for [expenses](crate::Expense).
    pub expense_store: S,
    /// The check applied to the `Authorization` header of every request.
    pub auth_guard: AuthGuard,
}

impl<S> AppState<S> {
    /// Create a new [AppState] around an existing store.
    pub fn new(expense_store: S, auth_guard: AuthGuard) -> Self {
        Self {
            expense_store,
            auth_guard,
        }
    }
}

impl<S> FromRef<AppState<S>> for AuthGuard {
    fn from_ref(state: &AppState<S>) -> Self {
        state.auth_guard.clone()
    }
}

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteExpenseStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the expenses table if it
/// is missing.
///
/// # Errors
/// Returns an [Error::Schema] if the table cannot be created.
pub fn create_app_state(
    db_connection: Connection,
    auth_guard: AuthGuard,
) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(SQLiteExpenseStore::new(connection), auth_guard))
}
