#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use rusqlite::{Connection, ffi};

use crate::{
    AppState, AuthGuard, Error, build_router,
    db::initialize,
    expense::{Expense, ExpenseData, ExpenseId, ExpenseStore, SQLiteExpenseStore},
};

pub(crate) const EXPENSE_JSON: &str = r#"{
    "title": "strawberry smoothie",
    "amount": 79,
    "note": "night market promotion discount 10 bath",
    "tags": ["food", "beverage"]
}"#;

pub(crate) fn smoothie() -> ExpenseData {
    ExpenseData {
        title: "strawberry smoothie".to_owned(),
        amount: 79.0,
        note: "night market promotion discount 10 bath".to_owned(),
        tags: vec!["food".to_owned(), "beverage".to_owned()],
    }
}

/// App state backed by a fresh in-memory database with auth disabled.
pub(crate) fn get_test_state() -> AppState<SQLiteExpenseStore> {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not create expenses table");

    AppState::new(
        SQLiteExpenseStore::new(Arc::new(Mutex::new(connection))),
        AuthGuard::Disabled,
    )
}

/// A server for the full router over [get_test_state].
pub(crate) fn get_test_server() -> TestServer {
    TestServer::try_new(build_router(get_test_state())).expect("Could not create test server.")
}

/// A store where every operation fails like a broken disk would.
#[derive(Debug, Clone)]
pub(crate) struct FailingExpenseStore;

impl FailingExpenseStore {
    fn error() -> Error {
        Error::SqlError(rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_IOERR),
            Some("disk I/O error".to_owned()),
        ))
    }
}

impl ExpenseStore for FailingExpenseStore {
    fn create(&self, _data: ExpenseData) -> Result<Expense, Error> {
        Err(Self::error())
    }

    fn get(&self, _id: ExpenseId) -> Result<Expense, Error> {
        Err(Self::error())
    }

    fn get_all(&self) -> Result<Vec<Expense>, Error> {
        Err(Self::error())
    }

    fn update(&self, _id: ExpenseId, _data: ExpenseData) -> Result<Expense, Error> {
        Err(Self::error())
    }
}
