//! Implements a SQLite backed expense store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row, types::Type};

use crate::{
    Error,
    expense::{Expense, ExpenseData, ExpenseId, ExpenseStore},
};

/// Stores expenses in the `expenses` table of a SQLite database.
///
/// Tags are stored as a JSON array in a text column.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The expenses table should already exist, see [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Close the underlying database connection.
    ///
    /// Returns `true` if the connection was closed. If other clones of the
    /// store are still alive the connection is left open for them and this
    /// function returns `false`.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if SQLite could not close the connection.
    pub fn close(self) -> Result<bool, Error> {
        let connection = match Arc::try_unwrap(self.connection) {
            Ok(mutex) => mutex.into_inner().map_err(|_| Error::DatabaseLockError)?,
            Err(_) => {
                tracing::warn!("database connection is still shared, leaving it open");
                return Ok(false);
            }
        };

        connection
            .close()
            .map(|()| true)
            .map_err(|(_, error)| Error::SqlError(error))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }

    fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
        let raw_tags: Option<String> = row.get(4)?;

        Ok(Expense {
            id: row.get(0)?,
            title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            amount: row.get::<_, Option<f64>>(2)?.unwrap_or_default(),
            note: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            tags: decode_tags(raw_tags, 4)?,
        })
    }
}

fn encode_tags(tags: &[String]) -> Result<String, rusqlite::Error> {
    serde_json::to_string(tags).map_err(|error| rusqlite::Error::ToSqlConversionFailure(error.into()))
}

fn decode_tags(raw_tags: Option<String>, column: usize) -> Result<Vec<String>, rusqlite::Error> {
    match raw_tags {
        Some(text) => serde_json::from_str(&text).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(column, Type::Text, error.into())
        }),
        None => Ok(Vec::new()),
    }
}

impl ExpenseStore for SQLiteExpenseStore {
    /// Insert a new expense and return it with the ID SQLite assigned.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error.
    fn create(&self, data: ExpenseData) -> Result<Expense, Error> {
        let tags = encode_tags(&data.tags)?;

        let expense = self
            .lock()?
            .prepare(
                "INSERT INTO expenses (title, amount, note, tags) VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, title, amount, note, tags",
            )?
            .query_row((&data.title, data.amount, &data.note, tags), Self::map_row)?;

        Ok(expense)
    }

    /// Retrieve an expense in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid expense,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, id: ExpenseId) -> Result<Expense, Error> {
        let expense = self
            .lock()?
            .prepare("SELECT id, title, amount, note, tags FROM expenses WHERE id = :id")?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(expense)
    }

    /// Retrieve all expenses without any explicit ordering.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn get_all(&self) -> Result<Vec<Expense>, Error> {
        self.lock()?
            .prepare("SELECT id, title, amount, note, tags FROM expenses")?
            .query_map([], Self::map_row)?
            .map(|maybe_expense| maybe_expense.map_err(Error::from))
            .collect()
    }

    /// Overwrite every field of the expense `id`.
    ///
    /// No error is returned if `id` matches no row, the returned expense
    /// simply reflects the requested state.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn update(&self, id: ExpenseId, data: ExpenseData) -> Result<Expense, Error> {
        let tags = encode_tags(&data.tags)?;

        let rows_affected = self.lock()?.execute(
            "UPDATE expenses SET title = ?2, amount = ?3, note = ?4, tags = ?5 WHERE id = ?1",
            (id, &data.title, data.amount, &data.note, tags),
        )?;

        if rows_affected == 0 {
            tracing::debug!("update of expense {id} matched no rows");
        }

        Ok(Expense::new(id, data))
    }
}
