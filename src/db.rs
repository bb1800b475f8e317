//! Opening the application database and creating its schema.

use rusqlite::Connection;

use crate::Error;

const SQLITE_SCHEME: &str = "sqlite://";

/// Open the SQLite database named by `connection_string`.
///
/// Accepts a file path, `:memory:`, a `file:` URI or any of these prefixed
/// with `sqlite://`.
///
/// # Errors
/// Returns an [Error::InvalidConnectionString] if the string is empty, or an
/// [Error::Connection] if SQLite cannot open the database.
pub fn open(connection_string: &str) -> Result<Connection, Error> {
    let target = connection_string
        .strip_prefix(SQLITE_SCHEME)
        .unwrap_or(connection_string)
        .trim();

    if target.is_empty() {
        return Err(Error::InvalidConnectionString(
            connection_string.to_owned(),
        ));
    }

    Connection::open(target).map_err(Error::Connection)
}

/// Create the expenses table if it does not exist yet.
///
/// # Errors
/// Returns an [Error::Schema] if the statement fails. Callers should treat
/// this as fatal.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection
        .execute_batch(
            "CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT,
                amount REAL,
                note TEXT,
                tags TEXT
            );",
        )
        .map_err(Error::Schema)
}
