//! A small REST service for tracking expenses.
//!
//! Expenses (a title, an amount, a note and a list of tags) can be created,
//! listed, fetched by ID and updated over JSON. They are stored in a single
//! SQLite table.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod body;
mod config;
mod db;
mod endpoints;
mod error;
mod expense;
mod logging;
mod routing;

#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, SQLAppState, create_app_state};
pub use auth::{AuthGuard, auth_guard, parse_date_header};
pub use config::{AuthMode, Config};
pub use db::{initialize as initialize_db, open as open_db};
pub use endpoints::{EXPENSE, EXPENSES, format_endpoint};
pub use error::{EXPENSE_NOT_FOUND_MESSAGE, Error};
pub use expense::{
    Expense, ExpenseBody, ExpenseData, ExpenseId, ExpenseStore, SQLiteExpenseStore, create_expense_endpoint,
    get_all_expenses_endpoint, get_expense_endpoint, update_expense_endpoint,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// How long in-flight requests may take to finish once shutdown starts.
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`. Open connections get
/// [SHUTDOWN_GRACE_PERIOD] to finish before they are closed.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
        },
    }

    tracing::info!(
        "Shutting down, waiting up to {:?} for open requests",
        SHUTDOWN_GRACE_PERIOD
    );
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
}
