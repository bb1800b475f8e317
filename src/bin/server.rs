use std::process::ExitCode;

use axum_server::Handle;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{Config, build_router, create_app_state, graceful_shutdown, open_db};

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let config = Config::parse();

    let auth_guard = match config.auth_guard() {
        Ok(auth_guard) => auth_guard,
        Err(error) => {
            tracing::error!("Invalid configuration: {error}");
            return ExitCode::FAILURE;
        }
    };

    if auth_guard != expense_tracker::AuthGuard::Disabled {
        tracing::warn!(
            "The {:?} authorization check is a placeholder and does not authenticate clients.",
            config.auth_mode
        );
    }

    let connection = match open_db(&config.database_url) {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let state = match create_app_state(connection, auth_guard) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("{error}");
            return ExitCode::FAILURE;
        }
    };
    let expense_store = state.expense_store.clone();

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let addr = config.address();
    tracing::info!("HTTP server listening on {}", addr);
    let served = axum_server::bind(addr)
        .handle(handle)
        .serve(build_router(state).into_make_service())
        .await;

    let mut exit_code = ExitCode::SUCCESS;
    match served {
        Ok(()) => tracing::info!("Server gracefully stopped"),
        Err(error) => {
            tracing::error!("Error shutting down server: {error}");
            exit_code = ExitCode::FAILURE;
        }
    }

    match expense_store.close() {
        Ok(true) => tracing::info!("DB connection gracefully closed"),
        Ok(false) => tracing::warn!("DB connection is still in use and was left open"),
        Err(error) => {
            tracing::error!("Error closing db connection: {error}");
            exit_code = ExitCode::FAILURE;
        }
    }

    exit_code
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_log)
        .init();
}
