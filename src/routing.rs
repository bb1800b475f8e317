//! Application router configuration.

use axum::{
    Json, Router,
    extract::{FromRef, MatchedPath, Request},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    auth::{AuthGuard, auth_guard},
    endpoints,
    expense::{
        ExpenseStore, create_expense_endpoint, get_all_expenses_endpoint, get_expense_endpoint,
        update_expense_endpoint,
    },
    logging::logging_middleware,
};

/// Return a router with all the app's routes.
///
/// Every request is traced and logged. The expense routes are additionally
/// protected by the state's [AuthGuard].
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: ExpenseStore + Clone + Send + Sync + 'static,
{
    let auth_state = AuthGuard::from_ref(&state);

    let router = Router::new()
        .route(
            endpoints::EXPENSES,
            post(create_expense_endpoint::<S>).get(get_all_expenses_endpoint::<S>),
        )
        .route(
            endpoints::EXPENSE,
            get(get_expense_endpoint::<S>).put(update_expense_endpoint::<S>),
        )
        .layer(middleware::from_fn_with_state(auth_state, auth_guard))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state);

    add_tracing_layer(router)
}

async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))).into_response()
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but the handlers
        // already log their own errors.
        .on_failure(());

    router.layer(tracing_layer)
}


#[cfg(test)]
mod router_tests {
    use std::sync::{Arc, Mutex};

    use axum::http::{HeaderValue, StatusCode, header::AUTHORIZATION};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{
        AppState, AuthGuard, EXPENSE, EXPENSES, build_router, db::initialize,
        expense::SQLiteExpenseStore, format_endpoint, test_utils::EXPENSE_JSON,
    };

    fn date_authorization() -> HeaderValue {
        HeaderValue::from_static("November 10, 2009")
    }

    fn get_server_with_date_guard() -> TestServer {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let state = AppState::new(
            SQLiteExpenseStore::new(Arc::new(Mutex::new(connection))),
            AuthGuard::DateHeader,
        );

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn create_get_update_scenario() {
        let server = get_server_with_date_guard();

        let response = server
            .post(EXPENSES)
            .add_header(AUTHORIZATION, date_authorization())
            .bytes(EXPENSE_JSON.into())
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::CREATED);
        let created = response.json::<Value>();
        let id = created["id"].as_i64().expect("id should be an integer");
        assert!(id > 0);
        assert_eq!(
            created,
            json!({
                "id": id,
                "title": "strawberry smoothie",
                "amount": 79,
                "note": "night market promotion discount 10 bath",
                "tags": ["food", "beverage"]
            })
        );

        let response = server
            .get(&format_endpoint(EXPENSE, id))
            .add_header(AUTHORIZATION, date_authorization())
            .await;
        response.assert_status_ok();
        response.assert_json(&created);

        let response = server
            .put(&format_endpoint(EXPENSE, id))
            .add_header(AUTHORIZATION, date_authorization())
            .json(&json!({ "title": "x", "amount": 1, "note": "y", "tags": [] }))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({
            "id": id,
            "title": "x",
            "amount": 1,
            "note": "y",
            "tags": []
        }));
    }

    #[tokio::test]
    async fn requests_without_date_header_are_unauthorized() {
        let server = get_server_with_date_guard();

        let response = server.get(EXPENSES).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_text("Unauthorized");
    }

    #[tokio::test]
    async fn requests_with_non_date_header_are_unauthorized() {
        let server = get_server_with_date_guard();

        let response = server
            .post(EXPENSES)
            .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"))
            .bytes(EXPENSE_JSON.into())
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn list_on_empty_table_is_empty_array() {
        let server = get_server_with_date_guard();

        let response = server
            .get(EXPENSES)
            .add_header(AUTHORIZATION, date_authorization())
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_server_with_date_guard();

        let response = server
            .get("/receipts")
            .add_header(AUTHORIZATION, date_authorization())
            .await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "message": "not found" }));
    }

    #[tokio::test]
    async fn delete_is_not_allowed() {
        let server = get_server_with_date_guard();

        let response = server
            .delete(&format_endpoint(EXPENSE, 1))
            .add_header(AUTHORIZATION, date_authorization())
            .await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}
