/**
 * API Route Handlers
 *
 * This module defines the HTTP surface of the service.
 *
 * # Routes
 *
 * ## Public
 * - `GET /` - Service index
 * - `POST /register` - Account registration
 * - `POST /login` - Credential check (issues a session cookie in session mode)
 *
 * ## Protected
 * - `GET /tasks` - The caller's task list
 *
 * ## Session mode only
 * - `POST /logout` - Revoke the current session
 */

use axum::{
    extract::State,
    middleware::from_fn_with_state,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use crate::backend::auth::{login, logout, register};
use crate::backend::middleware::{gate_middleware, AccessGate};
use crate::backend::server::config::AuthMode;
use crate::backend::server::state::AppState;
use crate::backend::tasks::list_tasks;

/// Configure API routes
///
/// # Authentication
///
/// `/tasks` sits behind [`gate_middleware`], which resolves the caller with
/// the configured access gate. `/logout` is only routed when the gate uses
/// session cookies; in inline mode it falls through to the 404 handler.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/tasks", get(list_tasks))
        .route_layer(from_fn_with_state(app_state.gate.clone(), gate_middleware));

    let router = router
        .route("/", get(index))
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected);

    match app_state.gate.mode() {
        AuthMode::Session => router.route("/logout", post(logout)),
        AuthMode::Inline => router,
    }
}

/// Service index
///
/// Describes the auth mode and the available endpoints.
pub async fn index(State(gate): State<AccessGate>) -> Json<Value> {
    let mode = gate.mode();
    let mut endpoints = vec![
        json!({"method": "POST", "path": "/register", "body": {"username": "...", "password": "..."}}),
        json!({"method": "POST", "path": "/login", "body": {"username": "...", "password": "..."}}),
    ];
    match mode {
        AuthMode::Inline => {
            endpoints.push(json!({"method": "GET", "path": "/tasks", "auth": "HTTP Basic"}));
        }
        AuthMode::Session => {
            endpoints.push(json!({"method": "GET", "path": "/tasks", "auth": "session cookie"}));
            endpoints.push(json!({"method": "POST", "path": "/logout", "auth": "session cookie"}));
        }
    }

    Json(json!({
        "message": "taskgate: per-user task lists behind registration and login",
        "auth_mode": mode.to_string(),
        "endpoints": endpoints,
    }))
}
