/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the only place shared services live:
 * - The SQLite pool (credential store and task store)
 * - The authenticator (registration and verification)
 * - The access gate (inline credentials or session cookies)
 *
 * Nothing is reachable through globals; handlers receive what they need
 * through `State`.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * # Example
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use taskgate::backend::auth::Authenticator;
 *
 * async fn handler(State(authenticator): State<Authenticator>) {
 *     // ...
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::authenticator::Authenticator;
use crate::backend::middleware::AccessGate;

/// Application state
///
/// Clones are cheap: the pool and the session table are reference counted.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub authenticator: Authenticator,
    pub gate: AccessGate,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Authenticator {
    fn from_ref(state: &AppState) -> Self {
        state.authenticator.clone()
    }
}

impl FromRef<AppState> for AccessGate {
    fn from_ref(state: &AppState) -> Self {
        state.gate.clone()
    }
}
