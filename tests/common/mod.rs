//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! - In-memory server configuration and app construction
//! - Request builders for JSON, Basic auth and cookie requests
//! - A `oneshot` driver that returns status, headers and parsed JSON

#![allow(dead_code)]

pub mod http;

pub use http::*;

use axum::Router;
use sqlx::SqlitePool;
use taskgate::backend::auth::password::MIN_COST;
use taskgate::backend::routes::create_router;
use taskgate::backend::server::{build_state, create_app, load_database, AuthMode, ServerConfig};

/// Configuration for a fresh in-memory server
///
/// bcrypt runs at its minimum cost and no demo account is created, so
/// every test starts from an empty database.
pub fn test_config(mode: AuthMode) -> ServerConfig {
    ServerConfig {
        database_url: "sqlite::memory:".to_string(),
        auth_mode: mode,
        bcrypt_cost: MIN_COST,
        seed_demo_user: false,
        ..ServerConfig::default()
    }
}

pub async fn test_app(mode: AuthMode) -> Router {
    create_app(test_config(mode))
        .await
        .expect("Failed to create test app")
}

/// Like `test_app`, but also hands back the pool so a test can write rows directly
pub async fn test_app_with_pool(mode: AuthMode) -> (Router, SqlitePool) {
    let config = test_config(mode);
    let pool = load_database(&config.database_url)
        .await
        .expect("Failed to open test database");
    let app = create_router(build_state(pool.clone(), &config));
    (app, pool)
}

/// Add a task to `owner`'s list
pub async fn insert_task(pool: &SqlitePool, owner: &str, title: &str) {
    sqlx::query("INSERT INTO tasks (owner, title) VALUES (?, ?)")
        .bind(owner)
        .bind(title)
        .execute(pool)
        .await
        .expect("Failed to insert task");
}

/// Seed titles a new account starts with under the default configuration
pub fn default_titles() -> Vec<&'static str> {
    vec!["Buy milk", "Prepare presentation", "Learn axum"]
}
