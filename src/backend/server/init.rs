/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database loading, state creation, and route configuration.
 *
 * # Initialization Process
 *
 * The server initialization follows these steps:
 * 1. Open the database and run migrations
 * 2. Build the authenticator and the configured access gate
 * 3. Seed the demo account on an empty database (if enabled)
 * 4. Start the session purge task (session mode with a TTL)
 * 5. Create the router
 */

use axum::Router;
use sqlx::SqlitePool;
use std::time::Duration;

use crate::backend::auth::authenticator::Authenticator;
use crate::backend::auth::cookies::CookieConfig;
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::SessionManager;
use crate::backend::error::BackendError;
use crate::backend::middleware::AccessGate;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, AuthMode, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::tasks::db::{count_all, seed_tasks};

/// Demo account created on an empty database
pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "demo";

/// Upper bound on how often expired sessions are swept
const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails if the database cannot be opened or migrated, or if seeding the
/// demo account fails. Startup does not continue without storage.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing taskgate server ({} mode)", config.auth_mode);

    // Step 1: Storage
    let pool = load_database(&config.database_url).await?;

    // Step 2: Services
    let app_state = build_state(pool, &config);

    // Step 3: Demo account
    if config.seed_demo_user {
        ensure_demo_account(&app_state.authenticator).await?;
    }

    // Step 4: Periodic session cleanup
    if let AccessGate::SessionCookie { sessions, .. } = &app_state.gate {
        if let Some(ttl) = sessions.ttl() {
            spawn_session_purge(sessions.clone(), ttl.min(PURGE_INTERVAL));
        }
    }

    // Step 5: Router
    let app = create_router(app_state);
    tracing::info!("Router configured");

    Ok(app)
}

/// Build the application state for an open pool
pub fn build_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
    let authenticator = Authenticator::new(
        pool.clone(),
        PasswordHasher::new(config.bcrypt_cost),
        config.seed_tasks.clone(),
    );

    let gate = match config.auth_mode {
        AuthMode::Inline => AccessGate::InlineCredentials(authenticator.clone()),
        AuthMode::Session => {
            let ttl = config.session_ttl();
            AccessGate::SessionCookie {
                sessions: SessionManager::new(ttl),
                cookie: CookieConfig::new(config.session_cookie.trim(), ttl),
            }
        }
    };

    AppState {
        pool,
        authenticator,
        gate,
    }
}

/// Register `demo`/`demo` when the task table is empty
///
/// If the account already exists (all of its tasks were removed), only its
/// seed tasks are restored.
pub async fn ensure_demo_account(authenticator: &Authenticator) -> Result<(), BackendError> {
    if count_all(authenticator.pool()).await? > 0 {
        return Ok(());
    }

    match authenticator.register(DEMO_USERNAME, DEMO_PASSWORD).await {
        Ok(_) => {
            tracing::info!("Demo account '{}' created", DEMO_USERNAME);
            Ok(())
        }
        Err(BackendError::UsernameTaken) => {
            let mut conn = authenticator.pool().acquire().await?;
            seed_tasks(&mut *conn, DEMO_USERNAME, authenticator.seed_titles()).await?;
            tracing::info!("Demo account '{}' reseeded", DEMO_USERNAME);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn spawn_session_purge(sessions: SessionManager, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired().await;
            if purged > 0 {
                tracing::debug!("Purged {} expired sessions", purged);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::password::MIN_COST;
    use crate::backend::tasks::db::list_for;
    use pretty_assertions::assert_eq;

    fn memory_config(mode: AuthMode) -> ServerConfig {
        ServerConfig {
            database_url: "sqlite::memory:".to_string(),
            auth_mode: mode,
            bcrypt_cost: MIN_COST,
            ..ServerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_build_state_selects_gate() {
        let pool = load_database("sqlite::memory:").await.unwrap();
        let inline = build_state(pool.clone(), &memory_config(AuthMode::Inline));
        assert_eq!(inline.gate.mode(), AuthMode::Inline);

        let session = build_state(pool, &memory_config(AuthMode::Session));
        assert_eq!(session.gate.mode(), AuthMode::Session);
    }

    #[tokio::test]
    async fn test_demo_account_seeded_once() {
        let pool = load_database("sqlite::memory:").await.unwrap();
        let state = build_state(pool.clone(), &memory_config(AuthMode::Inline));

        ensure_demo_account(&state.authenticator).await.unwrap();
        ensure_demo_account(&state.authenticator).await.unwrap();

        let identity = state.authenticator.verify("demo", "demo").await.unwrap();
        let tasks = list_for(&pool, &identity).await.unwrap();
        assert_eq!(tasks.len(), 3);
    }

    #[tokio::test]
    async fn test_demo_account_reseeded_when_tasks_empty() {
        let pool = load_database("sqlite::memory:").await.unwrap();
        let state = build_state(pool.clone(), &memory_config(AuthMode::Inline));
        ensure_demo_account(&state.authenticator).await.unwrap();

        sqlx::query("DELETE FROM tasks").execute(&pool).await.unwrap();
        ensure_demo_account(&state.authenticator).await.unwrap();

        let identity = state.authenticator.verify("demo", "demo").await.unwrap();
        assert_eq!(list_for(&pool, &identity).await.unwrap().len(), 3);
    }
}
