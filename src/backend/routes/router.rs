/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. API routes (index, register, login, tasks, logout)
 * 2. Request tracing layer
 * 3. Fallback handler (JSON 404)
 */

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::backend::error::not_found;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the pool, the authenticator
///   and the access gate
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), &app_state);

    // Unknown paths get the same JSON error shape as every other failure
    let router = router.fallback(not_found);

    router
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
