/**
 * Register Handler
 *
 * This module implements the account registration handler for POST /register.
 *
 * # Registration Process
 *
 * 1. Parse the JSON body (a non-JSON body is a 400, not a 415)
 * 2. Validate username and password
 * 3. Hash the password and create the user
 * 4. Seed the new user's task list
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt before storage
 * - Passwords are never logged or returned in responses
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::authenticator::Authenticator;
use crate::backend::error::BackendError;
use crate::shared::{Credentials, RegisterResponse};

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - body is not JSON, or username/password is missing
/// * `409 Conflict` - the username is already registered
/// * `503 Service Unavailable` - the database failed
///
/// # Example Request
///
/// ```http
/// POST /register HTTP/1.1
/// Content-Type: application/json
///
/// {"username": "alice", "password": "wonderland"}
/// ```
///
/// # Example Response
///
/// ```json
/// {"message": "User created", "username": "alice"}
/// ```
pub async fn register(
    State(authenticator): State<Authenticator>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), BackendError> {
    let Json(request) = payload.map_err(json_required)?;
    tracing::info!("Register request for username: {}", request.username.trim());

    let registered = authenticator
        .register(&request.username, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created".to_string(),
            username: registered.username,
        }),
    ))
}

/// Map any JSON extraction failure onto `InvalidInput`
pub(crate) fn json_required(rejection: JsonRejection) -> BackendError {
    tracing::warn!("Rejected request body: {}", rejection.body_text());
    BackendError::invalid_input("JSON body with 'username' and 'password' required")
}
