/**
 * Login Handler
 *
 * This module implements the credential check for POST /login.
 *
 * # Authentication Process
 *
 * 1. Validate that both fields are present
 * 2. Verify the password against the stored bcrypt hash
 * 3. In session mode, discard the caller's current session and issue a new
 *    one in an `HttpOnly` cookie
 * 4. In inline mode, only confirm the credentials; the client resends them
 *    with every request to `/tasks`
 *
 * # Security
 *
 * - Unknown users and wrong passwords return the same 401
 * - The session token is only ever sent in `Set-Cookie`
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Json, Response},
};

use crate::backend::auth::authenticator::{normalize_username, require_password};
use crate::backend::auth::handlers::register::json_required;
use crate::backend::error::BackendError;
use crate::backend::middleware::AccessGate;
use crate::backend::server::state::AppState;
use crate::shared::{Credentials, LoginResponse};

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - body is not JSON, or username/password is missing
/// * `401 Unauthorized` - unknown user or wrong password
/// * `503 Service Unavailable` - the database failed
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Response, BackendError> {
    let Json(request) = payload.map_err(json_required)?;
    let username = normalize_username(&request.username)?;
    require_password(&request.password)?;
    tracing::info!("Login request for: {}", username);

    let identity = state.authenticator.verify(&username, &request.password).await?;

    match &state.gate {
        AccessGate::SessionCookie { sessions, cookie } => {
            let previous = cookie.read(&headers);
            let session = sessions.issue(&identity, previous.as_deref()).await;
            tracing::info!("Session issued for {}", identity.username());

            let body = LoginResponse {
                message: "Logged in. The session cookie grants access to /tasks.".to_string(),
                username: identity.username().to_string(),
            };
            Ok(([(SET_COOKIE, cookie.issue(&session.token))], Json(body)).into_response())
        }
        AccessGate::InlineCredentials(_) => {
            tracing::info!("Credentials verified for {}", identity.username());

            let body = LoginResponse {
                message: "Credentials accepted. Send them as HTTP Basic auth to /tasks."
                    .to_string(),
                username: identity.username().to_string(),
            };
            Ok(Json(body).into_response())
        }
    }
}
