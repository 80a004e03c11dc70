/**
 * Logout Handler
 *
 * POST /logout, registered only in session mode. Revokes the session named
 * by the request cookie and tells the client to drop the cookie. Calling it
 * without a live session is a no-op that still succeeds.
 */

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Json, Response},
};

use crate::backend::middleware::AccessGate;
use crate::shared::LogoutResponse;

pub async fn logout(State(gate): State<AccessGate>, headers: HeaderMap) -> Response {
    let AccessGate::SessionCookie { sessions, cookie } = &gate else {
        return Json(LogoutResponse {
            message: "No session to revoke".to_string(),
            revoked: false,
        })
        .into_response();
    };

    let revoked = match cookie.read(&headers) {
        Some(token) => sessions.revoke(&token).await,
        None => false,
    };
    if revoked {
        tracing::info!("Session revoked");
    }

    let body = LogoutResponse {
        message: if revoked {
            "Logged out".to_string()
        } else {
            "No session to revoke".to_string()
        },
        revoked,
    };
    ([(SET_COOKIE, cookie.clear())], Json(body)).into_response()
}
