/**
 * Access Gate Middleware
 *
 * This module protects routes that require a resolved caller. The gate is
 * built once at startup in one of two modes and never mixes them:
 *
 * - **Inline credentials**: every request carries
 *   `Authorization: Basic base64(username:password)` and the password is
 *   verified on every request. Nothing is cached and no session is created.
 * - **Session cookie**: the request carries the session cookie issued by
 *   `/login`; only the session table is consulted, the password is never
 *   re-checked.
 *
 * Either way the middleware stores a single [`Identity`] in the request
 * extensions, or rejects the request with 401. Handlers read the identity
 * through the [`AuthUser`] extractor.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
        request::Parts,
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::backend::auth::authenticator::{Authenticator, Identity};
use crate::backend::auth::cookies::CookieConfig;
use crate::backend::auth::sessions::SessionManager;
use crate::backend::error::BackendError;
use crate::backend::server::config::AuthMode;

/// Challenge sent with 401 responses in inline-credential mode
pub const BASIC_CHALLENGE: &str = "Basic realm=\"tasks\"";

/// Identity resolution strategy for protected routes
#[derive(Debug, Clone)]
pub enum AccessGate {
    /// Verify Basic credentials on every request
    InlineCredentials(Authenticator),
    /// Resolve the session cookie against the session table
    SessionCookie {
        sessions: SessionManager,
        cookie: CookieConfig,
    },
}

impl AccessGate {
    pub fn mode(&self) -> AuthMode {
        match self {
            Self::InlineCredentials(_) => AuthMode::Inline,
            Self::SessionCookie { .. } => AuthMode::Session,
        }
    }

    /// Resolve the caller behind a request
    ///
    /// Any failure to authenticate collapses into `Unauthenticated`; the
    /// response never says whether a session existed or which part of the
    /// credentials was wrong. Storage failures still propagate as such.
    pub async fn resolve(&self, headers: &HeaderMap) -> Result<Identity, BackendError> {
        match self {
            Self::InlineCredentials(authenticator) => {
                let (username, password) =
                    basic_credentials(headers).ok_or(BackendError::Unauthenticated)?;
                authenticator
                    .verify(&username, &password)
                    .await
                    .map_err(|e| match e {
                        BackendError::InvalidCredentials | BackendError::InvalidInput { .. } => {
                            BackendError::Unauthenticated
                        }
                        other => other,
                    })
            }
            Self::SessionCookie { sessions, cookie } => {
                sessions.resolve(cookie.read(headers).as_deref()).await
            }
        }
    }
}

/// Decode an `Authorization: Basic` header into `(username, password)`
///
/// The password is everything after the first colon, so it may itself
/// contain colons. Returns `None` for any other scheme or malformed value.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Access gate middleware
///
/// This middleware:
/// 1. Resolves the caller with the configured [`AccessGate`]
/// 2. Attaches the [`Identity`] to request extensions for use in handlers
///
/// Returns 401 Unauthorized (with a Basic challenge in inline mode) when the
/// caller cannot be resolved.
pub async fn gate_middleware(
    State(gate): State<AccessGate>,
    mut request: Request,
    next: Next,
) -> Response {
    match gate.resolve(request.headers()).await {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(err) => {
            let challenge = matches!(err, BackendError::Unauthenticated)
                && gate.mode() == AuthMode::Inline;
            if matches!(err, BackendError::Unauthenticated) {
                tracing::warn!("Rejected unauthenticated request to {}", request.uri().path());
            }

            let mut response = err.into_response();
            if challenge {
                response
                    .headers_mut()
                    .insert(WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_CHALLENGE));
            }
            response
        }
    }
}

/// Axum extractor for the identity resolved by [`gate_middleware`]
#[derive(Clone, Debug)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("Identity not found in request extensions");
                BackendError::Unauthenticated
            })?;

        Ok(AuthUser(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::authenticator::DEFAULT_SEED_TASKS;
    use crate::backend::auth::password::{PasswordHasher, MIN_COST};
    use crate::backend::server::config::load_database;
    use assert_matches::assert_matches;
    use axum::http::header::COOKIE;
    use proptest::prelude::*;

    fn basic_header(raw: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let value = format!("Basic {}", STANDARD.encode(raw));
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    async fn inline_gate() -> AccessGate {
        let pool = load_database("sqlite::memory:").await.unwrap();
        let seeds = DEFAULT_SEED_TASKS.iter().map(|s| s.to_string()).collect();
        let auth = Authenticator::new(pool, PasswordHasher::new(MIN_COST), seeds);
        auth.register("alice", "wonderland").await.unwrap();
        AccessGate::InlineCredentials(auth)
    }

    #[test]
    fn test_basic_credentials_password_may_contain_colon() {
        let headers = basic_header("alice:won:der:land");
        assert_eq!(
            basic_credentials(&headers),
            Some(("alice".to_string(), "won:der:land".to_string()))
        );
    }

    #[test]
    fn test_basic_credentials_rejects_malformed() {
        assert_eq!(basic_credentials(&HeaderMap::new()), None);
        assert_eq!(basic_credentials(&basic_header("no-colon")), None);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic %%%not-base64".parse().unwrap());
        assert_eq!(basic_credentials(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer abc.def".parse().unwrap());
        assert_eq!(basic_credentials(&headers), None);
    }

    #[test]
    fn test_basic_scheme_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        let value = format!("basic {}", STANDARD.encode("alice:pw"));
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        assert!(basic_credentials(&headers).is_some());
    }

    proptest! {
        #[test]
        fn prop_basic_credentials_decode_what_was_encoded(
            username in "[^:\\x00-\\x1f]{1,24}",
            password in "[^\\x00-\\x1f]{1,24}",
        ) {
            let headers = basic_header(&format!("{}:{}", username, password));
            prop_assert_eq!(basic_credentials(&headers), Some((username, password)));
        }
    }

    #[tokio::test]
    async fn test_inline_gate_resolves_valid_credentials() {
        let gate = inline_gate().await;
        let identity = gate.resolve(&basic_header("alice:wonderland")).await.unwrap();
        assert_eq!(identity.username(), "alice");
    }

    #[tokio::test]
    async fn test_inline_gate_rejects_bad_credentials() {
        let gate = inline_gate().await;
        assert_matches!(
            gate.resolve(&basic_header("alice:wrong")).await,
            Err(BackendError::Unauthenticated)
        );
        assert_matches!(
            gate.resolve(&basic_header("mallory:wonderland")).await,
            Err(BackendError::Unauthenticated)
        );
        assert_matches!(
            gate.resolve(&basic_header(":")).await,
            Err(BackendError::Unauthenticated)
        );
        assert_matches!(
            gate.resolve(&HeaderMap::new()).await,
            Err(BackendError::Unauthenticated)
        );
    }

    #[tokio::test]
    async fn test_session_gate_ignores_basic_credentials() {
        let sessions = SessionManager::new(None);
        let gate = AccessGate::SessionCookie {
            sessions: sessions.clone(),
            cookie: CookieConfig::new("sid", None),
        };
        assert_matches!(
            gate.resolve(&basic_header("alice:wonderland")).await,
            Err(BackendError::Unauthenticated)
        );

        let session = sessions
            .issue(&Identity::new("alice".to_string()), None)
            .await;
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, format!("sid={}", session.token).parse().unwrap());
        assert_eq!(gate.resolve(&headers).await.unwrap().username(), "alice");
    }

    #[test]
    fn test_gate_mode() {
        let gate = AccessGate::SessionCookie {
            sessions: SessionManager::new(None),
            cookie: CookieConfig::new("sid", None),
        };
        assert_eq!(gate.mode(), AuthMode::Session);
    }
}
