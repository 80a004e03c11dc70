/**
 * Session Management
 *
 * Server-side session table for session-cookie mode. A session binds an
 * opaque, unpredictable token to exactly one username. Tokens live only in
 * memory and disappear on restart.
 *
 * # Lifecycle
 *
 * `NoSession -> Active(username) -> Revoked`
 *
 * - `issue` records a new token; the caller's previous token, if any, is
 *   removed first so one caller never holds two sessions.
 * - `revoke` erases the binding; the same token then resolves as
 *   `Unauthenticated`.
 * - `resolve` maps a token to its identity or rejects it outright.
 */

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::backend::auth::authenticator::Identity;
use crate::backend::error::BackendError;

/// Random bytes per token (256 bits before encoding)
pub const TOKEN_BYTES: usize = 32;

/// An active session
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Shared token table
///
/// Cloning is cheap; all clones share one table behind an `RwLock`.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Option<Duration>,
}

impl SessionManager {
    /// Create an empty table. `ttl` of `None` keeps sessions until logout.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Issue a fresh session for a verified identity
    ///
    /// # Arguments
    /// * `identity` - Identity returned by the authenticator
    /// * `previous` - Token the caller currently presents, discarded before
    ///   the new one is recorded
    pub async fn issue(&self, identity: &Identity, previous: Option<&str>) -> Session {
        let session = Session {
            token: generate_token(),
            username: identity.username().to_string(),
            created_at: Utc::now(),
        };

        let mut sessions = self.sessions.write().await;
        if let Some(previous) = previous {
            if sessions.remove(previous).is_some() {
                tracing::debug!("Replaced previous session for {}", identity.username());
            }
        }
        sessions.insert(session.token.clone(), session.clone());

        session
    }

    /// Resolve a token to the identity it is bound to
    ///
    /// Missing, unknown, revoked and expired tokens all yield
    /// `Unauthenticated`.
    pub async fn resolve(&self, token: Option<&str>) -> Result<Identity, BackendError> {
        let token = token.ok_or(BackendError::Unauthenticated)?;
        let sessions = self.sessions.read().await;
        let session = sessions.get(token).ok_or(BackendError::Unauthenticated)?;

        if self.is_expired(session, Utc::now()) {
            return Err(BackendError::Unauthenticated);
        }

        Ok(Identity::new(session.username.clone()))
    }

    /// Erase a token. Returns whether a session was removed.
    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Drop every expired session, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_expired(session, now));
        before - sessions.len()
    }

    /// Number of sessions currently stored (expired ones included until purged)
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
        let Some(ttl) = self.ttl else {
            return false;
        };
        // A negative age (clock stepped backwards) counts as fresh.
        match now.signed_duration_since(session.created_at).to_std() {
            Ok(age) => age >= ttl,
            Err(_) => false,
        }
    }
}

/// 32 bytes from the OS CSPRNG, base64url without padding
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
