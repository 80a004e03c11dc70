/**
 * Authenticator
 *
 * Registration and credential verification on top of the credential store
 * and the password hasher.
 *
 * # Registration
 *
 * 1. Trim the username; reject an empty username or password as `InvalidInput`.
 *    A username may not contain `:` since HTTP Basic splits on the first one.
 * 2. Hash the password on the blocking pool
 * 3. Insert the user and seed its initial tasks in one transaction
 * 4. Translate a username conflict into `UsernameTaken`
 *
 * # Verification
 *
 * Unknown users and wrong passwords both produce `InvalidCredentials`, so a
 * caller cannot tell which usernames exist. An unknown user is still checked
 * against a placeholder hash so both paths pay for one bcrypt comparison.
 */

use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::backend::auth::password::{PasswordHasher, MAX_PASSWORD_BYTES};
use crate::backend::auth::users::{create_user, get_user_by_username, CreateOutcome};
use crate::backend::error::BackendError;
use crate::backend::tasks::db::seed_tasks;

/// Titles every new account starts with
pub const DEFAULT_SEED_TASKS: [&str; 3] = ["Buy milk", "Prepare presentation", "Learn axum"];

const PLACEHOLDER_PASSWORD: &str = "taskgate-placeholder";

/// A verified caller
///
/// Only the authenticator and the session manager construct identities, so
/// holding one proves the username was resolved by the access layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    username: String,
}

impl Identity {
    pub(crate) fn new(username: String) -> Self {
        Self { username }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Result of a successful registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
    pub username: String,
}

/// Registration and verification service
///
/// Holds the storage handle explicitly; clones share the same pool.
#[derive(Debug, Clone)]
pub struct Authenticator {
    pool: SqlitePool,
    hasher: PasswordHasher,
    seed_tasks: Arc<[String]>,
    placeholder_hash: Arc<OnceCell<String>>,
}

impl Authenticator {
    pub fn new(pool: SqlitePool, hasher: PasswordHasher, seed_tasks: Vec<String>) -> Self {
        Self {
            pool,
            hasher,
            seed_tasks: seed_tasks.into(),
            placeholder_hash: Arc::new(OnceCell::new()),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn seed_titles(&self) -> &[String] {
        &self.seed_tasks
    }

    /// Register a new account and seed its task list
    ///
    /// # Errors
    /// * `InvalidInput` - empty username/password, a username containing `:`,
    ///   or a password over 72 bytes
    /// * `UsernameTaken` - the username already exists; nothing is written
    /// * `StorageUnavailable` - the database failed
    pub async fn register(&self, username: &str, password: &str) -> Result<Registered, BackendError> {
        let username = normalize_username(username)?;
        require_password(password)?;
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(BackendError::invalid_input(format!(
                "Password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        let password_hash = self.hash(password).await?;

        let mut tx = self.pool.begin().await?;
        if create_user(&mut *tx, &username, &password_hash).await? == CreateOutcome::UsernameTaken {
            tx.rollback().await?;
            tracing::warn!("Username already exists: {}", username);
            return Err(BackendError::UsernameTaken);
        }
        seed_tasks(&mut *tx, &username, &self.seed_tasks).await?;
        tx.commit().await?;

        tracing::info!("User registered: {}", username);
        Ok(Registered { username })
    }

    /// Verify a username/password pair
    ///
    /// # Errors
    /// * `InvalidCredentials` - unknown user, wrong password, or empty fields
    /// * `StorageUnavailable` - the database failed
    pub async fn verify(&self, username: &str, password: &str) -> Result<Identity, BackendError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(BackendError::InvalidCredentials);
        }

        let user = get_user_by_username(&self.pool, username).await?;
        let stored = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.placeholder_hash().await?.to_owned(),
        };
        let valid = self.check(password, stored).await?;

        match user {
            Some(user) if valid => Ok(Identity::new(user.username)),
            Some(_) => {
                tracing::warn!("Invalid password for user: {}", username);
                Err(BackendError::InvalidCredentials)
            }
            None => {
                tracing::warn!("Login failed for unknown user: {}", username);
                Err(BackendError::InvalidCredentials)
            }
        }
    }

    /// Hash compared against when the username does not exist, computed once
    async fn placeholder_hash(&self) -> Result<&str, BackendError> {
        let hash = self
            .placeholder_hash
            .get_or_try_init(|| self.hash(PLACEHOLDER_PASSWORD))
            .await?;
        Ok(hash.as_str())
    }

    async fn check(&self, password: &str, stored: String) -> Result<bool, BackendError> {
        let hasher = self.hasher;
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| BackendError::internal(format!("verification task failed: {}", e)))
    }

    async fn hash(&self, password: &str) -> Result<String, BackendError> {
        let hasher = self.hasher;
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| BackendError::internal(format!("hashing task failed: {}", e)))?
    }
}

/// Trim surrounding whitespace and reject an empty result or one containing `:`
pub fn normalize_username(username: &str) -> Result<String, BackendError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(BackendError::invalid_input("Missing 'username'"));
    }
    if username.contains(':') {
        return Err(BackendError::invalid_input("Username must not contain ':'"));
    }
    Ok(username.to_string())
}

/// Reject an empty password. Passwords are never trimmed.
pub fn require_password(password: &str) -> Result<(), BackendError> {
    if password.is_empty() {
        return Err(BackendError::invalid_input("Missing 'password'"));
    }
    Ok(())
}
