/**
 * Backend Error Types
 *
 * This module defines the error taxonomy of the credential and access layer.
 * Every variant is recoverable by the caller; none of them stops the server.
 *
 * # Error Categories
 *
 * ## Caller errors
 *
 * - `InvalidInput` - a required field is missing or empty
 * - `UsernameTaken` - registration conflict
 * - `InvalidCredentials` - login failure, deliberately undifferentiated
 *   between "no such user" and "wrong password"
 * - `Unauthenticated` - protected resource accessed without a valid
 *   session or valid inline credentials
 *
 * ## Server errors
 *
 * - `StorageUnavailable` - the database could not be reached or a query failed
 * - `Migration` - the schema could not be applied at startup
 * - `Internal` - password hashing or a blocking task failed
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Backend-specific error types
///
/// Each variant maps onto one HTTP status code through [`BackendError::status_code`]
/// and is rendered as JSON by the `IntoResponse` implementation in
/// `error::conversion`.
///
/// # Usage
///
/// ```rust
/// use taskgate::backend::error::BackendError;
///
/// let err = BackendError::invalid_input("Missing 'username' and/or 'password'");
/// assert_eq!(err.status_code().as_u16(), 400);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Missing or empty required field
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Human-readable error message
        message: String,
    },

    /// Username already registered
    #[error("Username already taken")]
    UsernameTaken,

    /// Unknown user or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No valid session token or inline credentials
    #[error("Authentication required")]
    Unauthenticated,

    /// Database failure
    ///
    /// The source error is logged but never sent to the client.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),

    /// Schema migration failure at startup
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Hashing failure or a panicked blocking task
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },
}

impl BackendError {
    /// Create a new invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `InvalidInput` - 400 Bad Request
    /// - `UsernameTaken` - 409 Conflict
    /// - `InvalidCredentials`, `Unauthenticated` - 401 Unauthorized
    /// - `StorageUnavailable`, `Migration` - 503 Service Unavailable
    /// - `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::UsernameTaken => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::StorageUnavailable(_) | Self::Migration(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message sent to the client
    ///
    /// Server-side failures get a fixed message so that database and
    /// hashing details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput { message } => message.clone(),
            Self::UsernameTaken => "Username already taken".to_string(),
            Self::InvalidCredentials => "Invalid credentials".to_string(),
            Self::Unauthenticated => "Authentication required".to_string(),
            Self::StorageUnavailable(_) | Self::Migration(_) => "Storage unavailable".to_string(),
            Self::Internal { .. } => "Internal server error".to_string(),
        }
    }
}
