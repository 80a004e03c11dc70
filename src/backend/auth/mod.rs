//! Authentication Module
//!
//! This module handles account registration, credential verification and
//! server-side sessions.
//!
//! # Architecture
//!
//! - **`password`** - bcrypt hashing and verification
//! - **`users`** - User model and the credential store
//! - **`authenticator`** - Registration and credential verification
//! - **`sessions`** - In-memory session table for session-cookie mode
//! - **`cookies`** - Session cookie encoding and parsing
//! - **`handlers`** - HTTP handlers for register, login and logout
//!
//! # Authentication Flow
//!
//! 1. **Register**: username + password → hash stored → seed tasks created
//! 2. **Login**: username + password verified → (session mode) cookie issued
//! 3. **Tasks**: the access gate resolves Basic credentials or the cookie
//! 4. **Logout**: (session mode) cookie token revoked
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Unknown users and wrong passwords are indistinguishable (401)
//! - Session tokens are 256-bit random values, kept only in memory

/// Password hashing
pub mod password;

/// User model and credential store
pub mod users;

/// Registration and verification
pub mod authenticator;

/// Session table
pub mod sessions;

/// Session cookie helpers
pub mod cookies;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use authenticator::{Authenticator, Identity, Registered};
pub use cookies::CookieConfig;
pub use handlers::{login, logout, register};
pub use password::PasswordHasher;
pub use sessions::{Session, SessionManager};
pub use users::{CreateOutcome, User};
