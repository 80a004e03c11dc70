//! Backend Module
//!
//! This module contains all server-side code for taskgate: an Axum HTTP
//! server that registers accounts, verifies credentials and serves each
//! user's own task list.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Password hashing, credential store, sessions, handlers
//! - **`middleware`** - The access gate that resolves callers of `/tasks`
//! - **`tasks`** - Task storage and the task list handler
//! - **`error`** - Backend error type and its HTTP rendering
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Access gate
//! ├── tasks/          - Task list
//! └── error/          - Error types
//! ```
//!
//! # Access Modes
//!
//! - **Inline credentials**: every `/tasks` request carries HTTP Basic
//!   credentials, verified against the stored bcrypt hash
//! - **Session cookie**: `/login` issues an opaque token in an `HttpOnly`
//!   cookie; `/logout` revokes it
//!
//! The mode is chosen once, at startup, from `ServerConfig::auth_mode`.
//!
//! # State Management
//!
//! `AppState` holds the SQLite pool, the authenticator and the access gate.
//! Handlers extract the part they need through `FromRef`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Access gate middleware
pub mod middleware;

/// Per-user task lists
pub mod tasks;

pub use error::BackendError;
pub use server::{create_app, AppState, AuthMode, ServerConfig};
