//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! # Architecture
//!
//! The middleware module currently provides:
//!
//! - **`auth`** - The access gate protecting `/tasks`
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::{middleware, routing::get, Router};
//! use taskgate::backend::middleware::gate_middleware;
//!
//! let protected = Router::new()
//!     .route("/tasks", get(list_tasks))
//!     .route_layer(middleware::from_fn_with_state(gate, gate_middleware));
//! ```

pub mod auth;

pub use auth::{basic_credentials, gate_middleware, AccessGate, AuthUser};
