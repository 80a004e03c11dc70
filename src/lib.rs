//! taskgate - Main Library
//!
//! taskgate is a small multi-user task service: accounts register with a
//! username and password, log in, and read their own task list. Nobody can
//! read anyone else's tasks.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between server and client
//!   - Request/response bodies for every endpoint
//!   - Client configuration and the configuration error type
//!
//! - **`backend`** - Axum HTTP server
//!   - bcrypt password hashing and a SQLite credential store
//!   - Inline (HTTP Basic) or session-cookie access to `/tasks`
//!   - Per-user task storage
//!
//! - **`client`** - Blocking HTTP client and the console demo
//!
//! # Usage
//!
//! ```rust,no_run
//! use taskgate::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::load()?).await?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `backend::error::BackendError` for everything the server can reject
//! - `shared::ConfigError` for configuration problems
//! - `client::ClientError` for the client side

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;

/// HTTP client and console demo
pub mod client;
