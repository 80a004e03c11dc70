//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, tracing, fallback
//! └── api_routes.rs   - Endpoint table and the index handler
//! ```
//!
//! # Route Types
//!
//! - `GET /` - Service index
//! - `POST /register` - Account registration
//! - `POST /login` - Login
//! - `GET /tasks` - Protected task list
//! - `POST /logout` - Session revocation (session mode)
//!
//! Anything else is a JSON 404.

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

pub use router::create_router;
