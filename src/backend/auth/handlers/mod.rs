//! Authentication Handlers Module
//!
//! HTTP handlers for the public authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── register.rs  - Account registration
//! ├── login.rs     - Credential check (and session issue in session mode)
//! └── logout.rs    - Session revocation
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /register
//! - **`login`** - POST /login
//! - **`logout`** - POST /logout (session mode only)

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

pub use login::login;
pub use logout::logout;
pub use register::register;
