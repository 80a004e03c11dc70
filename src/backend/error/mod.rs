//! Backend Error Module
//!
//! This module defines the error types of the credential and access layer.
//! These errors are returned from the authenticator, the stores and the HTTP
//! handlers, and convert directly into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation and the 404 fallback
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
pub use conversion::not_found;
