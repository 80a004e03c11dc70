//! Shared Module
//!
//! This module contains types that are shared between the server and the
//! demo client. They describe the JSON bodies exchanged over HTTP and the
//! configuration errors both sides report.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! in both server and client code. All wire types derive `Serialize` and
//! `Deserialize`.

/// Request and response bodies of the HTTP API
pub mod api;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use api::{
    Credentials, ErrorBody, LoginResponse, LogoutResponse, RegisterResponse, Task,
    TaskListResponse,
};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
