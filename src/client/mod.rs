//! Client Module
//!
//! Blocking HTTP client for the taskgate API and the console flows used by
//! the `taskgate-client` binary.
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs   - Module exports
//! ├── api.rs   - TaskgateClient and ClientError
//! ├── menu.rs  - Interactive menu and the scripted auto flow
//! └── main.rs  - Binary entry point
//! ```

/// HTTP client
pub mod api;

/// Console flows
pub mod menu;

pub use api::{ClientError, TaskgateClient};
pub use menu::{run_auto, run_menu};
