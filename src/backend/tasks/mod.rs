//! Task Module
//!
//! Per-user task storage and the protected `GET /tasks` handler.
//!
//! ```text
//! tasks/
//! ├── mod.rs       - Module exports
//! ├── db.rs        - Scoped task queries and seeding
//! └── handlers.rs  - HTTP handler for the task list
//! ```

/// Task storage
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use db::TaskRecord;
pub use handlers::list_tasks;
