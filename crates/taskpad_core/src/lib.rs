//! Core domain logic for taskpad, a local-first task list.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;
pub mod viewmodel;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::task_repo::TaskRepository;
pub use store::live::{StoreHandle, TaskWatch, WriteTicket};
pub use store::task_store::{SqliteTaskStore, TaskStore};
pub use store::{StoreError, StoreResult, TaskFilter};
pub use viewmodel::{FilterMode, TaskListViewModel};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
