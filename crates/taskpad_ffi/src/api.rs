//! FFI use-case API for the mobile UI.
//!
//! # Responsibility
//! - Expose stable, use-case-level task operations to Dart via FRB.
//! - Own the process-wide store handle behind one-time initialization.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Exactly one store handle is constructed per process; concurrent
//!   first-access attempts block on the same initialization.
//! - Blank titles are rejected here, before anything reaches the store.

use once_cell::sync::OnceCell;
use std::path::PathBuf;
use taskpad_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    StoreHandle, Task, TaskFilter, TaskId,
};

const DB_FILE_NAME: &str = "taskpad.sqlite3";
static STORE: OnceCell<StoreHandle> = OnceCell::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task record shape crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub is_done: bool,
}

/// Generic action response envelope for task commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Affected task id, when one exists.
    pub task_id: Option<i64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: TaskId) -> Self {
        Self {
            ok: true,
            task_id: Some(task_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Query response envelope for task list reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub ok: bool,
    pub tasks: Vec<TaskDto>,
    pub message: String,
}

/// Creates a task from add-flow input.
///
/// # FFI contract
/// - Sync call; returns after the row is durable.
/// - Blank titles are rejected without touching the store.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn add_task(title: String, description: Option<String>) -> TaskActionResponse {
    let task = Task::new(title.trim(), description);
    if let Err(err) = task.validate() {
        return TaskActionResponse::failure(err.to_string());
    }

    match shared_store() {
        Ok(store) => match store.insert(task).wait_blocking() {
            Ok(id) => TaskActionResponse::success("Task created.", id),
            Err(err) => TaskActionResponse::failure(format!("add_task failed: {err}")),
        },
        Err(err) => TaskActionResponse::failure(err),
    }
}

/// Replaces a stored task with the given field values.
///
/// # FFI contract
/// - Sync call; returns after the row is durable.
/// - Blank titles are rejected without touching the store.
/// - Unknown ids report failure with a not-found message.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn update_task(
    id: i64,
    title: String,
    description: Option<String>,
    is_done: bool,
) -> TaskActionResponse {
    let mut task = Task::new(title.trim(), description);
    task.id = Some(id);
    task.is_done = is_done;
    if let Err(err) = task.validate() {
        return TaskActionResponse::failure(err.to_string());
    }

    match shared_store() {
        Ok(store) => match store.update(task).wait_blocking() {
            Ok(()) => TaskActionResponse::success("Task updated.", id),
            Err(err) => TaskActionResponse::failure(format!("update_task failed: {err}")),
        },
        Err(err) => TaskActionResponse::failure(err),
    }
}

/// Deletes a task by id. Deleting an absent id succeeds (idempotent).
///
/// # FFI contract
/// - Sync call; returns after the delete is durable.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_task(id: i64) -> TaskActionResponse {
    match shared_store() {
        Ok(store) => match store.delete(id).wait_blocking() {
            Ok(()) => TaskActionResponse::success("Task deleted.", id),
            Err(err) => TaskActionResponse::failure(format!("delete_task failed: {err}")),
        },
        Err(err) => TaskActionResponse::failure(err),
    }
}

/// Lists tasks, optionally filtered by completion status, ascending id.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - `is_done=None` returns every task.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_tasks(is_done: Option<bool>) -> TaskListResponse {
    let filter = match is_done {
        None => TaskFilter::All,
        Some(done) => TaskFilter::Status(done),
    };

    match shared_store() {
        Ok(store) => match store.list_blocking(filter) {
            Ok(tasks) => TaskListResponse {
                ok: true,
                tasks: tasks.into_iter().filter_map(to_task_dto).collect(),
                message: String::new(),
            },
            Err(err) => TaskListResponse {
                ok: false,
                tasks: Vec::new(),
                message: format!("list_tasks failed: {err}"),
            },
        },
        Err(err) => TaskListResponse {
            ok: false,
            tasks: Vec::new(),
            message: err,
        },
    }
}

fn to_task_dto(task: Task) -> Option<TaskDto> {
    Some(TaskDto {
        id: task.id?,
        title: task.title,
        description: task.description,
        is_done: task.is_done,
    })
}

fn shared_store() -> Result<&'static StoreHandle, String> {
    STORE.get_or_try_init(|| {
        StoreHandle::open(resolve_db_path()).map_err(|err| format!("store open failed: {err}"))
    })
}

fn resolve_db_path() -> PathBuf {
    if let Ok(raw) = std::env::var("TASKPAD_DB_PATH") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DB_FILE_NAME)
}
