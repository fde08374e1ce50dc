//! Task persistence: synchronous DAO and live-query store handle.
//!
//! # Responsibility
//! - Define the store-level error taxonomy and query filters.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Writes are committed before their completion is signaled.
//! - Every committed write is followed by a fresh snapshot to all watchers.

use crate::db::DbError;
use crate::model::task::{Task, TaskId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod live;
pub mod task_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error taxonomy.
///
/// Fire-and-forget callers are free to drop these; the variants exist so
/// the internal contract stays explicit.
#[derive(Debug)]
pub enum StoreError {
    /// No row with the given id exists.
    NotFound(TaskId),
    /// The record has no store-assigned id yet, so it cannot address a row.
    MissingId,
    /// A SQLite constraint rejected the write.
    Constraint(String),
    /// Underlying storage failure (open, migration, I/O).
    Db(DbError),
    /// The store worker has stopped; no further operations will complete.
    Closed,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::MissingId => write!(f, "task has no store-assigned id"),
            Self::Constraint(message) => write!(f, "constraint violation: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Closed => write!(f, "task store is closed"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, ref message) = value {
            if code.code == rusqlite::ErrorCode::ConstraintViolation {
                return Self::Constraint(
                    message.clone().unwrap_or_else(|| code.to_string()),
                );
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Subset predicate for list and watch queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    /// Every row, ascending id.
    #[default]
    All,
    /// Rows whose completion flag equals the given value, ascending id.
    Status(bool),
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Status(done) => task.is_done == *done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TaskFilter;
    use crate::model::task::Task;

    #[test]
    fn filter_matches_by_completion_flag() {
        let open = Task::new("open", None);
        let done = Task::new("done", None).with_done(true);

        assert!(TaskFilter::All.matches(&open));
        assert!(TaskFilter::All.matches(&done));
        assert!(TaskFilter::Status(false).matches(&open));
        assert!(!TaskFilter::Status(false).matches(&done));
        assert!(TaskFilter::Status(true).matches(&done));
        assert!(!TaskFilter::Status(true).matches(&open));
    }
}
