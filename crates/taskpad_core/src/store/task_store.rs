//! Task store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and status-filtered queries over the `tasks` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `list_*` results are ordered by ascending id (creation order), never
//!   re-sorted by content.
//! - Insert follows the REPLACE conflict policy: a record carrying an
//!   existing id overwrites that row.
//! - Delete matches by primary key only and is idempotent.

use crate::model::task::{Task, TaskId};
use crate::store::{StoreError, StoreResult};
use rusqlite::{params, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT id, name, desc, isDone FROM tasks";

/// Store interface for task CRUD and queries.
///
/// The seam between persistence and everything above it; the live store
/// worker drives a [`SqliteTaskStore`] through this trait.
pub trait TaskStore {
    /// Inserts a task, letting the store assign an id when the record has
    /// none. A record with an existing id replaces that row.
    fn insert(&self, task: &Task) -> StoreResult<TaskId>;
    /// Replaces the row matching `task.id` with the given field values.
    fn update(&self, task: &Task) -> StoreResult<()>;
    /// Removes the row with the given id; absent rows are a no-op.
    fn delete(&self, id: TaskId) -> StoreResult<()>;
    /// All rows, ascending id.
    fn list_all(&self) -> StoreResult<Vec<Task>>;
    /// Rows whose completion flag equals `is_done`, ascending id.
    fn list_by_status(&self, is_done: bool) -> StoreResult<Vec<Task>>;
}

/// SQLite-backed task store.
pub struct SqliteTaskStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskStore for SqliteTaskStore<'_> {
    fn insert(&self, task: &Task) -> StoreResult<TaskId> {
        self.conn.execute(
            "INSERT OR REPLACE INTO tasks (id, name, desc, isDone)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                task.id,
                task.title.as_str(),
                task.description.as_deref(),
                task.is_done,
            ],
        )?;

        Ok(match task.id {
            Some(id) => id,
            None => self.conn.last_insert_rowid(),
        })
    }

    fn update(&self, task: &Task) -> StoreResult<()> {
        let id = task.id.ok_or(StoreError::MissingId)?;

        let changed = self.conn.execute(
            "UPDATE tasks SET name = ?1, desc = ?2, isDone = ?3 WHERE id = ?4;",
            params![
                task.title.as_str(),
                task.description.as_deref(),
                task.is_done,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    fn delete(&self, id: TaskId) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM tasks WHERE id = ?1;", params![id])?;
        Ok(())
    }

    fn list_all(&self) -> StoreResult<Vec<Task>> {
        self.query(&format!("{TASK_SELECT_SQL} ORDER BY id;"), &[])
    }

    fn list_by_status(&self, is_done: bool) -> StoreResult<Vec<Task>> {
        self.query(
            &format!("{TASK_SELECT_SQL} WHERE isDone = ?1 ORDER BY id;"),
            &[&is_done],
        )
    }
}

impl SqliteTaskStore<'_> {
    fn query(&self, sql: &str, bind: &[&dyn rusqlite::ToSql]) -> StoreResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Task> {
    Ok(Task {
        id: Some(row.get("id")?),
        title: row.get("name")?,
        description: row.get("desc")?,
        is_done: row.get("isDone")?,
    })
}
