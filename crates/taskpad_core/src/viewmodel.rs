//! Task list view-model.
//!
//! # Responsibility
//! - Bridge a presentation layer's request/response calls to the store's
//!   live-query model.
//! - Own the filter selection and re-derive the watched list on change.
//! - Enforce the blank-title rule before anything reaches the store.
//!
//! # Invariants
//! - Writes are dispatched fire-and-forget: each call returns immediately
//!   with a ticket the caller may drop or await.
//! - The view-model holds no authoritative task data, only a live
//!   read-through subscription.

use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::repo::task_repo::TaskRepository;
use crate::store::live::{TaskWatch, WriteTicket};
use crate::store::{StoreResult, TaskFilter};
use log::info;

/// Filter selection for the displayed list.
///
/// Initial state is `All`; transitions happen only on explicit selection
/// and the state lives for the presentation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    Incomplete,
    Complete,
}

impl FilterMode {
    fn as_filter(self) -> TaskFilter {
        match self {
            Self::All => TaskFilter::All,
            Self::Incomplete => TaskFilter::Status(false),
            Self::Complete => TaskFilter::Status(true),
        }
    }
}

pub struct TaskListViewModel {
    repo: TaskRepository,
    filter: FilterMode,
    watch: TaskWatch,
}

impl TaskListViewModel {
    pub fn new(repo: TaskRepository) -> Self {
        let watch = repo.watch(TaskFilter::All);
        Self {
            repo,
            filter: FilterMode::All,
            watch,
        }
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Switches the filter and re-subscribes the watched list.
    pub fn set_filter(&mut self, mode: FilterMode) {
        if mode == self.filter {
            return;
        }
        self.filter = mode;
        self.watch = self.repo.watch(mode.as_filter());
        info!("event=filter_change module=viewmodel status=ok mode={mode:?}");
    }

    /// Current list under the active filter, ascending id.
    pub fn tasks(&self) -> Vec<Task> {
        self.watch.snapshot()
    }

    /// Wakes after the next committed write.
    pub async fn changed(&mut self) -> StoreResult<()> {
        self.watch.changed().await
    }

    /// Creates a task from edit-buffer input.
    ///
    /// # Errors
    /// - `BlankTitle` before anything reaches the store; a blank title
    ///   never produces a row.
    pub fn add(
        &self,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Result<WriteTicket<TaskId>, TaskValidationError> {
        let task = Task::new(title, description);
        task.validate()?;
        Ok(self.repo.insert(task))
    }

    /// Commits an in-place edit as a full-record replacement.
    ///
    /// # Errors
    /// - `BlankTitle` when the edit cleared the title.
    pub fn save(&self, task: Task) -> Result<WriteTicket<()>, TaskValidationError> {
        task.validate()?;
        Ok(self.repo.update(task))
    }

    /// Toggles completion by replacing the row with one field flipped.
    /// The record comes from the store, so its title already passed
    /// validation.
    pub fn set_done(&self, task: &Task, done: bool) -> WriteTicket<()> {
        self.repo.update(task.with_done(done))
    }

    /// Deletes by primary key; absent rows are a no-op.
    pub fn remove(&self, id: TaskId) -> WriteTicket<()> {
        self.repo.delete(id)
    }
}
