//! Task repository: pass-through facade over the live store handle.
//!
//! Exists solely as the seam the view-model depends on; every operation
//! forwards verbatim to [`StoreHandle`] with no added logic or state.

use crate::model::task::{Task, TaskId};
use crate::store::live::{StoreHandle, TaskWatch, WriteTicket};
use crate::store::{StoreResult, TaskFilter};

#[derive(Clone)]
pub struct TaskRepository {
    store: StoreHandle,
}

impl TaskRepository {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    pub fn insert(&self, task: Task) -> WriteTicket<TaskId> {
        self.store.insert(task)
    }

    pub fn update(&self, task: Task) -> WriteTicket<()> {
        self.store.update(task)
    }

    pub fn delete(&self, id: TaskId) -> WriteTicket<()> {
        self.store.delete(id)
    }

    pub async fn list(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        self.store.list(filter).await
    }

    pub fn list_blocking(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        self.store.list_blocking(filter)
    }

    pub fn watch(&self, filter: TaskFilter) -> TaskWatch {
        self.store.watch(filter)
    }
}
