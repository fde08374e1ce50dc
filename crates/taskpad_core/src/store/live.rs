//! Live store handle: serialized writes and observable queries.
//!
//! # Responsibility
//! - Own the SQLite connection on one dedicated worker thread.
//! - Serialize every operation through a FIFO command queue.
//! - Publish a fresh snapshot to all watchers after each committed write.
//!
//! # Invariants
//! - Commands apply in submission order; watchers never observe a
//!   partially-applied write.
//! - A write is committed before its [`WriteTicket`] resolves, and the
//!   snapshot covering it is published before the ticket resolves.
//! - Dropping every handle clone closes the queue; the worker drains
//!   pending commands and exits, and watchers then observe `Closed`.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::task::{Task, TaskId};
use crate::store::task_store::{SqliteTaskStore, TaskStore};
use crate::store::{StoreError, StoreResult, TaskFilter};
use log::{error, info};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use tokio::sync::{oneshot, watch};

enum Command {
    Insert(Task, oneshot::Sender<StoreResult<TaskId>>),
    Update(Task, oneshot::Sender<StoreResult<()>>),
    Delete(TaskId, oneshot::Sender<StoreResult<()>>),
    List(TaskFilter, oneshot::Sender<StoreResult<Vec<Task>>>),
}

enum Location {
    File(PathBuf),
    Memory,
}

impl Location {
    fn open(&self) -> DbResult<Connection> {
        match self {
            Self::File(path) => open_db(path),
            Self::Memory => open_db_in_memory(),
        }
    }
}

/// Cloneable handle to one store worker.
///
/// All clones share the same connection, queue, and snapshot stream. The
/// worker stops once the last clone is dropped.
#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::Sender<Command>,
    snapshot: watch::Receiver<Vec<Task>>,
}

impl StoreHandle {
    /// Opens a file-backed store and starts its worker thread.
    ///
    /// # Errors
    /// - Propagates open/migration failures from the worker.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::start(Location::File(path.into()))
    }

    /// Opens a private in-memory store; used by tests and ephemeral sessions.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::start(Location::Memory)
    }

    fn start(location: Location) -> StoreResult<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::channel();

        thread::spawn(move || worker(&location, &cmd_rx, &ready_tx));

        let snapshot = ready_rx.recv().map_err(|_| StoreError::Closed)??;
        Ok(Self {
            tx: cmd_tx,
            snapshot,
        })
    }

    /// Enqueues an insert. Drop the ticket for fire-and-forget, or await it
    /// to observe the assigned id once the row is durable.
    pub fn insert(&self, task: Task) -> WriteTicket<TaskId> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let _ = self.tx.send(Command::Insert(task, reply_tx));
        WriteTicket { rx: reply_rx }
    }

    /// Enqueues a full-record update matched by `task.id`.
    pub fn update(&self, task: Task) -> WriteTicket<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let _ = self.tx.send(Command::Update(task, reply_tx));
        WriteTicket { rx: reply_rx }
    }

    /// Enqueues a delete by primary key. Deleting an absent row is a no-op.
    pub fn delete(&self, id: TaskId) -> WriteTicket<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let _ = self.tx.send(Command::Delete(id, reply_tx));
        WriteTicket { rx: reply_rx }
    }

    /// One-shot read through the same queue, so it observes every write
    /// enqueued before it.
    pub async fn list(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        self.list_ticket(filter).wait().await
    }

    /// Blocking variant of [`Self::list`] for synchronous callers (FFI).
    pub fn list_blocking(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        self.list_ticket(filter).wait_blocking()
    }

    fn list_ticket(&self, filter: TaskFilter) -> WriteTicket<Vec<Task>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let _ = self.tx.send(Command::List(filter, reply_tx));
        WriteTicket { rx: reply_rx }
    }

    /// Subscribes to the live query for `filter`.
    ///
    /// The watcher replays the latest matching rows immediately and wakes
    /// after every committed write.
    pub fn watch(&self, filter: TaskFilter) -> TaskWatch {
        TaskWatch {
            rx: self.snapshot.clone(),
            filter,
        }
    }
}

/// Pending store operation.
///
/// Dropping the ticket abandons the result without cancelling the
/// operation; the write still applies in queue order.
pub struct WriteTicket<T> {
    rx: oneshot::Receiver<StoreResult<T>>,
}

impl<T> std::fmt::Debug for WriteTicket<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WriteTicket")
    }
}

impl<T> WriteTicket<T> {
    /// Waits for the operation to commit (or fail).
    ///
    /// # Errors
    /// - `Closed` when the worker stopped before processing the command.
    pub async fn wait(self) -> StoreResult<T> {
        self.rx.await.unwrap_or_else(|_| Err(StoreError::Closed))
    }

    /// Blocking variant of [`Self::wait`]; must not be called from async
    /// context.
    pub fn wait_blocking(self) -> StoreResult<T> {
        self.rx
            .blocking_recv()
            .unwrap_or_else(|_| Err(StoreError::Closed))
    }
}

/// Live query subscription: replay-latest-on-subscribe, publish-on-write.
pub struct TaskWatch {
    rx: watch::Receiver<Vec<Task>>,
    filter: TaskFilter,
}

impl TaskWatch {
    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    /// Latest matching rows, ascending id.
    pub fn snapshot(&self) -> Vec<Task> {
        self.rx
            .borrow()
            .iter()
            .filter(|task| self.filter.matches(task))
            .cloned()
            .collect()
    }

    /// Waits until a snapshot newer than the last seen one is published.
    ///
    /// # Errors
    /// - `Closed` once the store worker has stopped.
    pub async fn changed(&mut self) -> StoreResult<()> {
        self.rx.changed().await.map_err(|_| StoreError::Closed)
    }

    /// Convenience: wait for the next publish, then return the snapshot.
    pub async fn next(&mut self) -> StoreResult<Vec<Task>> {
        self.changed().await?;
        Ok(self.snapshot())
    }
}

type Ready = StoreResult<watch::Receiver<Vec<Task>>>;

fn worker(location: &Location, commands: &mpsc::Receiver<Command>, ready: &mpsc::Sender<Ready>) {
    let conn = match location.open() {
        Ok(conn) => conn,
        Err(err) => {
            let _ = ready.send(Err(err.into()));
            return;
        }
    };
    let store = SqliteTaskStore::new(&conn);

    let initial = match store.list_all() {
        Ok(rows) => rows,
        Err(err) => {
            let _ = ready.send(Err(err));
            return;
        }
    };
    let (snapshot_tx, snapshot_rx) = watch::channel(initial);
    if ready.send(Ok(snapshot_rx)).is_err() {
        return;
    }
    info!("event=store_worker module=store status=ok state=started");

    while let Ok(command) = commands.recv() {
        match command {
            Command::Insert(task, reply) => {
                let result = store.insert(&task);
                finish_write("insert", result.as_ref().err(), &store, &snapshot_tx);
                let _ = reply.send(result);
            }
            Command::Update(task, reply) => {
                let result = store.update(&task);
                finish_write("update", result.as_ref().err(), &store, &snapshot_tx);
                let _ = reply.send(result);
            }
            Command::Delete(id, reply) => {
                let result = store.delete(id);
                finish_write("delete", result.as_ref().err(), &store, &snapshot_tx);
                let _ = reply.send(result);
            }
            Command::List(filter, reply) => {
                let result = match filter {
                    TaskFilter::All => store.list_all(),
                    TaskFilter::Status(done) => store.list_by_status(done),
                };
                let _ = reply.send(result);
            }
        }
    }

    info!("event=store_worker module=store status=ok state=stopped");
}

// Publish happens before the reply is sent, so an awaited ticket implies
// the covering snapshot is already visible to watchers.
fn finish_write(
    op: &str,
    failure: Option<&StoreError>,
    store: &SqliteTaskStore<'_>,
    snapshot_tx: &watch::Sender<Vec<Task>>,
) {
    match failure {
        Some(err) => {
            error!("event=store_write module=store status=error op={op} error={err}");
        }
        None => match store.list_all() {
            Ok(rows) => {
                let _ = snapshot_tx.send(rows);
            }
            Err(err) => {
                error!("event=store_snapshot module=store status=error op={op} error={err}");
            }
        },
    }
}
