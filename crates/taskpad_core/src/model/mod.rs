//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record persisted by the store.
//! - Host the blank-title rule enforced by calling layers.
//!
//! # Invariants
//! - A store-assigned `id` is unique and stable for the row's lifetime.
//! - Deletion is a hard delete; there are no tombstones or versions.

pub mod task;
