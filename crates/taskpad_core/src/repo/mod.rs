//! Repository facade over the live store.
//!
//! # Responsibility
//! - Give the view-model a seam that does not name the store's concrete
//!   type or threading model.
//!
//! # Invariants
//! - Pure delegation: no transformation, validation, or caching here.

pub mod task_repo;
