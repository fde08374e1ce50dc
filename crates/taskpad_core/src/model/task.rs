//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted task record and its creation defaults.
//! - Provide the blank-title validation used by calling layers.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one; assigned ids never change.
//! - `is_done` defaults to `false` at creation.
//! - The store never enforces the title rule itself; callers do.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier (SQLite rowid space).
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// Persisted to-do record.
///
/// Updates are whole-record replacements matched by `id`, so "edit one
/// field" is expressed as a copy of the record with that field changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// `None` until the store has assigned a row id on insert.
    pub id: Option<TaskId>,
    /// Short task text; must be non-blank when a calling layer commits it.
    pub title: String,
    /// Optional free-form detail text.
    pub description: Option<String>,
    /// Completion flag driving the status filters.
    pub is_done: bool,
}

impl Task {
    /// Creates an unsaved task with creation defaults.
    ///
    /// # Invariants
    /// - `id` starts as `None` (the store assigns it on insert).
    /// - `is_done` starts as `false`.
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description,
            is_done: false,
        }
    }

    /// Checks the rule calling layers must apply before insert/update.
    ///
    /// # Errors
    /// - Returns `BlankTitle` when the title is empty or whitespace-only.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        Ok(())
    }

    /// Returns a full-record copy with only the completion flag changed.
    ///
    /// Update APIs take the entire record, so toggling completion is a
    /// replacement of the row with one field flipped.
    pub fn with_done(&self, done: bool) -> Self {
        Self {
            is_done: done,
            ..self.clone()
        }
    }
}

/// Violation of the calling-layer task rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    BlankTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}
