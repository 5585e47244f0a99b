//! Per-day completion record.
//!
//! A task counts as completed for a date iff at least one record exists with
//! that exact `task_id` and `completion_date`. Duplicates are tolerated in
//! storage and collapse to one logical flag in the engines.

use crate::model::task::{TaskId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one completion row.
pub type CompletionId = Uuid;

/// Validation failures for completion writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionValidationError {
    NilId,
    NilTaskId,
    NilUserId,
    /// `user_id` is not the owner of `task_id`.
    OwnerMismatch { task_id: TaskId, user_id: UserId },
}

impl Display for CompletionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "completion id must not be nil"),
            Self::NilTaskId => write!(f, "completion task_id must not be nil"),
            Self::NilUserId => write!(f, "completion user_id must not be nil"),
            Self::OwnerMismatch { task_id, user_id } => {
                write!(f, "completion user {user_id} does not own task {task_id}")
            }
        }
    }
}

impl Error for CompletionValidationError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub id: CompletionId,
    pub task_id: TaskId,
    pub user_id: UserId,
    pub completion_date: NaiveDate,
}

impl Completion {
    pub fn new(task_id: TaskId, user_id: UserId, completion_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_id,
            user_id,
            completion_date,
        }
    }

    /// Validates fields required before persistence.
    pub fn validate(&self) -> Result<(), CompletionValidationError> {
        if self.id.is_nil() {
            return Err(CompletionValidationError::NilId);
        }
        if self.task_id.is_nil() {
            return Err(CompletionValidationError::NilTaskId);
        }
        if self.user_id.is_nil() {
            return Err(CompletionValidationError::NilUserId);
        }
        Ok(())
    }
}
