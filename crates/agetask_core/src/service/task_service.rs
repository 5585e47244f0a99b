//! Task and completion use-case service.
//!
//! # Responsibility
//! - Create/delete tasks and toggle per-day completions.
//! - Load a user's data into an immutable `TrackerSnapshot` for views.
//!
//! # Invariants
//! - Completions can only be toggled by the task owner.
//! - Checking an already-completed task/date writes nothing.
//! - Unchecking removes every duplicate record for the task/date.

use crate::model::completion::Completion;
use crate::model::task::{Frequency, Task, TaskId, UserId};
use crate::repo::completion_repo::CompletionRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoError;
use crate::view::snapshot::TrackerSnapshot;
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskRequest {
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    /// Defaults to the `today` passed to `add_task`.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug)]
pub enum TaskServiceError {
    TaskNotFound(TaskId),
    /// Caller does not own the task.
    NotOwner { task_id: TaskId, user_id: UserId },
    Repo(RepoError),
    InconsistentState(&'static str),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::NotOwner { task_id, user_id } => {
                write!(f, "task {task_id} is not owned by user {user_id}")
            }
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent task state: {details}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::TaskNotFound(id) => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Task/completion facade over repository implementations.
pub struct TaskService<T: TaskRepository, C: CompletionRepository> {
    tasks: T,
    completions: C,
}

impl<T: TaskRepository, C: CompletionRepository> TaskService<T, C> {
    pub fn new(tasks: T, completions: C) -> Self {
        Self { tasks, completions }
    }

    /// Creates a task and returns the persisted record.
    ///
    /// Title and description are trimmed; a blank description is dropped.
    pub fn add_task(
        &self,
        request: NewTaskRequest,
        today: NaiveDate,
    ) -> Result<Task, TaskServiceError> {
        let description = request
            .description
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let mut task = Task::new(
            request.user_id,
            request.title.trim(),
            request.frequency,
            request.start_date.unwrap_or(today),
        );
        task.description = description;
        task.end_date = request.end_date;

        let task_id = self.tasks.create_task(&task)?;
        info!(
            "event=task_create module=service status=ok task_id={task_id} frequency={}",
            task.frequency
        );
        self.tasks
            .get_task(task_id)?
            .ok_or(TaskServiceError::InconsistentState(
                "created task not found in read-back",
            ))
    }

    pub fn get_task(&self, task_id: TaskId) -> Result<Option<Task>, TaskServiceError> {
        Ok(self.tasks.get_task(task_id)?)
    }

    /// Deletes a task owned by `user_id` together with its completions.
    pub fn delete_task(&self, user_id: UserId, task_id: TaskId) -> Result<(), TaskServiceError> {
        self.owned_task(user_id, task_id)?;
        self.tasks.delete_task(task_id)?;
        info!("event=task_delete module=service status=ok task_id={task_id}");
        Ok(())
    }

    /// Marks (`completed = true`) or unmarks a task for `date`.
    ///
    /// Returns the resulting completion state.
    pub fn set_completion(
        &self,
        user_id: UserId,
        task_id: TaskId,
        date: NaiveDate,
        completed: bool,
    ) -> Result<bool, TaskServiceError> {
        self.owned_task(user_id, task_id)?;

        if completed {
            if !self.completions.has_completion(task_id, date)? {
                self.completions
                    .create_completion(&Completion::new(task_id, user_id, date))?;
            }
        } else {
            let removed = self.completions.delete_completions(task_id, date)?;
            info!(
                "event=completion_clear module=service status=ok task_id={task_id} removed={removed}"
            );
        }

        info!(
            "event=completion_set module=service status=ok task_id={task_id} date={date} completed={completed}"
        );
        Ok(completed)
    }

    /// Loads every task and completion of `user_id`.
    pub fn load_snapshot(&self, user_id: UserId) -> Result<TrackerSnapshot, TaskServiceError> {
        let tasks = self.tasks.list_tasks(user_id)?;
        let completions = self.completions.list_completions(user_id)?;
        info!(
            "event=snapshot_load module=service status=ok tasks={} completions={}",
            tasks.len(),
            completions.len()
        );
        Ok(TrackerSnapshot::new(tasks, completions))
    }

    fn owned_task(&self, user_id: UserId, task_id: TaskId) -> Result<Task, TaskServiceError> {
        let task = self
            .tasks
            .get_task(task_id)?
            .ok_or(TaskServiceError::TaskNotFound(task_id))?;
        if task.user_id != user_id {
            return Err(TaskServiceError::NotOwner { task_id, user_id });
        }
        Ok(task)
    }
}
