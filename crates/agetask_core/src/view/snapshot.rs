//! Immutable input snapshot for view computations.

use crate::model::completion::Completion;
use crate::model::task::Task;
use crate::schedule::recurrence::{completed_task_ids_on, tasks_due_on};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tasks and completions of one user as loaded at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    pub tasks: Vec<Task>,
    pub completions: Vec<Completion>,
}

/// Due vs completed counts for one date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCounts {
    pub due: usize,
    pub completed: usize,
}

impl TrackerSnapshot {
    pub fn new(tasks: Vec<Task>, completions: Vec<Completion>) -> Self {
        Self { tasks, completions }
    }

    /// Tasks due on `date`, in snapshot order.
    pub fn due_on(&self, date: NaiveDate) -> Vec<&Task> {
        tasks_due_on(&self.tasks, date)
    }

    /// Counts due tasks and how many of them carry a completion on `date`.
    pub fn day_counts(&self, date: NaiveDate) -> DayCounts {
        let due = self.due_on(date);
        let completed_ids = completed_task_ids_on(&self.completions, date);
        let completed = due
            .iter()
            .filter(|task| completed_ids.contains(&task.id))
            .count();
        DayCounts {
            due: due.len(),
            completed,
        }
    }
}
