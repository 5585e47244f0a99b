//! Recurrence matching.
//!
//! # Invariants
//! - A task is never due before `start_date` or after `end_date`.
//! - Monthly tasks whose start day does not exist in a month skip that month.
//! - Yearly tasks starting on Feb 29 skip non-leap years.

use crate::model::completion::Completion;
use crate::model::task::{Frequency, Task, TaskId};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

/// Returns whether `task` is scheduled on `date`.
///
/// Missing `end_date` is treated as unbounded. Unknown frequencies are never
/// due.
pub fn is_due(task: &Task, date: NaiveDate) -> bool {
    let effective_end = task.end_date.unwrap_or(date);
    if date < task.start_date || date > effective_end {
        return false;
    }

    let start = task.start_date;
    match task.frequency {
        Frequency::Daily => true,
        Frequency::Weekly => date.weekday() == start.weekday(),
        Frequency::Monthly => date.day() == start.day(),
        Frequency::Yearly => date.month() == start.month() && date.day() == start.day(),
        Frequency::Unknown => false,
    }
}

/// Filters `tasks` down to the ones due on `date`, keeping input order.
pub fn tasks_due_on(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|task| is_due(task, date)).collect()
}

/// Filters `completions` down to records dated exactly `date`.
pub fn completions_on(completions: &[Completion], date: NaiveDate) -> Vec<&Completion> {
    completions
        .iter()
        .filter(|completion| completion.completion_date == date)
        .collect()
}

/// Distinct task ids completed on `date`. Duplicate records collapse.
pub fn completed_task_ids_on(completions: &[Completion], date: NaiveDate) -> HashSet<TaskId> {
    completions_on(completions, date)
        .into_iter()
        .map(|completion| completion.task_id)
        .collect()
}

/// Returns whether `task_id` has at least one completion on `date`.
pub fn is_completed(completions: &[Completion], task_id: TaskId, date: NaiveDate) -> bool {
    completions
        .iter()
        .any(|completion| completion.task_id == task_id && completion.completion_date == date)
}

#[cfg(test)]
mod tests {
    use super::{completed_task_ids_on, is_due};
    use crate::model::completion::Completion;
    use crate::model::task::{Frequency, Task};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn end_before_start_is_never_due() {
        let task = Task::new(Uuid::new_v4(), "x", Frequency::Daily, day(2024, 5, 10))
            .ending(day(2024, 5, 1));
        assert!(!is_due(&task, day(2024, 5, 5)));
        assert!(!is_due(&task, day(2024, 5, 10)));
    }

    #[test]
    fn duplicate_completions_collapse() {
        let task_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let date = day(2024, 2, 2);
        let completions = vec![
            Completion::new(task_id, user_id, date),
            Completion::new(task_id, user_id, date),
        ];
        assert_eq!(completed_task_ids_on(&completions, date).len(), 1);
    }
}
