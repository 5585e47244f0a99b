//! Core domain logic for the age & habit tracker.
//! This crate is the single source of truth for recurrence, performance
//! and age invariants.

pub mod age;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;
pub mod view;

pub use age::{
    age_snapshot, birthday_notice, days_until_next_birthday, is_birthday, next_birthday,
    AgeSnapshot, BirthdayNotice,
};
pub use config::{db_path_from_env, ConfigError, TrackerConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::completion::{Completion, CompletionId, CompletionValidationError};
pub use model::profile::{ProfileValidationError, UserProfile};
pub use model::task::{Frequency, Task, TaskId, TaskValidationError, UserId};
pub use repo::completion_repo::{CompletionRepository, SqliteCompletionRepository};
pub use repo::profile_repo::{ProfileRepository, SqliteProfileRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use schedule::calendar::{
    days_in_month, format_calendar_date, is_today, month_grid_start, parse_calendar_date,
    shift_period, week_number, week_start, weekday_index, ViewKind, WEEK_ORDER,
};
pub use schedule::performance::{classify, completion_rate_percent, PerformanceTier};
pub use schedule::recurrence::{
    completed_task_ids_on, completions_on, is_completed, is_due, tasks_due_on,
};
pub use service::profile_service::{ProfileService, ProfileServiceError};
pub use service::task_service::{NewTaskRequest, TaskService, TaskServiceError};
pub use view::calendar_view::{
    day_view, month_view, week_view, year_view, DayCell, DayTaskItem, DayView, MonthSummary,
    MonthView, WeekView, YearView,
};
pub use view::snapshot::{DayCounts, TrackerSnapshot};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
