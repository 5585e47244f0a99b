//! Recurring task model.
//!
//! # Responsibility
//! - Define the task record and its recurrence frequency.
//! - Provide write-path validation.
//!
//! # Invariants
//! - `title` is non-blank.
//! - `start_date` is inclusive; `end_date` is inclusive when present.
//! - `end_date < start_date` is representable and simply never due.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a task.
pub type TaskId = Uuid;
/// Stable identifier of the owning user (issued by the identity provider).
pub type UserId = Uuid;

/// Recurrence pattern of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// Any unrecognized stored value. Never due.
    Unknown,
}

impl Frequency {
    /// Parses a stored/wire value. Only the exact lowercase names are
    /// recognized; anything else maps to `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Unknown => "unknown",
        }
    }

    /// Display label used by task lists.
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<String> for Frequency {
    fn from(value: String) -> Self {
        Self::parse(value.as_str())
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for task writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    NilId,
    NilUserId,
    BlankTitle,
    UnknownFrequency,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::NilUserId => write!(f, "task user_id must not be nil"),
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::UnknownFrequency => {
                write!(f, "task frequency must be one of daily|weekly|monthly|yearly")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// A recurring task definition owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    /// Inclusive. `None` means open-ended.
    pub end_date: Option<NaiveDate>,
}

impl Task {
    /// Creates an open-ended task with a generated id.
    pub fn new(
        user_id: UserId,
        title: impl Into<String>,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            description: None,
            frequency,
            start_date,
            end_date: None,
        }
    }

    /// Sets an inclusive end date.
    pub fn ending(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Validates fields required before persistence.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.user_id.is_nil() {
            return Err(TaskValidationError::NilUserId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        if self.frequency == Frequency::Unknown {
            return Err(TaskValidationError::UnknownFrequency);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Frequency, Task, TaskValidationError};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn frequency_parse_matches_exact_names_only() {
        assert_eq!(Frequency::parse("yearly"), Frequency::Yearly);
        assert_eq!(Frequency::parse("Weekly"), Frequency::Unknown);
        assert_eq!(Frequency::parse("DAILY"), Frequency::Unknown);
        assert_eq!(Frequency::parse(" daily "), Frequency::Unknown);
        assert_eq!(Frequency::parse("hourly"), Frequency::Unknown);
    }

    #[test]
    fn validate_rejects_blank_title_and_unknown_frequency() {
        let user = Uuid::new_v4();
        let blank = Task::new(user, "   ", Frequency::Daily, day(2024, 1, 1));
        assert_eq!(blank.validate(), Err(TaskValidationError::BlankTitle));

        let unknown = Task::new(user, "read", Frequency::Unknown, day(2024, 1, 1));
        assert_eq!(unknown.validate(), Err(TaskValidationError::UnknownFrequency));
    }

    #[test]
    fn validate_accepts_end_before_start() {
        let task = Task::new(Uuid::new_v4(), "read", Frequency::Daily, day(2024, 5, 1))
            .ending(day(2024, 4, 1));
        assert!(task.validate().is_ok());
    }
}
