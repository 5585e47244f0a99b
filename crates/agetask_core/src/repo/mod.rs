//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define per-aggregate data access contracts (profiles, tasks,
//!   completions) matching the tracker's persistence collaborator.
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Read paths reject malformed ids/dates as `RepoError::InvalidData`.
//! - Unrecognized stored frequencies load as `Frequency::Unknown`.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::completion::CompletionValidationError;
use crate::model::profile::ProfileValidationError;
use crate::model::task::{TaskId, TaskValidationError, UserId};
use crate::schedule::calendar::{format_calendar_date, parse_calendar_date};
use chrono::NaiveDate;
use rusqlite::{Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod completion_repo;
pub mod profile_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every tracker aggregate.
#[derive(Debug)]
pub enum RepoError {
    TaskValidation(TaskValidationError),
    ProfileValidation(ProfileValidationError),
    CompletionValidation(CompletionValidationError),
    Db(DbError),
    TaskNotFound(TaskId),
    ProfileNotFound(UserId),
    /// Connection schema does not match this binary.
    SchemaNotReady { found: u32, expected: u32 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskValidation(err) => write!(f, "{err}"),
            Self::ProfileValidation(err) => write!(f, "{err}"),
            Self::CompletionValidation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::ProfileNotFound(id) => write!(f, "profile not found: {id}"),
            Self::SchemaNotReady { found, expected } => write!(
                f,
                "database schema version {found} does not match expected {expected}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TaskValidation(err) => Some(err),
            Self::ProfileValidation(err) => Some(err),
            Self::CompletionValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::TaskValidation(value)
    }
}

impl From<ProfileValidationError> for RepoError {
    fn from(value: ProfileValidationError) -> Self {
        Self::ProfileValidation(value)
    }
}

impl From<CompletionValidationError> for RepoError {
    fn from(value: CompletionValidationError) -> Self {
        Self::CompletionValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections that were not opened through `db::open_db*`.
pub(crate) fn ensure_schema_ready(conn: &Connection) -> RepoResult<()> {
    let found = schema_version(conn)?;
    let expected = latest_version();
    if found != expected {
        return Err(RepoError::SchemaNotReady { found, expected });
    }
    Ok(())
}

pub(crate) fn read_uuid(row: &Row<'_>, column: &str, table: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{text}` in {table}.{column}"))
    })
}

pub(crate) fn read_date(row: &Row<'_>, column: &str, table: &str) -> RepoResult<NaiveDate> {
    let text: String = row.get(column)?;
    parse_stored_date(&text, column, table)
}

pub(crate) fn read_optional_date(
    row: &Row<'_>,
    column: &str,
    table: &str,
) -> RepoResult<Option<NaiveDate>> {
    match row.get::<_, Option<String>>(column)? {
        Some(text) => Ok(Some(parse_stored_date(&text, column, table)?)),
        None => Ok(None),
    }
}

pub(crate) fn date_to_db(date: NaiveDate) -> String {
    format_calendar_date(date)
}

fn parse_stored_date(text: &str, column: &str, table: &str) -> RepoResult<NaiveDate> {
    parse_calendar_date(text).map_err(|_| {
        RepoError::InvalidData(format!("invalid date value `{text}` in {table}.{column}"))
    })
}
