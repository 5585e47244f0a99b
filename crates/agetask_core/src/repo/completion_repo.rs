//! Completion repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Duplicate `(task_id, completion_date)` rows are allowed; readers
//!   collapse them.
//! - `delete_completions` removes every duplicate for the pair.
//! - A completion is only stored for an existing task owned by its `user_id`.

use crate::model::completion::{Completion, CompletionValidationError};
use crate::model::task::{TaskId, UserId};
use crate::repo::{
    date_to_db, ensure_schema_ready, read_date, read_uuid, RepoError, RepoResult,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

const COMPLETION_SELECT_SQL: &str = "SELECT
    id,
    task_id,
    user_id,
    completion_date
FROM task_completions";

/// Repository interface for per-day completion records.
pub trait CompletionRepository {
    fn create_completion(&self, completion: &Completion) -> RepoResult<()>;
    /// Returns the number of removed rows.
    fn delete_completions(&self, task_id: TaskId, date: NaiveDate) -> RepoResult<usize>;
    fn list_completions(&self, user_id: UserId) -> RepoResult<Vec<Completion>>;
    fn has_completion(&self, task_id: TaskId, date: NaiveDate) -> RepoResult<bool>;
}

/// SQLite-backed completion repository.
pub struct SqliteCompletionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCompletionRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CompletionRepository for SqliteCompletionRepository<'_> {
    fn create_completion(&self, completion: &Completion) -> RepoResult<()> {
        completion.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO task_completions (
                id,
                task_id,
                user_id,
                completion_date
            )
            SELECT ?1, id, user_id, ?4
            FROM tasks
            WHERE id = ?2 AND user_id = ?3;",
            params![
                completion.id.to_string(),
                completion.task_id.to_string(),
                completion.user_id.to_string(),
                date_to_db(completion.completion_date),
            ],
        )?;
        if inserted == 1 {
            return Ok(());
        }

        let task_exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1);",
            [completion.task_id.to_string()],
            |row| row.get::<_, bool>(0),
        )?;
        if !task_exists {
            return Err(RepoError::TaskNotFound(completion.task_id));
        }
        Err(CompletionValidationError::OwnerMismatch {
            task_id: completion.task_id,
            user_id: completion.user_id,
        }
        .into())
    }

    fn delete_completions(&self, task_id: TaskId, date: NaiveDate) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM task_completions
             WHERE task_id = ?1 AND completion_date = ?2;",
            params![task_id.to_string(), date_to_db(date)],
        )?;
        Ok(removed)
    }

    fn list_completions(&self, user_id: UserId) -> RepoResult<Vec<Completion>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMPLETION_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY completion_date ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([user_id.to_string()])?;
        let mut completions = Vec::new();
        while let Some(row) = rows.next()? {
            completions.push(parse_completion_row(row)?);
        }
        Ok(completions)
    }

    fn has_completion(&self, task_id: TaskId, date: NaiveDate) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM task_completions
                WHERE task_id = ?1 AND completion_date = ?2
            );",
            params![task_id.to_string(), date_to_db(date)],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_completion_row(row: &Row<'_>) -> RepoResult<Completion> {
    Ok(Completion {
        id: read_uuid(row, "id", "task_completions")?,
        task_id: read_uuid(row, "task_id", "task_completions")?,
        user_id: read_uuid(row, "user_id", "task_completions")?,
        completion_date: read_date(row, "completion_date", "task_completions")?,
    })
}
