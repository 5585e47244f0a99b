//! Task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist and load recurring task definitions per user.
//!
//! # Invariants
//! - `create_task` calls `Task::validate()` before inserting.
//! - `list_tasks` returns tasks in insertion order so views stay stable.
//! - Deleting a task cascades to its completions.

use crate::model::task::{Frequency, Task, TaskId, UserId};
use crate::repo::{
    date_to_db, ensure_schema_ready, read_date, read_optional_date, read_uuid, RepoError,
    RepoResult,
};
use log::warn;
use rusqlite::{params, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    title,
    description,
    frequency,
    start_date,
    end_date
FROM tasks";

/// Repository interface for task reads and writes.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self, user_id: UserId) -> RepoResult<Vec<Task>>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `SchemaNotReady` when the connection was not migrated to the
    ///   latest schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                id,
                user_id,
                title,
                description,
                frequency,
                start_date,
                end_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                task.id.to_string(),
                task.user_id.to_string(),
                task.title.as_str(),
                task.description.as_deref(),
                task.frequency.as_str(),
                date_to_db(task.start_date),
                task.end_date.map(date_to_db),
            ],
        )?;

        Ok(task.id)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn list_tasks(&self, user_id: UserId) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([user_id.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::TaskNotFound(id));
        }
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id = read_uuid(row, "id", "tasks")?;
    let frequency_text: String = row.get("frequency")?;
    let frequency = Frequency::parse(&frequency_text);
    if frequency == Frequency::Unknown {
        warn!("event=task_load module=repo status=degraded reason=unknown_frequency task_id={id}");
    }

    Ok(Task {
        id,
        user_id: read_uuid(row, "user_id", "tasks")?,
        title: row.get("title")?,
        description: row.get("description")?,
        frequency,
        start_date: read_date(row, "start_date", "tasks")?,
        end_date: read_optional_date(row, "end_date", "tasks")?,
    })
}
