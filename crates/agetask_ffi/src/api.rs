//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Translate string ids/dates into core types and core errors into
//!   response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Ids are UUID strings; dates are `YYYY-MM-DD` strings.
//! - "Now" is read from the local wall clock only at this boundary.

use agetask_core::db::open_db;
use agetask_core::{
    core_version as core_version_inner, day_view, db_path_from_env, format_calendar_date,
    init_logging as init_logging_inner, is_birthday, month_view, parse_calendar_date,
    ping as ping_inner, shift_period, week_view, year_view, DayCell, Frequency, NewTaskRequest,
    ProfileService, SqliteCompletionRepository, SqliteProfileRepository, SqliteTaskRepository,
    TaskService, TrackerSnapshot, ViewKind,
};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use log::warn;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope for mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Id of the created/affected record.
    pub id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: String) -> Self {
        Self {
            ok: true,
            id: Some(id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// One due task row of the day view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTaskRow {
    pub task_id: String,
    pub title: String,
    pub description: Option<String>,
    pub frequency_label: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayViewResponse {
    pub ok: bool,
    pub message: String,
    pub date: String,
    pub tasks: Vec<DayTaskRow>,
    pub due: u32,
    pub completed: u32,
    pub rate_percent: u32,
    /// `green|yellow|red|black`.
    pub tier: String,
    pub tier_label: String,
}

/// One cell of a week or month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: String,
    pub day_of_month: u32,
    pub in_month: bool,
    pub due: u32,
    pub completed: u32,
    pub tier: String,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGridResponse {
    pub ok: bool,
    pub message: String,
    /// Set for week grids only.
    pub week_number: Option<u32>,
    /// Week grids hold 7 cells, month grids 42 (row-major, 7 per row).
    pub cells: Vec<CalendarCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCard {
    pub month: u32,
    pub due: u32,
    pub completed: u32,
    pub rate_percent: u32,
    pub tier: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearViewResponse {
    pub ok: bool,
    pub message: String,
    pub year: i32,
    pub months: Vec<MonthCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeResponse {
    pub ok: bool,
    pub message: String,
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub total_days: i64,
    pub total_weeks: i64,
    /// `None` when the birthday does not exist this cycle (Feb 29).
    pub next_birthday: Option<String>,
    pub is_birthday: bool,
}

/// Stores the profile of an already-authenticated user.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_register(user_id: String, email: String, birth_date: String) -> ActionResponse {
    let result = (|| {
        let user_id = parse_id(&user_id, "user_id")?;
        let birth_date = parse_date(&birth_date, "birth_date")?;
        with_conn(|conn| {
            let repo = SqliteProfileRepository::try_new(conn).map_err(|err| err.to_string())?;
            ProfileService::new(repo)
                .register(user_id, email.as_str(), birth_date, today())
                .map_err(|err| err.to_string())
        })
    })();

    match result {
        Ok(profile) => ActionResponse::success("Profile registered.", profile.id.to_string()),
        Err(err) => ActionResponse::failure(format!("profile_register failed: {err}")),
    }
}

/// Adds a recurring task. `start_date` defaults to today.
///
/// `frequency` is trimmed and lowercased before parsing.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(
    user_id: String,
    title: String,
    description: Option<String>,
    frequency: String,
    start_date: Option<String>,
    end_date: Option<String>,
) -> ActionResponse {
    let result = (|| {
        let request = NewTaskRequest {
            user_id: parse_id(&user_id, "user_id")?,
            title,
            description,
            frequency: Frequency::parse(frequency.trim().to_ascii_lowercase().as_str()),
            start_date: parse_optional_date(start_date.as_deref(), "start_date")?,
            end_date: parse_optional_date(end_date.as_deref(), "end_date")?,
        };
        with_task_service(|service| {
            service
                .add_task(request, today())
                .map_err(|err| err.to_string())
        })
    })();

    match result {
        Ok(task) => ActionResponse::success("Task created.", task.id.to_string()),
        Err(err) => ActionResponse::failure(format!("task_add failed: {err}")),
    }
}

/// Deletes a task and its completions.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(user_id: String, task_id: String) -> ActionResponse {
    let result = (|| {
        let user_id = parse_id(&user_id, "user_id")?;
        let task_id = parse_id(&task_id, "task_id")?;
        with_task_service(|service| {
            service
                .delete_task(user_id, task_id)
                .map_err(|err| err.to_string())
        })?;
        Ok::<_, String>(task_id)
    })();

    match result {
        Ok(task_id) => ActionResponse::success("Task deleted.", task_id.to_string()),
        Err(err) => ActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

/// Checks (`completed=true`) or unchecks a task for `date`.
#[flutter_rust_bridge::frb(sync)]
pub fn completion_set(
    user_id: String,
    task_id: String,
    date: String,
    completed: bool,
) -> ActionResponse {
    let result = (|| {
        let user_id = parse_id(&user_id, "user_id")?;
        let task_id = parse_id(&task_id, "task_id")?;
        let date = parse_date(&date, "date")?;
        with_task_service(|service| {
            service
                .set_completion(user_id, task_id, date, completed)
                .map_err(|err| err.to_string())
        })?;
        Ok::<_, String>(task_id)
    })();

    match result {
        Ok(task_id) => {
            let message = if completed {
                "Task completed."
            } else {
                "Task reopened."
            };
            ActionResponse::success(message, task_id.to_string())
        }
        Err(err) => ActionResponse::failure(format!("completion_set failed: {err}")),
    }
}

/// Task list, quick stats and performance badge for one day.
#[flutter_rust_bridge::frb(sync)]
pub fn view_day(user_id: String, date: String) -> DayViewResponse {
    let result = (|| {
        let date = parse_date(&date, "date")?;
        let snapshot = load_snapshot(&user_id)?;
        Ok::<_, String>(day_view(&snapshot, date, now()))
    })();

    match result {
        Ok(view) => DayViewResponse {
            ok: true,
            message: String::new(),
            date: format_calendar_date(view.date),
            tasks: view
                .items
                .into_iter()
                .map(|item| DayTaskRow {
                    task_id: item.task.id.to_string(),
                    title: item.task.title,
                    description: item.task.description,
                    frequency_label: item.task.frequency.label().to_string(),
                    completed: item.completed,
                })
                .collect(),
            due: to_u32(view.counts.due),
            completed: to_u32(view.counts.completed),
            rate_percent: view.rate_percent,
            tier: view.tier.as_str().to_string(),
            tier_label: view.tier.label().to_string(),
        },
        Err(err) => DayViewResponse {
            ok: false,
            message: format!("view_day failed: {err}"),
            date,
            tasks: Vec::new(),
            due: 0,
            completed: 0,
            rate_percent: 0,
            tier: String::new(),
            tier_label: String::new(),
        },
    }
}

/// Seven-cell week grid containing `date`.
#[flutter_rust_bridge::frb(sync)]
pub fn view_week(user_id: String, date: String) -> CalendarGridResponse {
    let result = (|| {
        let date = parse_date(&date, "date")?;
        let snapshot = load_snapshot(&user_id)?;
        Ok::<_, String>(week_view(&snapshot, date, now()))
    })();

    match result {
        Ok(view) => CalendarGridResponse {
            ok: true,
            message: String::new(),
            week_number: Some(view.week_number),
            cells: view.cells.iter().map(to_calendar_cell).collect(),
        },
        Err(err) => grid_failure(format!("view_week failed: {err}")),
    }
}

/// Six-row month grid for the month containing `date`.
#[flutter_rust_bridge::frb(sync)]
pub fn view_month(user_id: String, date: String) -> CalendarGridResponse {
    let result = (|| {
        let date = parse_date(&date, "date")?;
        let snapshot = load_snapshot(&user_id)?;
        Ok::<_, String>(month_view(&snapshot, date, now()))
    })();

    match result {
        Ok(view) => CalendarGridResponse {
            ok: true,
            message: String::new(),
            week_number: None,
            cells: view.cells.iter().map(to_calendar_cell).collect(),
        },
        Err(err) => grid_failure(format!("view_month failed: {err}")),
    }
}

/// Twelve month cards for `year`.
#[flutter_rust_bridge::frb(sync)]
pub fn view_year(user_id: String, year: i32) -> YearViewResponse {
    match load_snapshot(&user_id).map(|snapshot| year_view(&snapshot, year)) {
        Ok(view) => YearViewResponse {
            ok: true,
            message: String::new(),
            year: view.year,
            months: view
                .months
                .iter()
                .map(|summary| MonthCard {
                    month: summary.month,
                    due: to_u32(summary.counts.due),
                    completed: to_u32(summary.counts.completed),
                    rate_percent: summary.rate_percent,
                    tier: summary.tier.as_str().to_string(),
                })
                .collect(),
        },
        Err(err) => YearViewResponse {
            ok: false,
            message: format!("view_year failed: {err}"),
            year,
            months: Vec::new(),
        },
    }
}

/// Age counter and birthday flag for the stored profile.
#[flutter_rust_bridge::frb(sync)]
pub fn age(user_id: String) -> AgeResponse {
    let now = now();
    let result = (|| {
        let user_id = parse_id(&user_id, "user_id")?;
        with_conn(|conn| {
            let repo = SqliteProfileRepository::try_new(conn).map_err(|err| err.to_string())?;
            let service = ProfileService::new(repo);
            let profile = service.get_profile(user_id).map_err(|err| err.to_string())?;
            let snapshot = service.age(user_id, now).map_err(|err| err.to_string())?;
            Ok((profile, snapshot))
        })
    })();

    match result {
        Ok((profile, snapshot)) => AgeResponse {
            ok: true,
            message: String::new(),
            years: snapshot.years,
            months: snapshot.months,
            days: snapshot.days,
            total_days: snapshot.total_days,
            total_weeks: snapshot.total_weeks,
            next_birthday: snapshot.next_birthday.map(format_calendar_date),
            is_birthday: is_birthday(profile.birth_date, now.date()),
        },
        Err(err) => AgeResponse {
            ok: false,
            message: format!("age failed: {err}"),
            years: 0,
            months: 0,
            days: 0,
            total_days: 0,
            total_weeks: 0,
            next_birthday: None,
            is_birthday: false,
        },
    }
}

/// Previous/next navigation anchor for a view (`day|week|month|year`).
///
/// Returns `None` for an unknown view, malformed date, or out-of-range result.
#[flutter_rust_bridge::frb(sync)]
pub fn navigate(view: String, date: String, steps: i32) -> Option<String> {
    let kind = ViewKind::parse(&view)?;
    let date = parse_calendar_date(&date).ok()?;
    shift_period(kind, date, steps).map(format_calendar_date)
}

/// Today's date in the device's local calendar.
#[flutter_rust_bridge::frb(sync)]
pub fn today_date() -> String {
    format_calendar_date(today())
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn today() -> NaiveDate {
    now().date()
}

fn parse_id(value: &str, field: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid {field} `{value}`"))
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, String> {
    parse_calendar_date(value)
        .map_err(|_| format!("invalid {field} `{value}`; expected YYYY-MM-DD"))
}

fn parse_optional_date(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, String> {
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => parse_date(raw, field).map(Some),
        None => Ok(None),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH.get_or_init(db_path_from_env).clone()
}

fn with_conn<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error error={err}");
        format!("DB open failed: {err}")
    })?;
    f(&conn)
}

fn with_task_service<T>(
    f: impl FnOnce(
        &TaskService<SqliteTaskRepository<'_>, SqliteCompletionRepository<'_>>,
    ) -> Result<T, String>,
) -> Result<T, String> {
    with_conn(|conn| {
        let tasks = SqliteTaskRepository::try_new(conn)
            .map_err(|err| format!("task repo init failed: {err}"))?;
        let completions = SqliteCompletionRepository::try_new(conn)
            .map_err(|err| format!("completion repo init failed: {err}"))?;
        f(&TaskService::new(tasks, completions))
    })
}

fn load_snapshot(user_id: &str) -> Result<TrackerSnapshot, String> {
    let user_id = parse_id(user_id, "user_id")?;
    with_task_service(|service| {
        service
            .load_snapshot(user_id)
            .map_err(|err| err.to_string())
    })
}

fn to_calendar_cell(cell: &DayCell) -> CalendarCell {
    CalendarCell {
        date: format_calendar_date(cell.date),
        day_of_month: cell.date.day(),
        in_month: cell.in_month,
        due: to_u32(cell.counts.due),
        completed: to_u32(cell.counts.completed),
        tier: cell.tier.as_str().to_string(),
        is_today: cell.is_today,
    }
}

fn grid_failure(message: String) -> CalendarGridResponse {
    CalendarGridResponse {
        ok: false,
        message,
        week_number: None,
        cells: Vec::new(),
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        age, completion_set, core_version, init_logging, navigate, ping, profile_register,
        task_add, task_delete, today_date, view_day, view_month, view_week, view_year,
    };
    use agetask_core::db::open_db;
    use uuid::Uuid;

    fn registered_user() -> String {
        let user_id = Uuid::new_v4().to_string();
        let email = format!("{}@example.com", Uuid::new_v4().simple());
        let response = profile_register(user_id.clone(), email, "1990-06-15".to_string());
        assert!(response.ok, "{}", response.message);
        user_id
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn profile_register_rejects_malformed_input() {
        let bad_id = profile_register(
            "nope".to_string(),
            "a@b.io".to_string(),
            "1990-01-01".to_string(),
        );
        assert!(!bad_id.ok);
        assert!(bad_id.message.contains("user_id"));

        let bad_date = profile_register(
            Uuid::new_v4().to_string(),
            "a@b.io".to_string(),
            "01/01/1990".to_string(),
        );
        assert!(!bad_date.ok);
        assert!(bad_date.message.contains("YYYY-MM-DD"));
    }

    #[test]
    fn task_add_persists_row_with_default_start_date() {
        let user_id = registered_user();
        let response = task_add(
            user_id,
            "  drink water ".to_string(),
            None,
            "daily".to_string(),
            None,
            None,
        );
        assert!(response.ok, "{}", response.message);
        let task_id = response.id.expect("task add should return id");

        let conn = open_db(super::resolve_db_path()).expect("open db");
        let (title, frequency, start): (String, String, String) = conn
            .query_row(
                "SELECT title, frequency, start_date FROM tasks WHERE id = ?1",
                [task_id.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .expect("query task row");
        assert_eq!(title, "drink water");
        assert_eq!(frequency, "daily");
        assert_eq!(start, today_date());
    }

    #[test]
    fn task_add_folds_case_of_frequency_input() {
        let user_id = registered_user();
        let response = task_add(
            user_id,
            "stretch".to_string(),
            None,
            " Weekly ".to_string(),
            Some("2024-01-06".to_string()),
            None,
        );
        assert!(response.ok, "{}", response.message);
        let task_id = response.id.expect("task id");

        let conn = open_db(super::resolve_db_path()).expect("open db");
        let frequency: String = conn
            .query_row(
                "SELECT frequency FROM tasks WHERE id = ?1",
                [task_id.as_str()],
                |row| row.get(0),
            )
            .expect("query task row");
        assert_eq!(frequency, "weekly");
    }

    #[test]
    fn task_add_rejects_unknown_frequency() {
        let user_id = registered_user();
        let response = task_add(
            user_id,
            "mystery".to_string(),
            None,
            "hourly".to_string(),
            None,
            None,
        );
        assert!(!response.ok);
        assert!(response.message.contains("frequency"));
    }

    #[test]
    fn completion_flow_updates_day_and_grid_views() {
        let user_id = registered_user();
        let task = task_add(
            user_id.clone(),
            "read".to_string(),
            Some("ten pages".to_string()),
            "weekly".to_string(),
            Some("2024-03-02".to_string()),
            None,
        );
        assert!(task.ok, "{}", task.message);
        let task_id = task.id.expect("task id");

        let checked = completion_set(
            user_id.clone(),
            task_id.clone(),
            "2024-03-09".to_string(),
            true,
        );
        assert!(checked.ok, "{}", checked.message);

        let day = view_day(user_id.clone(), "2024-03-09".to_string());
        assert!(day.ok, "{}", day.message);
        assert_eq!(day.tasks.len(), 1);
        assert!(day.tasks[0].completed);
        assert_eq!(day.tasks[0].frequency_label, "Weekly");
        assert_eq!((day.due, day.completed, day.rate_percent), (1, 1, 100));
        assert_eq!(day.tier, "green");

        let week = view_week(user_id.clone(), "2024-03-14".to_string());
        assert!(week.ok, "{}", week.message);
        assert_eq!(week.week_number, Some(11));
        assert_eq!(week.cells.len(), 7);
        assert_eq!(week.cells[0].date, "2024-03-09");
        assert_eq!(week.cells[0].tier, "green");

        let month = view_month(user_id.clone(), "2024-03-01".to_string());
        assert_eq!(month.cells.len(), 42);
        assert_eq!(month.cells[0].date, "2024-02-24");

        let year = view_year(user_id.clone(), 2024);
        assert_eq!(year.months.len(), 12);
        assert_eq!(year.months[2].completed, 1);

        let unchecked = completion_set(
            user_id.clone(),
            task_id.clone(),
            "2024-03-09".to_string(),
            false,
        );
        assert!(unchecked.ok, "{}", unchecked.message);
        let day = view_day(user_id.clone(), "2024-03-09".to_string());
        assert_eq!(day.tier, "black");

        let deleted = task_delete(user_id.clone(), task_id);
        assert!(deleted.ok, "{}", deleted.message);
        assert!(view_day(user_id, "2024-03-09".to_string()).tasks.is_empty());
    }

    #[test]
    fn age_reports_failure_for_unknown_user() {
        let response = age(Uuid::new_v4().to_string());
        assert!(!response.ok);
        assert!(response.message.contains("profile not found"));
    }

    #[test]
    fn age_reports_counter_for_registered_user() {
        let response = age(registered_user());
        assert!(response.ok, "{}", response.message);
        assert!(response.years >= 30);
        assert_eq!(response.total_weeks, response.total_days / 7);
    }

    #[test]
    fn navigate_steps_views_and_rejects_unknown_kinds() {
        assert_eq!(
            navigate("month".to_string(), "2024-01-31".to_string(), 1).as_deref(),
            Some("2024-02-29")
        );
        assert_eq!(
            navigate("week".to_string(), "2024-03-14".to_string(), -1).as_deref(),
            Some("2024-03-07")
        );
        assert_eq!(navigate("decade".to_string(), "2024-03-14".to_string(), 1), None);
    }
}
