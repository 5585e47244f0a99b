//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `agetask_core` linkage.
//! - Resolve runtime configuration from `AGETASK_*` variables, start file
//!   logging and open the tracker database with it.
//! - Print today's calendar facts using the same week convention as the views.

use agetask_core::db::migrations::schema_version;
use agetask_core::db::open_db;
use agetask_core::{
    format_calendar_date, init_logging_from_config, week_number, week_start, TrackerConfig,
    WEEK_ORDER,
};
use chrono::{Local, NaiveDate};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match TrackerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("agetask_cli config error: {err}");
            return ExitCode::from(2);
        }
    };

    match startup(&config) {
        Ok(version) => {
            for line in summary_lines(Local::now().date_naive()) {
                println!("{line}");
            }
            println!("db_path={} schema_version={version}", config.db_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("agetask_cli startup failed: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Starts logging from `config` and opens its database.
///
/// Returns the schema version of the opened database.
fn startup(config: &TrackerConfig) -> Result<u32, String> {
    init_logging_from_config(config)?;
    let conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
    let version = schema_version(&conn).map_err(|err| err.to_string())?;
    info!("event=cli_start module=cli status=ok schema_version={version}");
    Ok(version)
}

fn summary_lines(today: NaiveDate) -> Vec<String> {
    vec![
        format!("agetask_core ping={}", agetask_core::ping()),
        format!("agetask_core version={}", agetask_core::core_version()),
        format!("today={}", format_calendar_date(today)),
        format!(
            "week={} week_start={} first_weekday={:?}",
            week_number(today),
            format_calendar_date(week_start(today)),
            WEEK_ORDER[0]
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{startup, summary_lines};
    use agetask_core::db::migrations::latest_version;
    use agetask_core::{logging_status, TrackerConfig};
    use chrono::NaiveDate;

    #[test]
    fn startup_uses_configured_log_dir_and_database() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("data").join("tracker.sqlite3");
        let log_dir = dir.path().join("logs");
        let vars = [
            ("AGETASK_DB_PATH", db_path.to_str().expect("utf-8 path").to_string()),
            ("AGETASK_LOG_LEVEL", "WARNING".to_string()),
            ("AGETASK_LOG_DIR", log_dir.to_str().expect("utf-8 path").to_string()),
        ];
        let config = TrackerConfig::from_lookup(|key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.clone())
        })
        .expect("config should resolve");

        let version = startup(&config).expect("startup should succeed");
        assert_eq!(version, latest_version());
        assert!(db_path.exists());

        let (level, active_dir) = logging_status().expect("logging should be active");
        assert_eq!(level, "warn");
        assert_eq!(active_dir, log_dir);
    }

    #[test]
    fn summary_reports_saturday_week_start() {
        let thursday = NaiveDate::from_ymd_opt(2024, 3, 14).expect("valid date");
        let lines = summary_lines(thursday);
        assert_eq!(lines[0], "agetask_core ping=pong");
        assert_eq!(lines[2], "today=2024-03-14");
        assert_eq!(lines[3], "week=11 week_start=2024-03-09 first_weekday=Sat");
    }
}
