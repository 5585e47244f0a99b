//! Day/week/month/year projections.
//!
//! # Responsibility
//! - Build the per-cell counts and tiers each calendar view renders.
//!
//! # Invariants
//! - Week views hold exactly 7 cells starting at `week_start`.
//! - Month views hold exactly 42 cells starting at `month_grid_start`.
//! - Year views hold 12 month summaries in calendar order.

use crate::model::task::Task;
use crate::schedule::calendar::{
    is_today, month_grid_start, week_number, week_start, DAYS_PER_WEEK, MONTH_GRID_ROWS,
};
use crate::schedule::performance::{classify, completion_rate_percent, PerformanceTier};
use crate::schedule::recurrence::is_completed;
use crate::view::snapshot::{DayCounts, TrackerSnapshot};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One due task with its completion flag for the viewed day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTaskItem {
    pub task: Task,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub items: Vec<DayTaskItem>,
    pub counts: DayCounts,
    pub rate_percent: u32,
    pub tier: PerformanceTier,
    pub is_today: bool,
}

/// One grid cell of a week or month view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// `false` for leading/trailing days of a month grid.
    pub in_month: bool,
    pub counts: DayCounts,
    pub tier: PerformanceTier,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekView {
    pub week_number: u32,
    pub start: NaiveDate,
    pub cells: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub grid_start: NaiveDate,
    pub cells: Vec<DayCell>,
}

impl MonthView {
    /// Cells grouped into rows of 7.
    pub fn rows(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: u32,
    pub counts: DayCounts,
    pub rate_percent: u32,
    pub tier: PerformanceTier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearView {
    pub year: i32,
    pub months: Vec<MonthSummary>,
}

/// Task list, quick stats and badge for one day.
pub fn day_view(snapshot: &TrackerSnapshot, date: NaiveDate, now: NaiveDateTime) -> DayView {
    let items = snapshot
        .due_on(date)
        .into_iter()
        .map(|task| DayTaskItem {
            completed: is_completed(&snapshot.completions, task.id, date),
            task: task.clone(),
        })
        .collect::<Vec<_>>();
    let counts = DayCounts {
        due: items.len(),
        completed: items.iter().filter(|item| item.completed).count(),
    };

    DayView {
        date,
        items,
        counts,
        rate_percent: completion_rate_percent(counts.due, counts.completed),
        tier: classify(counts.due, counts.completed),
        is_today: is_today(date, now),
    }
}

/// Seven cells of the Saturday-first week containing `date`.
pub fn week_view(snapshot: &TrackerSnapshot, date: NaiveDate, now: NaiveDateTime) -> WeekView {
    let start = week_start(date);
    let cells = start
        .iter_days()
        .take(DAYS_PER_WEEK)
        .map(|day| day_cell(snapshot, day, true, now))
        .collect();

    WeekView {
        week_number: week_number(date),
        start,
        cells,
    }
}

/// Six-row month grid for the month containing `date`.
pub fn month_view(snapshot: &TrackerSnapshot, date: NaiveDate, now: NaiveDateTime) -> MonthView {
    let grid_start = month_grid_start(date);
    let cells = grid_start
        .iter_days()
        .take(MONTH_GRID_ROWS * DAYS_PER_WEEK)
        .map(|day| {
            let in_month = day.year() == date.year() && day.month() == date.month();
            day_cell(snapshot, day, in_month, now)
        })
        .collect();

    MonthView {
        year: date.year(),
        month: date.month(),
        grid_start,
        cells,
    }
}

/// Twelve month cards with counts summed over every day of each month.
pub fn year_view(snapshot: &TrackerSnapshot, year: i32) -> YearView {
    let months = (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
        .map(|first| month_summary(snapshot, first))
        .collect();

    YearView { year, months }
}

fn month_summary(snapshot: &TrackerSnapshot, first: NaiveDate) -> MonthSummary {
    let counts = first
        .iter_days()
        .take_while(|day| day.month() == first.month())
        .map(|day| snapshot.day_counts(day))
        .fold(DayCounts::default(), |total, day| DayCounts {
            due: total.due + day.due,
            completed: total.completed + day.completed,
        });

    MonthSummary {
        month: first.month(),
        counts,
        rate_percent: completion_rate_percent(counts.due, counts.completed),
        tier: classify(counts.due, counts.completed),
    }
}

fn day_cell(
    snapshot: &TrackerSnapshot,
    date: NaiveDate,
    in_month: bool,
    now: NaiveDateTime,
) -> DayCell {
    let counts = snapshot.day_counts(date);
    DayCell {
        date,
        in_month,
        counts,
        tier: classify(counts.due, counts.completed),
        is_today: is_today(date, now),
    }
}
