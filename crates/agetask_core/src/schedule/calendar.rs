//! Calendar arithmetic for day/week/month/year views.
//!
//! # Responsibility
//! - Compute week and month-grid boundaries under the Saturday-first week.
//! - Compute ISO-8601 week numbers.
//! - Step view anchors backwards/forwards by one period.
//!
//! # Invariants
//! - Weekday index 0 is Saturday, 6 is Friday.
//! - `month_grid_start` is never after the 1st and at most 6 days before it.
//! - Functions never panic at the edges of the representable date range;
//!   they saturate or return `None`.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, Weekday};

/// Storage and wire format of calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Rows x columns of the month grid.
pub const MONTH_GRID_ROWS: usize = 6;
pub const DAYS_PER_WEEK: usize = 7;

/// Column order of week and month grids.
pub const WEEK_ORDER: [Weekday; DAYS_PER_WEEK] = [
    Weekday::Sat,
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Calendar view granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Day,
    Week,
    Month,
    Year,
}

impl ViewKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}

/// Formats a calendar date as `YYYY-MM-DD`.
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Position of `date` in [`WEEK_ORDER`].
pub fn weekday_index(date: NaiveDate) -> u32 {
    (date.weekday().num_days_from_sunday() + 1) % 7
}

/// First day (Saturday) of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    back_days(date, weekday_index(date))
}

/// ISO-8601 week number of `date`.
///
/// The week belongs to the year of its Thursday; the number is the
/// 1-based index of that Thursday's 7-day block within its year.
pub fn week_number(date: NaiveDate) -> u32 {
    let day_num = date.weekday().number_from_monday();
    let thursday = if day_num <= 4 {
        forward_days(date, 4 - day_num)
    } else {
        back_days(date, day_num - 4)
    };
    (thursday.ordinal() + 6) / 7
}

/// First cell of the 6x7 month grid for the month containing `date`.
pub fn month_grid_start(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    week_start(first)
}

/// Whether `date` is the calendar day of `now`.
pub fn is_today(date: NaiveDate, now: NaiveDateTime) -> bool {
    date == now.date()
}

/// Number of days in `month` (1-12) of `year`. `0` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_first
        .and_then(|first| first.pred_opt())
        .filter(|last| last.month() == month)
        .map_or(0, |last| last.day())
}

/// Moves a view anchor by `steps` periods (negative = backwards).
///
/// Month and year steps clamp to the last valid day of the target month.
/// Returns `None` when the result leaves the representable range.
pub fn shift_period(view: ViewKind, date: NaiveDate, steps: i32) -> Option<NaiveDate> {
    let magnitude = steps.unsigned_abs();
    let forward = steps >= 0;
    match view {
        ViewKind::Day => shift_days(date, u64::from(magnitude), forward),
        ViewKind::Week => shift_days(date, u64::from(magnitude) * 7, forward),
        ViewKind::Month => shift_months(date, magnitude, forward),
        ViewKind::Year => shift_months(date, magnitude.checked_mul(12)?, forward),
    }
}

fn shift_days(date: NaiveDate, days: u64, forward: bool) -> Option<NaiveDate> {
    if forward {
        date.checked_add_days(Days::new(days))
    } else {
        date.checked_sub_days(Days::new(days))
    }
}

fn shift_months(date: NaiveDate, months: u32, forward: bool) -> Option<NaiveDate> {
    if forward {
        date.checked_add_months(Months::new(months))
    } else {
        date.checked_sub_months(Months::new(months))
    }
}

fn back_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

fn forward_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}
