//! Age calculator.
//!
//! # Responsibility
//! - Derive the age counter (componentized and total) from a birth date.
//! - Compute the next birthday for the birthday notification.
//!
//! # Invariants
//! - "now" is always injected; nothing here reads the wall clock.
//! - Day borrow uses the length of the month *before now's month*, not the
//!   birth month. With a birth day larger than that length the borrowed
//!   `days` can stay negative (e.g. born on the 31st, now is March 1st).
//! - No Feb-29 fallback: a Feb-29 birthday has no next-birthday date in a
//!   non-leap year (`None`).

use crate::schedule::calendar::days_in_month;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Derived, never persisted age counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeSnapshot {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    /// Whole days between birth (midnight) and `now`, absolute.
    pub total_days: i64,
    pub total_weeks: i64,
    pub next_birthday: Option<NaiveDate>,
}

/// Computes the age counter for `birth_date` as observed at `now`.
pub fn age_snapshot(birth_date: NaiveDate, now: NaiveDateTime) -> AgeSnapshot {
    let today = now.date();

    let mut years = today.year() - birth_date.year();
    let mut months = today.month() as i32 - birth_date.month() as i32;
    let mut days = today.day() as i32 - birth_date.day() as i32;

    if days < 0 {
        months -= 1;
        days += previous_month_length(today) as i32;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    let elapsed = now.signed_duration_since(birth_date.and_time(NaiveTime::MIN));
    let total_days = elapsed.num_milliseconds().abs() / MILLIS_PER_DAY;

    AgeSnapshot {
        years,
        months,
        days,
        total_days,
        total_weeks: total_days / 7,
        next_birthday: next_birthday(birth_date, today),
    }
}

/// Next occurrence of the birth month/day on or after `today`.
///
/// Today's birthday counts as not yet passed: this year's birthday is only
/// skipped when its date is strictly before today, compared as calendar
/// dates without a time of day. `None` when the chosen year has no such
/// date (Feb 29 in a non-leap year).
pub fn next_birthday(birth_date: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let month_day = (birth_date.month(), birth_date.day());
    let passed = month_day < (today.month(), today.day());
    let year = if passed { today.year() + 1 } else { today.year() };
    NaiveDate::from_ymd_opt(year, month_day.0, month_day.1)
}

/// Whether `today` is the birthday (month and day match).
pub fn is_birthday(birth_date: NaiveDate, today: NaiveDate) -> bool {
    birth_date.month() == today.month() && birth_date.day() == today.day()
}

/// Birthday notification state for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayNotice {
    pub is_birthday: bool,
    pub next_birthday: Option<NaiveDate>,
    pub days_until: Option<i64>,
}

pub fn birthday_notice(birth_date: NaiveDate, today: NaiveDate) -> BirthdayNotice {
    BirthdayNotice {
        is_birthday: is_birthday(birth_date, today),
        next_birthday: next_birthday(birth_date, today),
        days_until: days_until_next_birthday(birth_date, today),
    }
}

/// Days from `today` to the next birthday, `0` on the birthday itself.
pub fn days_until_next_birthday(birth_date: NaiveDate, today: NaiveDate) -> Option<i64> {
    next_birthday(birth_date, today).map(|next| next.signed_duration_since(today).num_days())
}

fn previous_month_length(today: NaiveDate) -> u32 {
    if today.month() == 1 {
        days_in_month(today.year() - 1, 12)
    } else {
        days_in_month(today.year(), today.month() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::previous_month_length;
    use chrono::NaiveDate;

    #[test]
    fn previous_month_wraps_to_december() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(previous_month_length(today), 31);
        let march = NaiveDate::from_ymd_opt(2023, 3, 10).unwrap();
        assert_eq!(previous_month_length(march), 28);
    }
}
