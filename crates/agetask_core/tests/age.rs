use agetask_core::{
    age_snapshot, birthday_notice, days_until_next_birthday, is_birthday, next_birthday,
};
use chrono::{NaiveDate, NaiveDateTime};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    day(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

#[test]
fn day_before_birthday_borrows_from_previous_month_of_now() {
    let snapshot = age_snapshot(day(2000, 3, 15), at(2024, 3, 14, 9, 0));
    assert_eq!(snapshot.years, 23);
    assert_eq!(snapshot.months, 11);
    // Borrows February 2024 (29 days): 14 - 15 + 29.
    assert_eq!(snapshot.days, 28);
    assert_eq!(snapshot.total_days, 8765);
    assert_eq!(snapshot.total_weeks, 1252);
}

#[test]
fn birthday_itself_is_whole_years() {
    let snapshot = age_snapshot(day(2000, 3, 15), at(2024, 3, 15, 0, 0));
    assert_eq!((snapshot.years, snapshot.months, snapshot.days), (24, 0, 0));
    assert_eq!(snapshot.total_days, 8766);
    assert_eq!(snapshot.next_birthday, Some(day(2024, 3, 15)));
}

#[test]
fn birthday_later_in_the_day_is_still_upcoming() {
    let snapshot = age_snapshot(day(2000, 3, 15), at(2024, 3, 15, 18, 30));
    assert_eq!(snapshot.next_birthday, Some(day(2024, 3, 15)));
    assert_eq!(days_until_next_birthday(day(2000, 3, 15), day(2024, 3, 15)), Some(0));
}

#[test]
fn borrow_uses_now_month_not_birth_month() {
    // Born on the 31st, observed on March 1st of a non-leap year: the borrow
    // adds February's 28 days and leaves days negative.
    let snapshot = age_snapshot(day(2000, 1, 31), at(2023, 3, 1, 12, 0));
    assert_eq!((snapshot.years, snapshot.months, snapshot.days), (23, 1, -2));
    assert_eq!(snapshot.total_days, 8430);
}

#[test]
fn borrow_in_january_uses_december() {
    let snapshot = age_snapshot(day(1990, 6, 20), at(2024, 1, 5, 8, 0));
    assert_eq!((snapshot.years, snapshot.months, snapshot.days), (33, 6, 16));
}

#[test]
fn total_days_floors_partial_days() {
    let morning = age_snapshot(day(2024, 1, 1), at(2024, 1, 8, 0, 0));
    let night = age_snapshot(day(2024, 1, 1), at(2024, 1, 8, 23, 59));
    assert_eq!(morning.total_days, 7);
    assert_eq!(night.total_days, 7);
    assert_eq!(night.total_weeks, 1);
}

#[test]
fn next_birthday_rolls_over_once_passed() {
    let birth = day(2000, 3, 15);
    assert_eq!(next_birthday(birth, day(2024, 3, 14)), Some(day(2024, 3, 15)));
    assert_eq!(next_birthday(birth, day(2024, 3, 15)), Some(day(2024, 3, 15)));
    assert_eq!(next_birthday(birth, day(2024, 3, 16)), Some(day(2025, 3, 15)));
}

#[test]
fn feb_29_birthday_has_no_date_in_non_leap_year() {
    let birth = day(2004, 2, 29);
    assert_eq!(next_birthday(birth, day(2025, 1, 10)), None);
    assert_eq!(next_birthday(birth, day(2023, 3, 10)), Some(day(2024, 2, 29)));
    assert!(!is_birthday(birth, day(2025, 2, 28)));
    assert_eq!(days_until_next_birthday(birth, day(2025, 1, 10)), None);
}

#[test]
fn birthday_notice_reports_countdown() {
    let birth = day(1995, 10, 19);
    let today_notice = birthday_notice(birth, day(2026, 10, 19));
    assert!(today_notice.is_birthday);
    assert_eq!(today_notice.days_until, Some(0));

    let later = birthday_notice(birth, day(2026, 10, 9));
    assert!(!later.is_birthday);
    assert_eq!(later.days_until, Some(10));
    assert_eq!(later.next_birthday, Some(day(2026, 10, 19)));
}
