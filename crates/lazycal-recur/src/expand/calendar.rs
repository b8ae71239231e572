//! Month arithmetic on whole calendar days.

use chrono::{Datelike, Days, Months, NaiveDate};
use lazycal_core::model::Weekday;

/// First day of the month containing `date`.
#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// First day of the month after the one starting at `first`.
#[must_use]
pub fn next_month(first: NaiveDate) -> Option<NaiveDate> {
    first.checked_add_months(Months::new(1))
}

/// Returns the number of days in a month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = next_month(first)?;
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// `months` calendar months after `start`.
///
/// Keeps the day of month when the target month has it and otherwise clamps
/// to the target month's last day (Jan 31 + 1 month = Feb 28/29).
#[must_use]
pub fn add_months_clamped(start: NaiveDate, months: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(months))
}

/// ## Summary
/// Date of the `position`-th `weekday` (1-based) in the given month.
///
/// Returns `None` when that occurrence would fall past the end of the month
/// (e.g. a fifth Monday in a month with four) or the month itself is invalid.
/// The date is never clamped or wrapped into the following month.
#[must_use]
pub fn nth_weekday_of_month(
    year: i32,
    month: u32,
    weekday: Weekday,
    position: u32,
) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let first_weekday = first.weekday().num_days_from_sunday();
    let first_occurrence = 1 + (weekday.num_days_from_sunday() + 7 - first_weekday) % 7;
    let day = first_occurrence.checked_add(position.checked_sub(1)?.checked_mul(7)?)?;

    if day > days_in_month(year, month)? {
        return None;
    }
    first.with_day(day)
}
