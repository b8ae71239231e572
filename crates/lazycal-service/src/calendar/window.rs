use chrono::{Datelike, NaiveDate};
use lazycal_recur::expand::calendar::days_in_month;

/// ## Summary
/// First and last day of a month: the window both the calendar grid and the
/// list view query with.
///
/// Returns `None` for a month outside 1-12 or a year chrono cannot represent.
#[must_use]
pub fn month_window(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.with_day(days_in_month(year, month)?)?;
    Some((first, last))
}
