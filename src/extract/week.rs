use chrono::{Datelike, Duration, NaiveDate};

/// Monday and Sunday (both inclusive) of the ISO week containing `anchor`.
pub fn resolve_week(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = anchor - Duration::days(anchor.weekday().num_days_from_monday() as i64);
    (monday, monday + Duration::days(6))
}

/// Date of the `index`-th day group on the weekly page, Monday being 0.
pub fn nth_day_of_week(monday: NaiveDate, index: u32) -> NaiveDate {
    monday + Duration::days(index as i64)
}

static MONTH_TOKENS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Weekly URL token the calendar site expects, e.g. `aug18.2025`.
/// The day is not zero-padded.
pub fn week_param(monday: NaiveDate) -> String {
    format!(
        "{}{}.{}",
        MONTH_TOKENS[monday.month0() as usize],
        monday.day(),
        monday.year()
    )
}
