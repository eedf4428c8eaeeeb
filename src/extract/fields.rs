use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::impact::normalize_impact;
use super::record::EventRecord;
use super::rows::CalendarRow;

// Only clock-shaped times carry forward in `fill_missing_times`; labels
// like "All Day" or "Tentative" stay where they are.
static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,2}:\d{2}\s*(?i:am|pm)?$").expect("clock time regex should be valid")
});

/// Build a record from a classified row, or `None` when the trimmed event
/// text is empty. Non-empty event text is the sole test for "is this a
/// real event".
///
/// Missing cells degrade to empty strings rather than failing the row.
/// Values stay raw: unit suffixes like `%` or `K` are preserved as-is.
pub fn extract_event(
    row: &CalendarRow<'_>,
    date: Option<NaiveDate>,
    scraped_at: &str,
) -> Option<EventRecord> {
    let event = row.event_text().filter(|text| !text.is_empty())?;
    let impact = normalize_impact(row.impact_classes().iter().map(String::as_str));

    Some(EventRecord {
        date: date.map(|d| d.to_string()).unwrap_or_default(),
        time: row.time_text(),
        currency: row.currency_text(),
        impact: impact.as_str().to_string(),
        event,
        actual: row.actual_text(),
        forecast: row.forecast_text(),
        previous: row.previous_text(),
        scraped_at: scraped_at.to_string(),
    })
}

/// The page only prints a time on the first event of a time slot; later
/// events in the same slot have an empty time cell. Carry the last clock
/// time forward within each day. Crossing into a new date drops the
/// carried time.
pub fn fill_missing_times(records: &mut [EventRecord]) {
    let mut current_date: Option<String> = None;
    let mut carried: Option<String> = None;

    for record in records.iter_mut() {
        if current_date.as_deref() != Some(record.date.as_str()) {
            current_date = Some(record.date.clone());
            carried = None;
        }
        if !record.time.is_empty() {
            if CLOCK_TIME.is_match(&record.time) {
                carried = Some(record.time.clone());
            }
        } else if let Some(time) = &carried {
            record.time = time.clone();
        }
    }
}
