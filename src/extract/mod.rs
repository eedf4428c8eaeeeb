// src/extract/mod.rs
//
// The extraction pipeline: resolve the week, walk the calendar rows once
// assigning dates, materialize event records, fill forward shared times,
// then filter to the requested window. Each stage consumes the previous
// stage's output; the only fold-state is the classifier's scan accumulator.

pub mod fields;
pub mod impact;
pub mod record;
pub mod rows;
pub mod validate;
pub mod week;

use chrono::{NaiveDate, SecondsFormat, Utc};
use tracing::{debug, info};

use crate::fetch::CalendarPage;

pub use record::{EventRecord, ExtractionResult};
pub use validate::EmptyWeekError;

/// Run the pipeline against the anchor's ISO week.
pub fn extract_week(
    page: &CalendarPage,
    anchor: NaiveDate,
) -> Result<ExtractionResult, EmptyWeekError> {
    let (monday, sunday) = week::resolve_week(anchor);
    extract_range(page, anchor, &monday.to_string(), &sunday.to_string())
}

/// Run the pipeline with an explicit validation window. Date inference
/// still keys off the anchor's Monday, since that is the week the fetched
/// page lays out.
pub fn extract_range(
    page: &CalendarPage,
    anchor: NaiveDate,
    window_start: &str,
    window_end: &str,
) -> Result<ExtractionResult, EmptyWeekError> {
    let (monday, _) = week::resolve_week(anchor);
    let scraped_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut records: Vec<EventRecord> = rows::assign_dates(page.rows(), monday)
        .into_iter()
        .filter_map(|(row, date)| fields::extract_event(&row, date, &scraped_at))
        .collect();
    let total_extracted = records.len();
    debug!(total_extracted, "materialized event rows");

    fields::fill_missing_times(&mut records);

    let events = validate::filter_to_week(records, window_start, window_end)?;
    let total_in_week = events.len();
    info!(
        total_extracted,
        total_in_week, window_start, window_end, "extraction pass complete"
    );

    Ok(ExtractionResult {
        events,
        total_extracted,
        total_in_week,
    })
}
