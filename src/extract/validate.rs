use thiserror::Error;

use super::record::EventRecord;

/// A nonzero extraction produced zero records inside the requested window,
/// which points at markup or date-wiring drift rather than a quiet week.
#[derive(Debug, Error)]
#[error(
    "no events within {week_start}..{week_end} out of {total_extracted} extracted rows; \
     the source markup may have changed"
)]
pub struct EmptyWeekError {
    pub total_extracted: usize,
    pub week_start: String,
    pub week_end: String,
}

/// Keep records dated within `week_start..=week_end`. ISO date strings
/// sort identically to chronological order, so the comparison is plain
/// lexicographic; records with an empty date never pass. Zero survivors
/// out of a nonzero extraction is an `EmptyWeekError`; an extraction that
/// was already empty is a legitimate quiet week.
pub fn filter_to_week(
    records: Vec<EventRecord>,
    week_start: &str,
    week_end: &str,
) -> Result<Vec<EventRecord>, EmptyWeekError> {
    let total_extracted = records.len();
    let kept: Vec<EventRecord> = records
        .into_iter()
        .filter(|r| r.date.as_str() >= week_start && r.date.as_str() <= week_end)
        .collect();

    if kept.is_empty() && total_extracted > 0 {
        return Err(EmptyWeekError {
            total_extracted,
            week_start: week_start.to_string(),
            week_end: week_end.to_string(),
        });
    }
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(date: &str) -> EventRecord {
        EventRecord {
            date: date.to_string(),
            time: String::new(),
            currency: String::new(),
            impact: String::new(),
            event: "some event".to_string(),
            actual: String::new(),
            forecast: String::new(),
            previous: String::new(),
            scraped_at: String::new(),
        }
    }

    #[test]
    fn bounds_are_inclusive_and_one_day_out_is_dropped() {
        let records = vec![
            dated("2025-08-17"),
            dated("2025-08-18"),
            dated("2025-08-21"),
            dated("2025-08-24"),
            dated("2025-08-25"),
        ];
        let kept = filter_to_week(records, "2025-08-18", "2025-08-24").unwrap();
        let dates: Vec<&str> = kept.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-08-18", "2025-08-21", "2025-08-24"]);
    }

    #[test]
    fn empty_dates_are_dropped() {
        let records = vec![dated(""), dated("2025-08-20")];
        let kept = filter_to_week(records, "2025-08-18", "2025-08-24").unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].date, "2025-08-20");
    }

    #[test]
    fn nonzero_extraction_with_no_survivors_is_an_error() {
        let records = vec![dated("2025-09-01"), dated("")];
        let err = filter_to_week(records, "2025-08-18", "2025-08-24").unwrap_err();
        assert_eq!(err.total_extracted, 2);
        assert_eq!(err.week_start, "2025-08-18");
        assert_eq!(err.week_end, "2025-08-24");
    }

    #[test]
    fn already_empty_extraction_is_a_quiet_week() {
        let kept = filter_to_week(Vec::new(), "2025-08-18", "2025-08-24").unwrap();
        assert!(kept.is_empty());
    }
}
