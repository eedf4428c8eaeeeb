use serde::Serialize;

/// One normalized calendar entry. Every field is a defined string; empty
/// means "unspecified" (time, currency, impact) or "not yet reported"
/// (actual, forecast, previous). Field order here is the canonical output
/// order for both the JSON and CSV sinks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub date: String,
    pub time: String,
    pub currency: String,
    pub impact: String,
    pub event: String,
    pub actual: String,
    pub forecast: String,
    pub previous: String,
    pub scraped_at: String,
}

/// Outcome of one extraction pass over a fetched page.
#[derive(Clone, Debug, Default)]
pub struct ExtractionResult {
    pub events: Vec<EventRecord>,
    /// Event rows materialized before window filtering.
    pub total_extracted: usize,
    /// Records surviving the window filter (`events.len()`).
    pub total_in_week: usize,
}

impl ExtractionResult {
    /// The result a failed fetch degrades to.
    pub fn empty() -> Self {
        Self::default()
    }
}
