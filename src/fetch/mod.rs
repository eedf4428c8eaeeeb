// src/fetch/mod.rs

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::extract::rows::CalendarRow;
use crate::extract::week::{resolve_week, week_param};

pub const CALENDAR_URL: &str = "https://www.forexfactory.com/calendar";

/// Bound on the whole page load; there is no retry behind it.
const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

// The site serves a challenge page to obvious bots; a desktop user-agent
// gets the rendered table.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

static ROOT_TABLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table.calendar__table").expect("calendar table selector should be valid")
});
static ROW: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("tr.calendar__row, tr.calendar_row")
        .expect("calendar row selector should be valid")
});

/// Failures of the page-fetch collaborator. These are soft: the launcher
/// logs them and degrades to an empty result, unlike the validator's
/// `EmptyWeekError` which always propagates.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("calendar request timed out")]
    Timeout,
    #[error("calendar request failed: {0}")]
    Navigation(reqwest::Error),
    #[error("calendar table not found in fetched page")]
    MissingCalendarTable,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Navigation(err)
        }
    }
}

/// A fetched weekly page with its calendar table verified present.
/// Owns the parsed tree; the extraction pipeline borrows rows out of it.
#[derive(Debug)]
pub struct CalendarPage {
    document: Html,
}

impl CalendarPage {
    /// Parse an already-fetched page, verifying the calendar root.
    pub fn from_html(html: &str) -> Result<Self, FetchError> {
        let document = Html::parse_document(html);
        if document.select(&ROOT_TABLE).next().is_none() {
            return Err(FetchError::MissingCalendarTable);
        }
        Ok(Self { document })
    }

    /// Calendar rows in document order.
    pub fn rows(&self) -> Vec<CalendarRow<'_>> {
        let table = self
            .document
            .select(&ROOT_TABLE)
            .next()
            .expect("root table presence checked in from_html");
        table.select(&ROW).map(CalendarRow::new).collect()
    }
}

/// Client with the fixed page-load timeout and desktop user-agent.
pub fn build_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .cookie_store(true)
        .build()
}

/// Fetch the weekly page for `anchor`'s ISO week from the production site.
pub async fn fetch_calendar(client: &Client, anchor: NaiveDate) -> Result<CalendarPage, FetchError> {
    let base = Url::parse(CALENDAR_URL).expect("calendar base URL should be valid");
    fetch_calendar_from(client, &base, anchor).await
}

/// Same, against an explicit base URL; tests point this at a local mock.
pub async fn fetch_calendar_from(
    client: &Client,
    base: &Url,
    anchor: NaiveDate,
) -> Result<CalendarPage, FetchError> {
    let (monday, _) = resolve_week(anchor);
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("week", &week_param(monday));

    debug!(%url, "fetching weekly calendar page");
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    CalendarPage::from_html(&html)
}
