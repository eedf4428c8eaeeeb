use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use super::week::nth_day_of_week;

// The site has used both BEM-style and bare class names for the same
// cells, so every selector accepts the pair.
static DATE_CELL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td.calendar__date, td.date").expect("date cell selector should be valid")
});
static EVENT_CELL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td.calendar__event, td.event").expect("event cell selector should be valid")
});
static TIME_CELL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td.calendar__time, td.time").expect("time cell selector should be valid")
});
static CURRENCY_CELL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td.calendar__currency, td.currency")
        .expect("currency cell selector should be valid")
});
static IMPACT_CELL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td.calendar__impact, td.impact").expect("impact cell selector should be valid")
});
static ACTUAL_CELL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td.calendar__actual, td.actual").expect("actual cell selector should be valid")
});
static FORECAST_CELL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td.calendar__forecast, td.forecast")
        .expect("forecast cell selector should be valid")
});
static PREVIOUS_CELL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td.calendar__previous, td.previous")
        .expect("previous cell selector should be valid")
});
static IMPACT_ICON: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span").expect("impact icon selector should be valid"));

/// Borrowed view over one `<tr>` of the calendar table. The page owns the
/// tree; rows only read it.
#[derive(Clone, Copy, Debug)]
pub struct CalendarRow<'a> {
    element: ElementRef<'a>,
}

impl<'a> CalendarRow<'a> {
    pub fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    fn cell_text(&self, selector: &Selector) -> Option<String> {
        self.element
            .select(selector)
            .next()
            .map(|cell| cell.text().collect::<String>().trim().to_string())
    }

    /// True when the row opens a new day group (non-empty date cell).
    pub fn is_date_marker(&self) -> bool {
        self.cell_text(&DATE_CELL)
            .map_or(false, |label| !label.is_empty())
    }

    /// Trimmed event text; `None` when the row has no event cell.
    pub fn event_text(&self) -> Option<String> {
        self.cell_text(&EVENT_CELL)
    }

    pub fn time_text(&self) -> String {
        self.cell_text(&TIME_CELL).unwrap_or_default()
    }

    pub fn currency_text(&self) -> String {
        self.cell_text(&CURRENCY_CELL).unwrap_or_default()
    }

    pub fn actual_text(&self) -> String {
        self.cell_text(&ACTUAL_CELL).unwrap_or_default()
    }

    pub fn forecast_text(&self) -> String {
        self.cell_text(&FORECAST_CELL).unwrap_or_default()
    }

    pub fn previous_text(&self) -> String {
        self.cell_text(&PREVIOUS_CELL).unwrap_or_default()
    }

    /// Class tokens of the impact icon, empty when the cell or the icon
    /// inside it is absent.
    pub fn impact_classes(&self) -> Vec<String> {
        self.element
            .select(&IMPACT_CELL)
            .next()
            .and_then(|cell| cell.select(&IMPACT_ICON).next())
            .map(|icon| {
                icon.value()
                    .attr("class")
                    .unwrap_or("")
                    .split_whitespace()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Resolve the date each row belongs to, in document order.
///
/// Explicit scan with a `(day_index, current_date)` accumulator: a
/// date-marker row advances the ordinal and rebinds the running date to
/// `monday + ordinal`; every row is emitted paired with the date in
/// effect, which stays `None` until the first marker. Marker rows remain
/// eligible as event rows, so one `<tr>` can both open a day and carry an
/// event. Markers are assumed to appear in increasing weekday order with
/// no repeats, which is how the weekly page is laid out.
pub fn assign_dates<'a>(
    rows: Vec<CalendarRow<'a>>,
    monday: NaiveDate,
) -> Vec<(CalendarRow<'a>, Option<NaiveDate>)> {
    rows.into_iter()
        .scan(
            (-1i64, None::<NaiveDate>),
            |(day_index, current_date), row| {
                if row.is_date_marker() {
                    *day_index += 1;
                    *current_date = Some(nth_day_of_week(monday, *day_index as u32));
                }
                Some((row, *current_date))
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    static ROW: Lazy<Selector> =
        Lazy::new(|| Selector::parse("tr.calendar__row").expect("row selector should be valid"));

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 18).unwrap()
    }

    fn iso(date: Option<NaiveDate>) -> String {
        date.map(|d| d.to_string()).unwrap_or_default()
    }

    #[test]
    fn cell_accessors_trim_and_default() {
        let html = r#"<table class="calendar__table">
            <tr class="calendar__row">
                <td class="calendar__date"><span>Tue</span> Aug 19</td>
                <td class="calendar__time"> 8:30am </td>
                <td class="calendar__currency">USD</td>
                <td class="calendar__impact"><span class="icon icon--ff-impact-red" title="High Impact Expected"></span></td>
                <td class="calendar__event">Core CPI m/m</td>
                <td class="calendar__actual"></td>
                <td class="calendar__forecast">0.3%</td>
                <td class="calendar__previous">0.2%</td>
            </tr>
        </table>"#;
        let doc = Html::parse_document(html);
        let row = CalendarRow::new(doc.select(&ROW).next().unwrap());

        assert!(row.is_date_marker());
        assert_eq!(row.event_text().as_deref(), Some("Core CPI m/m"));
        assert_eq!(row.time_text(), "8:30am");
        assert_eq!(row.currency_text(), "USD");
        assert_eq!(row.actual_text(), "");
        assert_eq!(row.forecast_text(), "0.3%");
        assert_eq!(row.previous_text(), "0.2%");
        assert_eq!(
            row.impact_classes(),
            vec!["icon".to_string(), "icon--ff-impact-red".to_string()]
        );
    }

    #[test]
    fn rows_without_cells_read_as_absent_or_empty() {
        let html = r#"<table class="calendar__table">
            <tr class="calendar__row"><td class="calendar__cell"></td></tr>
        </table>"#;
        let doc = Html::parse_document(html);
        let row = CalendarRow::new(doc.select(&ROW).next().unwrap());

        assert!(!row.is_date_marker());
        assert_eq!(row.event_text(), None);
        assert_eq!(row.time_text(), "");
        assert!(row.impact_classes().is_empty());
    }

    #[test]
    fn empty_date_cell_is_not_a_marker() {
        let html = r#"<table class="calendar__table">
            <tr class="calendar__row"><td class="calendar__date">   </td></tr>
        </table>"#;
        let doc = Html::parse_document(html);
        let row = CalendarRow::new(doc.select(&ROW).next().unwrap());
        assert!(!row.is_date_marker());
    }

    #[test]
    fn scan_assigns_marker_dates_in_document_order() {
        let html = r#"<table class="calendar__table">
            <tr class="calendar__row"><td class="calendar__event">Before any marker</td></tr>
            <tr class="calendar__row"><td class="calendar__date">Mon Aug 18</td><td class="calendar__event">Opening</td></tr>
            <tr class="calendar__row"><td class="calendar__event">Same day</td></tr>
            <tr class="calendar__row"><td class="calendar__date">Tue Aug 19</td></tr>
            <tr class="calendar__row"><td class="calendar__event">Tuesday event</td></tr>
        </table>"#;
        let doc = Html::parse_document(html);
        let rows: Vec<_> = doc.select(&ROW).map(CalendarRow::new).collect();
        let assigned = assign_dates(rows, monday());

        let dates: Vec<String> = assigned.iter().map(|(_, d)| iso(*d)).collect();
        assert_eq!(
            dates,
            vec![
                "".to_string(),
                "2025-08-18".to_string(),
                "2025-08-18".to_string(),
                "2025-08-19".to_string(),
                "2025-08-19".to_string(),
            ]
        );
    }

    #[test]
    fn distinct_dates_never_exceed_marker_count() {
        let html = r#"<table class="calendar__table">
            <tr class="calendar__row"><td class="calendar__date">Mon</td></tr>
            <tr class="calendar__row"><td class="calendar__event">a</td></tr>
            <tr class="calendar__row"><td class="calendar__event">b</td></tr>
            <tr class="calendar__row"><td class="calendar__date">Tue</td></tr>
            <tr class="calendar__row"><td class="calendar__event">c</td></tr>
        </table>"#;
        let doc = Html::parse_document(html);
        let rows: Vec<_> = doc.select(&ROW).map(CalendarRow::new).collect();
        let markers = rows.iter().filter(|r| r.is_date_marker()).count();

        let assigned = assign_dates(rows, monday());
        let distinct: std::collections::HashSet<_> =
            assigned.iter().filter_map(|(_, d)| *d).collect();
        assert!(distinct.len() <= markers);
    }
}
