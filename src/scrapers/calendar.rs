//! Calendar page scraping.
//!
//! The calendar table is rendered for reading, not for machines: the date
//! cell is only filled on the first row of each day and the time cell only
//! on the first row of each run of same-time events. Extraction therefore
//! walks rows in order, carrying the last seen date and time forward into
//! rows that leave them blank.
//!
//! ```text
//! date        time     title              -> emitted as
//! Mon Jan 6   1:00am   A                  -> Mon Jan 6 / 1:00am / A
//!                      B                  -> Mon Jan 6 / 1:00am / B
//!             3:00am   C                  -> Mon Jan 6 / 3:00am / C
//! Tue Jan 7   9:00am   D                  -> Tue Jan 7 / 9:00am / D
//! ```

use super::{Scraper, element_text, selector};
use crate::client::FetchText;
use crate::error::{CalendarError, Result};
use crate::impact::classify_impact;
use crate::models::{CalendarResult, DatedEvent, Day, Event};
use crate::timezone::{convert_to_utc_in_year, resolve_offset_hours};
use crate::utils::current_week;
use chrono::{Datelike, Days, Local, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::{debug, info, instrument};

static TIMEZONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)timezone["']?\s*[:=]\s*["']([A-Za-z]+(?:/[A-Za-z0-9_+\-]+)*)["']"#)
        .expect("valid timezone regex")
});

/// The cells of one calendar row, read verbatim and trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// `None` when the row carries no identifier attribute at all.
    pub event_id: Option<String>,
    pub date: String,
    pub time: String,
    pub currency: String,
    pub title: String,
    pub actual: String,
    pub previous: String,
    pub forecast: String,
    /// Style marker of the impact icon, e.g. `"icon icon--ff-impact-red"`.
    pub impact_class: String,
}

/// Date and time carried across rows of one extraction pass.
#[derive(Debug, Default)]
struct CarryForward {
    last_date: String,
    last_time: String,
}

impl CarryForward {
    /// Fold one row into the carried state, producing an event if the row
    /// has a payload.
    fn apply(&mut self, row: RawRow, offset_hours: i32, year: i32) -> Option<DatedEvent> {
        let event_id = row.event_id?;

        if !row.date.is_empty() && row.date != self.last_date {
            self.last_date = row.date;
        }
        if !row.time.is_empty() && row.time != self.last_time {
            self.last_time = row.time;
        }

        if self.last_date.is_empty() || row.title.is_empty() || event_id.is_empty() {
            debug!(%event_id, "Skipping calendar row without payload");
            return None;
        }

        let timestamp = convert_to_utc_in_year(&self.last_time, &self.last_date, offset_hours, year);
        Some(DatedEvent {
            date: self.last_date.clone(),
            event: Event {
                event_id,
                time: self.last_time.clone(),
                currency: row.currency,
                title: row.title,
                actual: row.actual,
                previous: row.previous,
                forecast: row.forecast,
                impact: classify_impact(&row.impact_class),
                timestamp,
            },
        })
    }
}

/// Rebuild complete events from sparse rows, dating them in `year`.
///
/// Output keeps source row order. Rows without an identifier are skipped
/// without touching the carried state; rows with no date yet, no title or
/// an empty identifier are dropped.
pub fn extract_events_in_year(
    rows: impl IntoIterator<Item = RawRow>,
    offset_hours: i32,
    year: i32,
) -> Vec<DatedEvent> {
    rows.into_iter()
        .scan(CarryForward::default(), |carry, row| {
            Some(carry.apply(row, offset_hours, year))
        })
        .flatten()
        .collect()
}

/// [`extract_events_in_year`] for the current system year.
pub fn extract_events(rows: impl IntoIterator<Item = RawRow>, offset_hours: i32) -> Vec<DatedEvent> {
    extract_events_in_year(rows, offset_hours, Utc::now().year())
}

/// Fold events into per-day buckets.
///
/// Buckets appear in the order their date is first seen, events keep
/// their relative order. This is a stable grouping, not a sort: a date
/// that reappears later joins its existing bucket.
pub fn group_by_day(events: impl IntoIterator<Item = DatedEvent>) -> Vec<Day> {
    let mut days: Vec<Day> = Vec::new();
    for DatedEvent { date, event } in events {
        match days.iter_mut().find(|day| day.date == date) {
            Some(day) => day.events.push(event),
            None => days.push(Day {
                date,
                events: vec![event],
            }),
        }
    }
    days
}

fn cell_text(row: ElementRef<'_>, css: &str) -> String {
    row.select(&selector(css))
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Read the cells of one `tr.calendar__row`.
pub fn read_row(row: ElementRef<'_>) -> RawRow {
    let attrs = row.value();
    let event_id = attrs
        .attr("data-event-id")
        .or_else(|| attrs.attr("data-eventid"))
        .map(|id| id.trim().to_string());

    let impact_class = row
        .select(&selector(".calendar__impact span"))
        .next()
        .or_else(|| row.select(&selector(".calendar__impact")).next())
        .and_then(|el| el.value().attr("class"))
        .unwrap_or_default()
        .trim()
        .to_string();

    let title = match cell_text(row, ".calendar__event-title") {
        t if t.is_empty() => cell_text(row, ".calendar__event"),
        t => t,
    };

    RawRow {
        event_id,
        date: cell_text(row, ".calendar__date"),
        time: cell_text(row, ".calendar__time"),
        currency: cell_text(row, ".calendar__currency"),
        title,
        actual: cell_text(row, ".calendar__actual"),
        previous: cell_text(row, ".calendar__previous"),
        forecast: cell_text(row, ".calendar__forecast"),
        impact_class,
    }
}

/// Read every calendar row of a parsed page, in document order.
pub fn read_rows(document: &Html) -> Vec<RawRow> {
    document
        .select(&selector("tr.calendar__row"))
        .map(read_row)
        .collect()
}

/// Find the zone the page renders its times in.
///
/// # Errors
///
/// [`CalendarError::TimezoneUnresolved`] when the markup declares no zone.
pub fn extract_server_timezone(html: &str) -> Result<String> {
    TIMEZONE_RE
        .captures(html)
        .map(|caps| caps[1].to_string())
        .ok_or(CalendarError::TimezoneUnresolved)
}

/// Parse a whole calendar page into days of events.
#[instrument(level = "info", skip_all, fields(bytes = html.len()))]
pub fn parse_calendar(html: &str) -> Result<CalendarResult> {
    let server_timezone = extract_server_timezone(html)?;
    let offset_hours = resolve_offset_hours(&server_timezone);

    let document = Html::parse_document(html);
    let rows = read_rows(&document);
    let row_count = rows.len();
    let events = extract_events(rows, offset_hours);
    let event_count = events.len();
    let days = group_by_day(events);

    info!(
        %server_timezone,
        offset_hours,
        rows = row_count,
        events = event_count,
        days = days.len(),
        "Parsed calendar page"
    );
    Ok(CalendarResult {
        server_timezone,
        days,
    })
}

/// One end of a calendar range, e.g. `jan5.2025`.
fn range_bound(date: NaiveDate) -> String {
    format!(
        "{}{}.{}",
        date.format("%b").to_string().to_lowercase(),
        date.day(),
        date.year()
    )
}

/// The `range` query value for an inclusive window.
pub fn range_param(start: NaiveDate, end: NaiveDate) -> String {
    format!("{}-{}", range_bound(start), range_bound(end))
}

/// Fill in a missing window bound.
///
/// No bounds: the current Sunday–Saturday week. One bound: the seven-day
/// window starting or ending on it.
pub fn resolve_window(start: Option<NaiveDate>, end: Option<NaiveDate>) -> (NaiveDate, NaiveDate) {
    match (start, end) {
        (Some(s), Some(e)) => (s, e),
        (Some(s), None) => (s, s.checked_add_days(Days::new(6)).unwrap_or(s)),
        (None, Some(e)) => (e.checked_sub_days(Days::new(6)).unwrap_or(e), e),
        (None, None) => current_week(Local::now().date_naive()),
    }
}

impl<F: FetchText> Scraper<F> {
    /// Zone the origin renders calendar times in.
    #[instrument(level = "info", skip_all)]
    pub async fn server_timezone(&self) -> Result<String> {
        let url = self.url_for("/calendar")?;
        let html = self.fetch_body(url.as_str()).await?;
        let zone = extract_server_timezone(&html)?;
        info!(%zone, "Resolved server timezone");
        Ok(zone)
    }

    /// Fetch one calendar window, defaulting to the current week.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_calendar(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<CalendarResult> {
        let (start, end) = resolve_window(start, end);
        let mut url = self.url_for("/calendar")?;
        url.query_pairs_mut()
            .append_pair("range", &range_param(start, end));

        info!(%url, %start, %end, "Fetching calendar");
        let html = self.fetch_body(url.as_str()).await?;
        parse_calendar(&html)
    }
}
