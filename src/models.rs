//! Data models for calendar events, event details and news articles.
//!
//! This module defines the records produced by the scrapers:
//! - [`Event`] and [`Day`]: one calendar row, and the rows sharing a display date
//! - [`CalendarResult`]: a whole calendar window plus the server timezone
//! - [`EventDetail`]: the specs and release history of one event
//! - [`Article`]: a fetched news article
//!
//! All records are plain values built per request and never mutated after
//! construction. They serialize with camelCase field names.

use serde::{Deserialize, Serialize};

/// Coarse severity of a calendar event, derived from its style marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Impact {
    High,
    Medium,
    Low,
    #[serde(rename = "Non-Economic")]
    NonEconomic,
    Unknown,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
            Impact::NonEconomic => "Non-Economic",
            Impact::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single calendar event.
///
/// `timestamp` is UTC milliseconds since the epoch, or `0` when the event has
/// no specific time ("Tentative", "All Day", ...). A `0` never means the
/// epoch itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Opaque identifier, unique within one fetch.
    pub event_id: String,
    /// Raw display time, e.g. `"1:30am"` or `"Tentative"`.
    pub time: String,
    /// Currency code, possibly empty.
    pub currency: String,
    pub title: String,
    /// Empty until the figure is released.
    pub actual: String,
    pub previous: String,
    pub forecast: String,
    pub impact: Impact,
    pub timestamp: i64,
}

impl Event {
    /// Whether the event is pinned to a specific instant.
    pub fn has_timestamp(&self) -> bool {
        self.timestamp != 0
    }
}

/// An [`Event`] still carrying the display date it was extracted under.
///
/// This is the hand-off between extraction and day grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedEvent {
    pub date: String,
    pub event: Event,
}

/// The events sharing one display date, e.g. `"Mon Jan 6"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Day {
    pub date: String,
    pub events: Vec<Event>,
}

/// A fetched calendar window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResult {
    /// IANA-style zone name the origin renders times in.
    pub server_timezone: String,
    pub days: Vec<Day>,
}

impl CalendarResult {
    pub fn event_count(&self) -> usize {
        self.days.iter().map(|d| d.events.len()).sum()
    }
}

/// Specs and release history for one event.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    pub event_id: u64,
    pub specs: Vec<Spec>,
    pub history: History,
    pub show_linked: bool,
    /// Passed through untouched.
    pub linked_threads: serde_json::Value,
}

/// One labelled section of an event's description ("Source", "Measures", ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Spec {
    pub order: i64,
    pub title: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub has_data_values: bool,
    pub events: Vec<HistoryItem>,
    pub has_more: bool,
    pub can_show_more: bool,
}

/// A past release of the same event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub event_id: u64,
    /// Raw impact label as sent by the origin.
    pub impact: String,
    /// Raw style marker as sent by the origin.
    pub impact_class: String,
    pub date: String,
    pub url: String,
    pub description: String,
}

/// A news article fetched from the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    /// The URL the article was fetched from.
    pub url: String,
    pub title: String,
    /// Paragraph text, one paragraph per line.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        Event {
            event_id: "131001".to_string(),
            time: "8:30am".to_string(),
            currency: "USD".to_string(),
            title: "Non-Farm Employment Change".to_string(),
            actual: String::new(),
            previous: "227K".to_string(),
            forecast: "160K".to_string(),
            impact: Impact::High,
            timestamp: 1_736_170_200_000,
        }
    }

    #[test]
    fn test_event_serializes_camel_case() {
        let json = serde_json::to_value(sample_event()).unwrap();
        assert_eq!(json["eventId"], "131001");
        assert_eq!(json["impact"], "High");
        assert_eq!(json["timestamp"], 1_736_170_200_000i64);
        assert!(json.get("event_id").is_none());
    }

    #[test]
    fn test_non_economic_label() {
        let json = serde_json::to_string(&Impact::NonEconomic).unwrap();
        assert_eq!(json, "\"Non-Economic\"");
        assert_eq!(Impact::NonEconomic.to_string(), "Non-Economic");
    }

    #[test]
    fn test_has_timestamp() {
        let mut event = sample_event();
        assert!(event.has_timestamp());
        event.timestamp = 0;
        assert!(!event.has_timestamp());
    }

    #[test]
    fn test_calendar_result_serialization() {
        let result = CalendarResult {
            server_timezone: "America/New_York".to_string(),
            days: vec![Day {
                date: "Mon Jan 6".to_string(),
                events: vec![sample_event(), sample_event()],
            }],
        };
        assert_eq!(result.event_count(), 2);

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"serverTimezone\":\"America/New_York\""));
        let back: CalendarResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
