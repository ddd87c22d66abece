//! Event detail endpoint.
//!
//! The origin serves a JSON document per event with snake_case keys,
//! usually wrapped in a `data` envelope:
//!
//! ```json
//! {"data": {"event_id": 131001,
//!           "specs": [{"order": 1, "title": "Source", "html": "..."}],
//!           "history": {"has_data_values": true, "events": [...],
//!                       "has_more": true, "can_show_more": true},
//!           "show_linked": false, "linked_threads": []}}
//! ```
//!
//! Every field is required. Empty arrays are fine, absent keys are a
//! [`CalendarError::MalformedResponse`].

use super::Scraper;
use crate::client::FetchText;
use crate::error::{CalendarError, Result};
use crate::models::{EventDetail, History, HistoryItem, Spec};
use crate::utils::truncate_for_log;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

#[derive(Debug, Deserialize)]
struct RawDetail {
    event_id: u64,
    specs: Vec<RawSpec>,
    history: RawHistory,
    show_linked: bool,
    linked_threads: Value,
}

#[derive(Debug, Deserialize)]
struct RawSpec {
    order: i64,
    title: String,
    html: String,
}

#[derive(Debug, Deserialize)]
struct RawHistory {
    has_data_values: bool,
    events: Vec<RawHistoryItem>,
    has_more: bool,
    can_show_more: bool,
}

#[derive(Debug, Deserialize)]
struct RawHistoryItem {
    event_id: u64,
    impact: String,
    impact_class: String,
    date: String,
    url: String,
    description: String,
}

impl From<RawSpec> for Spec {
    fn from(raw: RawSpec) -> Self {
        Spec {
            order: raw.order,
            title: raw.title,
            html: raw.html,
        }
    }
}

impl From<RawHistoryItem> for HistoryItem {
    fn from(raw: RawHistoryItem) -> Self {
        HistoryItem {
            event_id: raw.event_id,
            impact: raw.impact,
            impact_class: raw.impact_class,
            date: raw.date,
            url: raw.url,
            description: raw.description,
        }
    }
}

impl From<RawDetail> for EventDetail {
    fn from(raw: RawDetail) -> Self {
        EventDetail {
            event_id: raw.event_id,
            specs: raw.specs.into_iter().map(Spec::from).collect(),
            history: History {
                has_data_values: raw.history.has_data_values,
                events: raw.history.events.into_iter().map(HistoryItem::from).collect(),
                has_more: raw.history.has_more,
                can_show_more: raw.history.can_show_more,
            },
            show_linked: raw.show_linked,
            linked_threads: raw.linked_threads,
        }
    }
}

/// Reshape an already-parsed detail document into an [`EventDetail`].
///
/// Accepts the document with or without its `data` envelope. Specs and
/// history items map one to one, in order.
pub fn normalize_detail(document: &Value) -> Result<EventDetail> {
    let inner = match document.get("data") {
        Some(data) if data.is_object() => data,
        _ => document,
    };
    let raw = RawDetail::deserialize(inner)
        .map_err(|e| CalendarError::MalformedResponse(format!("event detail: {e}")))?;
    Ok(raw.into())
}

/// Parse detail JSON text and normalize it.
pub fn parse_event_detail(text: &str) -> Result<EventDetail> {
    let document: Value = serde_json::from_str(text).inspect_err(|e| {
        warn!(error = %e, body = %truncate_for_log(text, 300), "Detail response is not JSON");
    })?;
    normalize_detail(&document)
}

impl<F: FetchText> Scraper<F> {
    /// Fetch the specs and release history of one event.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_event_detail(&self, event_id: &str) -> Result<EventDetail> {
        let url = self.url_for(&format!("/calendar/details/1-{event_id}"))?;
        let body = self.fetch_body(url.as_str()).await?;
        let detail = parse_event_detail(&body)?;
        info!(
            specs = detail.specs.len(),
            history = detail.history.events.len(),
            "Fetched event detail"
        );
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "data": {
                "event_id": 131001,
                "specs": [
                    {"order": 1, "title": "Source", "html": "<a href=\"https://www.bls.gov\">Bureau of Labor Statistics</a>"},
                    {"order": 2, "title": "Measures", "html": "Change in the number of employed people"}
                ],
                "history": {
                    "has_data_values": true,
                    "events": [
                        {"event_id": 130990, "impact": "High", "impact_class": "icon--ff-impact-red",
                         "date": "Dec 6, 2024", "url": "/calendar?day=dec6.2024#detail=130990", "description": "227K"},
                        {"event_id": 130980, "impact": "High", "impact_class": "icon--ff-impact-red",
                         "date": "Nov 1, 2024", "url": "/calendar?day=nov1.2024#detail=130980", "description": "12K"}
                    ],
                    "has_more": true,
                    "can_show_more": false
                },
                "show_linked": true,
                "linked_threads": {"threads": []}
            }
        })
    }

    #[test]
    fn test_normalize_maps_every_field() {
        let detail = normalize_detail(&sample()).unwrap();
        assert_eq!(detail.event_id, 131001);
        assert_eq!(detail.specs.len(), 2);
        assert_eq!(detail.specs[0].title, "Source");
        assert_eq!(detail.specs[1].order, 2);
        assert!(detail.history.has_data_values);
        assert!(detail.history.has_more);
        assert!(!detail.history.can_show_more);
        assert_eq!(detail.history.events[0].event_id, 130990);
        assert_eq!(detail.history.events[1].description, "12K");
        assert_eq!(detail.history.events[1].impact_class, "icon--ff-impact-red");
        assert!(detail.show_linked);
        assert_eq!(detail.linked_threads, json!({"threads": []}));
    }

    #[test]
    fn test_output_is_camel_case() {
        let json = serde_json::to_value(normalize_detail(&sample()).unwrap()).unwrap();
        assert_eq!(json["eventId"], 131001);
        assert_eq!(json["history"]["hasDataValues"], true);
        assert_eq!(json["history"]["events"][0]["impactClass"], "icon--ff-impact-red");
        assert_eq!(json["showLinked"], true);
    }

    #[test]
    fn test_bare_document_accepted() {
        let bare = sample()["data"].clone();
        assert_eq!(normalize_detail(&bare).unwrap(), normalize_detail(&sample()).unwrap());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let doc = sample();
        assert_eq!(normalize_detail(&doc).unwrap(), normalize_detail(&doc).unwrap());
    }

    #[test]
    fn test_empty_collections_are_valid() {
        let mut doc = sample();
        doc["data"]["specs"] = json!([]);
        doc["data"]["history"]["events"] = json!([]);
        let detail = normalize_detail(&doc).unwrap();
        assert!(detail.specs.is_empty());
        assert!(detail.history.events.is_empty());
    }

    #[test]
    fn test_missing_history_is_malformed() {
        let mut doc = sample();
        doc["data"].as_object_mut().unwrap().remove("history");
        let err = normalize_detail(&doc).unwrap_err();
        assert!(matches!(err, CalendarError::MalformedResponse(ref m) if m.contains("history")));
    }

    #[test]
    fn test_missing_nested_field_is_malformed() {
        let mut doc = sample();
        doc["data"]["history"]["events"][0]
            .as_object_mut()
            .unwrap()
            .remove("impact_class");
        assert!(matches!(
            normalize_detail(&doc),
            Err(CalendarError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        assert!(matches!(
            parse_event_detail("<html>rate limited</html>"),
            Err(CalendarError::MalformedResponse(_))
        ));
    }
}
