//! Markdown rendering of a calendar window.
//!
//! One `##` section per day, one table row per event. Times are shown in
//! `display_zone` through [`format_timestamp`]; events without a specific
//! time keep their raw label ("Tentative", "All Day", ...).

use crate::models::{CalendarResult, Event};
use crate::timezone::format_timestamp;
use std::fmt::Write;

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

fn when(event: &Event, display_zone: &str) -> String {
    if event.has_timestamp() {
        format_timestamp(event.timestamp, display_zone)
    } else if event.time.is_empty() {
        format_timestamp(0, display_zone)
    } else {
        event.time.clone()
    }
}

/// Render `result` with times shown in `display_zone`.
pub fn calendar_to_markdown(result: &CalendarResult, display_zone: &str) -> String {
    let mut md = String::new();
    writeln!(md, "# Economic Calendar\n").unwrap();
    writeln!(
        md,
        "_Server timezone: {} · times shown in {}_\n",
        result.server_timezone, display_zone
    )
    .unwrap();

    for day in &result.days {
        writeln!(md, "## {}\n", day.date).unwrap();
        writeln!(md, "| Time | Currency | Impact | Event | Actual | Forecast | Previous |").unwrap();
        writeln!(md, "|------|----------|--------|-------|--------|----------|----------|").unwrap();
        for event in &day.events {
            writeln!(
                md,
                "| {} | {} | {} | {} | {} | {} | {} |",
                when(event, display_zone),
                escape_cell(&event.currency),
                event.impact,
                escape_cell(&event.title),
                escape_cell(&event.actual),
                escape_cell(&event.forecast),
                escape_cell(&event.previous),
            )
            .unwrap();
        }
        md.push('\n');
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, Impact};

    fn event(time: &str, title: &str, timestamp: i64) -> Event {
        Event {
            event_id: "1".to_string(),
            time: time.to_string(),
            currency: "USD".to_string(),
            title: title.to_string(),
            actual: String::new(),
            previous: "3.1%".to_string(),
            forecast: "3.0%".to_string(),
            impact: Impact::High,
            timestamp,
        }
    }

    #[test]
    fn test_calendar_to_markdown() {
        let result = CalendarResult {
            server_timezone: "America/New_York".to_string(),
            days: vec![Day {
                date: "Mon Jan 6".to_string(),
                events: vec![
                    // 2025-01-06T13:30:00Z
                    event("8:30am", "CPI y/y", 1_736_170_200_000),
                    event("Tentative", "Treasury | Auction", 0),
                ],
            }],
        };

        let md = calendar_to_markdown(&result, "America/New_York");
        assert!(md.contains("## Mon Jan 6"));
        assert!(md.contains("| Mon Jan 6, 2025 8:30am | USD | High | CPI y/y |  | 3.0% | 3.1% |"));
        assert!(md.contains("| Tentative | USD | High | Treasury \\| Auction |"));
    }

    #[test]
    fn test_blank_time_renders_na() {
        let result = CalendarResult {
            server_timezone: "UTC".to_string(),
            days: vec![Day {
                date: "Tue Jan 7".to_string(),
                events: vec![event("", "Holiday", 0)],
            }],
        };
        assert!(calendar_to_markdown(&result, "UTC").contains("| N/A | USD |"));
    }
}
