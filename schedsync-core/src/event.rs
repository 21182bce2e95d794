//! Canonical event types.
//!
//! Both sides of a sync are expressed with these types: the normalizer
//! produces them from export rows, and providers convert their API
//! responses into them. Reconciliation works exclusively on `Event`.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar occurrence (provider-neutral)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Destination-assigned id. Only set for events read back from a provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub start: EventTime,
    pub end: EventTime,
}

/// Start or end of an event.
///
/// Date values are all-day boundaries (end is exclusive). DateTime values are
/// exact instants and keep the offset they were created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl EventTime {
    /// Whether both values denote the same boundary.
    ///
    /// Instants compare in absolute time, so `10:00+09:00` equals `01:00Z`.
    /// A date never equals an instant.
    pub fn same_moment(&self, other: &EventTime) -> bool {
        match (self, other) {
            (EventTime::Date(a), EventTime::Date(b)) => a == b,
            (EventTime::DateTime(a), EventTime::DateTime(b)) => a == b,
            _ => false,
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            EventTime::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl Event {
    /// An all-day event spanning `start` (inclusive) to `end` (exclusive).
    pub fn all_day(summary: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Event {
            id: None,
            summary: summary.into(),
            description: String::new(),
            location: String::new(),
            start: EventTime::Date(start),
            end: EventTime::Date(end),
        }
    }

    /// A timed event between two instants.
    pub fn timed(
        summary: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        Event {
            id: None,
            summary: summary.into(),
            description: String::new(),
            location: String::new(),
            start: EventTime::DateTime(start),
            end: EventTime::DateTime(end),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Whether two events denote the same calendar occurrence.
    ///
    /// Only the summary and the start/end boundaries take part; description,
    /// location and id are ignored.
    pub fn same_occurrence(&self, other: &Event) -> bool {
        self.summary == other.summary
            && self.start.same_moment(&other.start)
            && self.end.same_moment(&other.end)
    }

    /// Human-readable time span, e.g. `2024-01-10` or `2024-01-10 14:00–23:59`.
    pub fn render_time(&self) -> String {
        match (&self.start, &self.end) {
            (EventTime::Date(start), EventTime::Date(end)) => {
                let last_day = end.pred_opt().unwrap_or(*end);
                if last_day <= *start {
                    start.format("%Y-%m-%d").to_string()
                } else {
                    format!("{} – {}", start.format("%Y-%m-%d"), last_day.format("%Y-%m-%d"))
                }
            }
            (EventTime::DateTime(start), EventTime::DateTime(end)) => {
                if start.date_naive() == end.date_naive() {
                    format!("{} {}–{}", start.format("%Y-%m-%d"), start.format("%H:%M"), end.format("%H:%M"))
                } else {
                    format!("{} – {}", start.format("%Y-%m-%d %H:%M"), end.format("%Y-%m-%d %H:%M"))
                }
            }
            (start, end) => format!("{start} – {end}"),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn instants_compare_across_offsets() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let a = EventTime::DateTime(tokyo.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap());
        let b = EventTime::DateTime(utc.with_ymd_and_hms(2024, 1, 10, 1, 0, 0).unwrap());

        assert!(a.same_moment(&b));
    }

    #[test]
    fn sub_second_difference_is_a_different_moment() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let whole = utc.with_ymd_and_hms(2024, 1, 10, 1, 0, 0).unwrap();
        let a = EventTime::DateTime(whole);
        let b = EventTime::DateTime(whole + chrono::Duration::milliseconds(500));

        assert!(!a.same_moment(&b));
    }

    #[test]
    fn date_never_equals_instant() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let a = EventTime::Date(date(2024, 1, 10));
        let b = EventTime::DateTime(utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap());

        assert!(!a.same_moment(&b));
        assert!(!b.same_moment(&a));
    }

    #[test]
    fn same_occurrence_ignores_notes_and_id() {
        let a = Event::all_day("Offsite", date(2024, 1, 10), date(2024, 1, 11))
            .with_description("bring laptop")
            .with_location("HQ");
        let b = Event::all_day("Offsite", date(2024, 1, 10), date(2024, 1, 11)).with_id("abc123");

        assert!(a.same_occurrence(&b));
        assert!(a.same_occurrence(&a.clone()));
    }

    #[test]
    fn same_occurrence_requires_exact_summary() {
        let a = Event::all_day("Offsite", date(2024, 1, 10), date(2024, 1, 11));
        let b = Event::all_day("offsite", date(2024, 1, 10), date(2024, 1, 11));

        assert!(!a.same_occurrence(&b));
    }

    #[test]
    fn render_time_for_single_day() {
        let event = Event::all_day("Offsite", date(2024, 1, 10), date(2024, 1, 11));
        assert_eq!(event.render_time(), "2024-01-10");
    }
}
