use anyhow::{Result, bail};
use schedsync_core::event::{Event, EventTime};

pub trait FromGoogle {
    fn from_google(event: google_calendar::types::Event) -> Result<Self>
    where
        Self: Sized;
}

impl FromGoogle for Event {
    fn from_google(event: google_calendar::types::Event) -> Result<Self> {
        let Some(start) = event.start.as_ref().and_then(event_time_from_google) else {
            bail!("Event {} has no start time", event.id);
        };

        let Some(end) = event.end.as_ref().and_then(event_time_from_google) else {
            bail!("Event {} has no end time", event.id);
        };

        Ok(Event {
            id: if event.id.is_empty() {
                None
            } else {
                Some(event.id)
            },
            summary: event.summary,
            description: event.description,
            location: event.location,
            start,
            end,
        })
    }
}

/// Timed values win when Google sends both.
fn event_time_from_google(time: &google_calendar::types::EventDateTime) -> Option<EventTime> {
    if let Some(dt) = time.date_time {
        Some(EventTime::DateTime(dt.fixed_offset()))
    } else {
        time.date.map(EventTime::Date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use google_calendar::types::EventDateTime;

    #[test]
    fn converts_all_day_event() {
        let google = google_calendar::types::Event {
            id: "abc".to_string(),
            summary: "Offsite".to_string(),
            location: "HQ".to_string(),
            start: Some(EventDateTime {
                date: NaiveDate::from_ymd_opt(2024, 1, 10),
                date_time: None,
                time_zone: String::new(),
            }),
            end: Some(EventDateTime {
                date: NaiveDate::from_ymd_opt(2024, 1, 11),
                date_time: None,
                time_zone: String::new(),
            }),
            ..Default::default()
        };

        let event = Event::from_google(google).unwrap();

        assert_eq!(event.id.as_deref(), Some("abc"));
        assert_eq!(event.location, "HQ");
        assert!(event.start.is_date());
    }

    #[test]
    fn converts_timed_event_to_same_instant() {
        let start = Utc.with_ymd_and_hms(2024, 1, 10, 5, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 10, 14, 59, 59).unwrap();
        let google = google_calendar::types::Event {
            id: "t1".to_string(),
            summary: "[会議] Planning".to_string(),
            start: Some(EventDateTime {
                date: None,
                date_time: Some(start),
                time_zone: "Asia/Tokyo".to_string(),
            }),
            end: Some(EventDateTime {
                date: None,
                date_time: Some(end),
                time_zone: "Asia/Tokyo".to_string(),
            }),
            ..Default::default()
        };

        let event = Event::from_google(google).unwrap();

        assert_eq!(event.start, EventTime::DateTime(start.fixed_offset()));
        assert_eq!(event.end, EventTime::DateTime(end.fixed_offset()));
    }

    #[test]
    fn missing_start_is_an_error() {
        let google = google_calendar::types::Event {
            id: "x".to_string(),
            ..Default::default()
        };

        assert!(Event::from_google(google).is_err());
    }
}
