use chrono::Utc;
use schedsync_core::event::{Event, EventTime};

pub trait ToGoogle {
    fn to_google(&self) -> google_calendar::types::Event;
}

impl ToGoogle for Event {
    fn to_google(&self) -> google_calendar::types::Event {
        google_calendar::types::Event {
            id: self.id.clone().unwrap_or_default(),
            summary: self.summary.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            start: Some(event_time_to_google(&self.start)),
            end: Some(event_time_to_google(&self.end)),
            ..Default::default()
        }
    }
}

fn event_time_to_google(time: &EventTime) -> google_calendar::types::EventDateTime {
    match time {
        EventTime::Date(d) => google_calendar::types::EventDateTime {
            date: Some(*d),
            date_time: None,
            time_zone: String::new(),
        },
        EventTime::DateTime(dt) => google_calendar::types::EventDateTime {
            date: None,
            date_time: Some(dt.with_timezone(&Utc)),
            time_zone: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    #[test]
    fn all_day_event_sends_dates_only() {
        let event = Event::all_day(
            "Offsite",
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 11).unwrap(),
        );

        let google = event.to_google();
        let start = google.start.unwrap();

        assert_eq!(start.date, NaiveDate::from_ymd_opt(2024, 1, 10));
        assert!(start.date_time.is_none());
        assert!(google.id.is_empty());
    }

    #[test]
    fn timed_event_keeps_its_instant() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let start = tokyo.with_ymd_and_hms(2024, 1, 10, 14, 0, 0).unwrap();
        let event = Event::timed("Planning", start, start).with_location("Room A");

        let google = event.to_google();

        assert_eq!(
            google.start.unwrap().date_time,
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 5, 0, 0).unwrap())
        );
        assert_eq!(google.location, "Room A");
    }
}
