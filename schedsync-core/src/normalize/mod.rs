//! Turns raw export rows into canonical events.
//!
//! Every row is normalized on its own. A row that cannot be normalized is
//! reported as a [`RowFailure`] and dropped; the remaining rows still go
//! through.
//!
//! Rows are interpreted with a small decision table over which parts of the
//! start/end are present:
//!
//! | same day | start time | end time | shape                          |
//! |----------|------------|----------|--------------------------------|
//! | any      | empty      | empty    | all-day, at least one day long |
//! | yes      | set        | empty    | timed, ends 23:59:59           |
//! | any      | any        | any      | timed, empty time = 00:00      |
//!
//! A start date after the end date swaps the two boundaries (date and time
//! together) before any shape is built.

mod datetime;
mod record;

pub use datetime::{parse_date, parse_time};
pub use record::RawRecord;

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime};
use thiserror::Error;
use tracing::warn;

use crate::constants::END_OF_DAY;
use crate::event::Event;
use crate::export::ExportRow;
use crate::zone::ExportZone;

/// Why a single row could not be normalized.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizationError {
    #[error("missing {0}")]
    MissingDate(&'static str),

    #[error("invalid {field} '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("invalid {field} '{value}'")]
    InvalidTime { field: &'static str, value: String },

    #[error("{0} does not exist in the export time zone")]
    NonexistentTime(chrono::NaiveDateTime),
}

/// A dropped row and the reason it was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// Line of the export the row started on
    pub line: u64,
    pub error: NormalizationError,
}

/// Result of normalizing a whole export.
#[derive(Debug, Default)]
pub struct NormalizedExport {
    pub events: Vec<Event>,
    pub failures: Vec<RowFailure>,
}

/// How a row's times are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    AllDay,
    OpenEnded,
    Timed,
}

impl Shape {
    fn classify(same_day: bool, has_start_time: bool, has_end_time: bool) -> Self {
        match (same_day, has_start_time, has_end_time) {
            (_, false, false) => Shape::AllDay,
            (true, true, false) => Shape::OpenEnded,
            _ => Shape::Timed,
        }
    }
}

/// One side of a row's range.
#[derive(Debug, Clone, Copy)]
struct Boundary<'a> {
    date: NaiveDate,
    time: &'a str,
    field: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    zone: ExportZone,
}

impl Normalizer {
    pub fn new(zone: ExportZone) -> Self {
        Normalizer { zone }
    }

    pub fn normalize(&self, record: &RawRecord) -> Result<Event, NormalizationError> {
        let mut start = Boundary {
            date: required_date("start date", &record.start_date)?,
            time: record.start_time.trim(),
            field: "start time",
        };
        let mut end = Boundary {
            date: required_date("end date", &record.end_date)?,
            time: record.end_time.trim(),
            field: "end time",
        };

        let shape = Shape::classify(
            start.date == end.date,
            !start.time.is_empty(),
            !end.time.is_empty(),
        );

        if start.date > end.date {
            std::mem::swap(&mut start, &mut end);
        }

        let summary = summary_for(&record.category, &record.title);

        let event = match shape {
            Shape::AllDay => {
                let end_date = if start.date >= end.date {
                    start.date.checked_add_days(Days::new(1)).ok_or_else(|| {
                        NormalizationError::InvalidDate {
                            field: "end date",
                            value: record.end_date.clone(),
                        }
                    })?
                } else {
                    end.date
                };
                Event::all_day(summary, start.date, end_date)
            }
            Shape::OpenEnded => {
                Event::timed(
                    summary,
                    self.instant(start.date, parse_boundary_time(&start)?)?,
                    self.instant(end.date, END_OF_DAY)?,
                )
            }
            Shape::Timed => Event::timed(
                summary,
                self.instant(start.date, parse_boundary_time(&start)?)?,
                self.instant(end.date, parse_boundary_time(&end)?)?,
            ),
        };

        Ok(event
            .with_description(record.description.clone())
            .with_location(record.location.clone()))
    }

    /// Normalize every row, collecting failures instead of stopping at them.
    pub fn normalize_rows(&self, rows: &[ExportRow]) -> NormalizedExport {
        let mut out = NormalizedExport::default();

        for row in rows {
            match self.normalize(&row.record) {
                Ok(event) => out.events.push(event),
                Err(error) => {
                    warn!(line = row.line, %error, "Dropping export row");
                    out.failures.push(RowFailure {
                        line: row.line,
                        error,
                    });
                }
            }
        }

        out
    }

    fn instant(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<DateTime<FixedOffset>, NormalizationError> {
        let naive = date.and_time(time);
        self.zone
            .localize(naive)
            .ok_or(NormalizationError::NonexistentTime(naive))
    }
}

fn required_date(field: &'static str, value: &str) -> Result<NaiveDate, NormalizationError> {
    if value.trim().is_empty() {
        return Err(NormalizationError::MissingDate(field));
    }

    parse_date(value).ok_or_else(|| NormalizationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Empty time means midnight.
fn parse_boundary_time(boundary: &Boundary<'_>) -> Result<NaiveTime, NormalizationError> {
    if boundary.time.is_empty() {
        return Ok(NaiveTime::MIN);
    }

    parse_time(boundary.time).ok_or_else(|| NormalizationError::InvalidTime {
        field: boundary.field,
        value: boundary.time.to_string(),
    })
}

fn summary_for(category: &str, title: &str) -> String {
    let category = category.trim();
    let title = title.trim();

    if category.is_empty() {
        title.to_string()
    } else {
        format!("[{}] {}", category, title)
    }
}
