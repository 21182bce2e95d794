//! Query window for a sync run.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::constants::DEFAULT_SYNC_DAYS;
use crate::zone::ExportZone;

/// Window of days starting at midnight of `from` and ending at midnight of `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
    zone: ExportZone,
}

impl DateRange {
    /// Today through today + `days`, in the given zone.
    pub fn upcoming(zone: ExportZone, days: i64) -> Self {
        Self::starting(zone, zone.today(), days)
    }

    /// `from` through `from` + `days`, clamped to the last representable date.
    pub fn starting(zone: ExportZone, from: NaiveDate, days: i64) -> Self {
        let to = u64::try_from(days)
            .ok()
            .and_then(|days| from.checked_add_days(Days::new(days)))
            .unwrap_or(if days < 0 { from } else { NaiveDate::MAX });

        DateRange { from, to, zone }
    }

    pub fn from_instant(&self) -> DateTime<FixedOffset> {
        self.midnight(self.from)
    }

    pub fn to_instant(&self) -> DateTime<FixedOffset> {
        self.midnight(self.to)
    }

    pub fn from_rfc3339(&self) -> String {
        self.from_instant().to_rfc3339()
    }

    pub fn to_rfc3339(&self) -> String {
        self.to_instant().to_rfc3339()
    }

    fn midnight(&self, date: NaiveDate) -> DateTime<FixedOffset> {
        let naive = date.and_time(NaiveTime::MIN);
        self.zone
            .localize(naive)
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive).fixed_offset())
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::upcoming(ExportZone::Local, DEFAULT_SYNC_DAYS)
    }
}
