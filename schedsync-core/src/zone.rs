//! Time zone the export's wall-clock values are written in.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{SyncError, SyncResult};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ExportZone {
    /// The host's zone
    #[default]
    Local,
    /// An IANA zone, e.g. `Asia/Tokyo`
    Named(Tz),
}

impl FromStr for ExportZone {
    type Err = SyncError;

    fn from_str(s: &str) -> SyncResult<Self> {
        match s.trim() {
            "" | "local" => Ok(ExportZone::Local),
            name => name
                .parse::<Tz>()
                .map(ExportZone::Named)
                .map_err(|_| SyncError::Config(format!("Unknown time zone '{}'", name))),
        }
    }
}

impl ExportZone {
    /// Attach this zone's offset to a wall-clock time.
    ///
    /// Returns `None` for times skipped by a DST transition. Times repeated by
    /// a transition resolve to the earlier instant.
    pub fn localize(&self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            ExportZone::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.fixed_offset()),
            ExportZone::Named(tz) => tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.fixed_offset()),
        }
    }

    /// Current calendar date in this zone.
    pub fn today(&self) -> NaiveDate {
        match self {
            ExportZone::Local => Local::now().date_naive(),
            ExportZone::Named(tz) => Utc::now().with_timezone(tz).date_naive(),
        }
    }
}
