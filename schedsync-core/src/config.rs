//! schedsync configuration at ~/.config/schedsync/config.toml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SYNC_DAYS, MAX_SYNC_DAYS};
use crate::date_range::DateRange;
use crate::error::{SyncError, SyncResult};
use crate::export::ExportFormat;
use crate::remote::Remote;
use crate::source::ScheduleSource;
use crate::zone::ExportZone;

const EXAMPLE_CONFIG: &str = r#"# Days to sync, starting today
days = 365

# Zone the export's times are written in (defaults to the host zone)
time_zone = "Asia/Tokyo"

[source]
# Either a file that already holds the export...
path = "~/Downloads/schedule.csv"
# ...or a command that prints it to stdout:
# command = ["fetch-schedule", "--from", "{from}", "--to", "{to}"]
encoding = "shift_jis"
delimiter = ","

[destination]
provider = "google"
google_account = "you@example.com"
google_calendar_id = "xxxxxxxx@group.calendar.google.com"
"#;

fn default_days() -> i64 {
    DEFAULT_SYNC_DAYS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncConfig {
    #[serde(default = "default_days")]
    pub days: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Remote>,
}

/// Where the export comes from and how it is encoded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,

    #[serde(flatten)]
    pub format: ExportFormat,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            days: DEFAULT_SYNC_DAYS,
            time_zone: None,
            source: SourceConfig::default(),
            destination: None,
        }
    }
}

impl SyncConfig {
    pub fn config_path() -> SyncResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SyncError::Config("Could not determine config directory".into()))?
            .join("schedsync");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from `path`, or from the default location.
    pub fn load(path: Option<&Path>) -> SyncResult<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !path.exists() {
            return Err(SyncError::Config(format!(
                "No config found at {}.\n\nCreate it with, for example:\n\n{}",
                path.display(),
                EXAMPLE_CONFIG
            )));
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
            .map_err(|e| SyncError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> SyncResult<Self> {
        let config: SyncConfig =
            toml::from_str(content).map_err(|e| SyncError::Config(e.to_string()))?;

        if config.days <= 0 {
            return Err(SyncError::Config(format!(
                "days must be positive, got {}",
                config.days
            )));
        }

        if config.days > MAX_SYNC_DAYS {
            return Err(SyncError::Config(format!(
                "days must be at most {}, got {}",
                MAX_SYNC_DAYS, config.days
            )));
        }

        Ok(config)
    }

    pub fn zone(&self) -> SyncResult<ExportZone> {
        match &self.time_zone {
            Some(name) => name.parse(),
            None => Ok(ExportZone::Local),
        }
    }

    pub fn range(&self) -> SyncResult<DateRange> {
        Ok(DateRange::upcoming(self.zone()?, self.days))
    }

    /// The configured source; `path_override` replaces whatever is configured.
    pub fn source(&self, path_override: Option<&Path>) -> SyncResult<ScheduleSource> {
        if let Some(path) = path_override {
            return Ok(ScheduleSource::File(path.to_path_buf()));
        }

        match (&self.source.path, &self.source.command) {
            (Some(_), Some(_)) => Err(SyncError::Config(
                "[source] must set either path or command, not both".into(),
            )),
            (Some(path), None) => Ok(ScheduleSource::File(expand_path(path)?)),
            (None, Some(command)) if !command.is_empty() => {
                Ok(ScheduleSource::Command(command.clone()))
            }
            _ => Err(SyncError::Config(
                "[source] needs a path or a command".into(),
            )),
        }
    }

    pub fn destination(&self) -> SyncResult<&Remote> {
        self.destination
            .as_ref()
            .ok_or_else(|| SyncError::Config("No [destination] configured".into()))
    }
}

fn expand_path(path: &str) -> SyncResult<PathBuf> {
    shellexpand::full(path)
        .map(|p| PathBuf::from(p.as_ref()))
        .map_err(|e| SyncError::Config(format!("Could not expand '{}': {}", path, e)))
}
