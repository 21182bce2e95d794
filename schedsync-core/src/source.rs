//! Obtaining the raw export.
//!
//! The export either already sits in a file, or is produced by an external
//! command (usually a browser-automation script) that prints it to stdout.

use std::path::PathBuf;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::date_range::DateRange;
use crate::error::{SyncError, SyncResult};

/// Browser automation is slow; give it a few minutes.
const FETCH_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleSource {
    File(PathBuf),
    /// Program and arguments. `{from}` and `{to}` are replaced by the window
    /// bounds as `YYYY-MM-DD`.
    Command(Vec<String>),
}

impl ScheduleSource {
    pub async fn fetch(&self, range: &DateRange) -> SyncResult<Vec<u8>> {
        match self {
            ScheduleSource::File(path) => {
                debug!(path = %path.display(), "Reading export");
                std::fs::read(path).map_err(|e| {
                    SyncError::Fetch(format!("Could not read {}: {}", path.display(), e))
                })
            }
            ScheduleSource::Command(argv) => {
                let argv = substitute(argv, range);
                timeout(FETCH_TIMEOUT, run(&argv))
                    .await
                    .map_err(|_| {
                        SyncError::Fetch(format!(
                            "'{}' did not finish within {}s",
                            argv.join(" "),
                            FETCH_TIMEOUT.as_secs()
                        ))
                    })?
            }
        }
    }
}

fn substitute(argv: &[String], range: &DateRange) -> Vec<String> {
    let from = range.from.format("%Y-%m-%d").to_string();
    let to = range.to.format("%Y-%m-%d").to_string();

    argv.iter()
        .map(|arg| arg.replace("{from}", &from).replace("{to}", &to))
        .collect()
}

async fn run(argv: &[String]) -> SyncResult<Vec<u8>> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| SyncError::Config("Empty source command".into()))?;

    debug!(%program, ?args, "Running export command");

    let output = Command::new(program)
        .args(args)
        .stdin(std::process::Stdio::null())
        .stderr(std::process::Stdio::inherit())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| SyncError::Fetch(format!("Failed to run {}: {}", program, e)))?;

    if !output.status.success() {
        return Err(SyncError::Fetch(format!(
            "{} exited with status: {}",
            program,
            output.status.code().unwrap_or(-1)
        )));
    }

    if output.stdout.is_empty() {
        return Err(SyncError::Fetch(format!("{} produced no output", program)));
    }

    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::ExportZone;
    use chrono::NaiveDate;

    fn range() -> DateRange {
        let from = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        DateRange::starting(ExportZone::Named(chrono_tz::Asia::Tokyo), from, 365)
    }

    #[test]
    fn substitutes_window_placeholders() {
        let argv = vec![
            "fetch".to_string(),
            "--from={from}".to_string(),
            "{to}".to_string(),
        ];

        assert_eq!(
            substitute(&argv, &range()),
            ["fetch", "--from=2024-01-10", "2025-01-09"]
        );
    }

    #[tokio::test]
    async fn missing_file_is_a_fetch_error() {
        let source = ScheduleSource::File(PathBuf::from("/nonexistent/schedsync/export.csv"));
        let err = source.fetch(&range()).await.unwrap_err();

        assert!(matches!(err, SyncError::Fetch(_)));
    }

    #[tokio::test]
    async fn empty_command_is_rejected() {
        let err = ScheduleSource::Command(vec![]).fetch(&range()).await.unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }
}
