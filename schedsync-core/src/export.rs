//! Reading the raw schedule export.
//!
//! The export is a delimited text table in whatever character encoding the
//! exporting system uses. The first row is a header and is skipped.

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{SyncError, SyncResult};
use crate::normalize::RawRecord;

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_delimiter() -> char {
    ','
}

/// How the export bytes are laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportFormat {
    /// WHATWG encoding label, e.g. `utf-8`, `shift_jis`, `euc-jp`
    #[serde(default = "default_encoding")]
    pub encoding: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat {
            encoding: default_encoding(),
            delimiter: default_delimiter(),
        }
    }
}

/// A data row and the line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub line: u64,
    pub record: RawRecord,
}

impl ExportFormat {
    fn encoding(&self) -> SyncResult<&'static Encoding> {
        Encoding::for_label(self.encoding.trim().as_bytes()).ok_or_else(|| {
            SyncError::Config(format!("Unknown export encoding '{}'", self.encoding))
        })
    }

    fn delimiter(&self) -> SyncResult<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                SyncError::Config(format!(
                    "Export delimiter must be a single ASCII character, got '{}'",
                    self.delimiter
                ))
            })
    }
}

/// Decode and split an export into rows, skipping the header and blank rows.
pub fn read_export(bytes: &[u8], format: &ExportFormat) -> SyncResult<Vec<ExportRow>> {
    let encoding = format.encoding()?;
    let delimiter = format.delimiter()?;

    // A byte order mark wins over the configured label.
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(
            encoding = used.name(),
            "Export contained bytes that are invalid in this encoding; check the `encoding` setting"
        );
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| SyncError::Export(e.to_string()))?;

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let line = record.position().map(|p| p.line()).unwrap_or_default();

        rows.push(ExportRow {
            line,
            record: RawRecord::from_fields(record.iter()),
        });
    }

    debug!(rows = rows.len(), encoding = used.name(), "Read export");

    Ok(rows)
}
