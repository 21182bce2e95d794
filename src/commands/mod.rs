pub mod auth;
pub mod check;
pub mod status;
pub mod sync;

use std::path::Path;

use anyhow::{Context, Result};
use schedsync_core::config::SyncConfig;
use schedsync_core::date_range::DateRange;
use schedsync_core::export::read_export;
use schedsync_core::normalize::{NormalizedExport, Normalizer};
use schedsync_core::remote::Remote;
use schedsync_core::sync::{EventStore, Reconciliation, reconcile};

use crate::render::Render;
use crate::utils::tui::create_spinner;

/// Everything `status` shows and `sync` applies.
pub struct Plan<'a> {
    pub remote: &'a Remote,
    pub export: NormalizedExport,
    pub reconciliation: Reconciliation,
}

/// Fetch the export for the configured window and normalize it.
pub async fn read_source(
    config: &SyncConfig,
    file: Option<&Path>,
) -> Result<(DateRange, NormalizedExport)> {
    let zone = config.zone()?;
    let range = config.range()?;
    let source = config.source(file)?;

    let spinner = create_spinner(format!("Fetching {} to {}", range.from, range.to));
    let bytes = source.fetch(&range).await;
    spinner.finish_and_clear();

    let rows = read_export(&bytes?, &config.source.format)?;
    let export = Normalizer::new(zone).normalize_rows(&rows);

    Ok((range, export))
}

pub async fn plan<'a>(config: &'a SyncConfig, file: Option<&Path>) -> Result<Plan<'a>> {
    let remote = config.destination()?;
    let (range, export) = read_source(config, file).await?;

    let spinner = create_spinner(remote.render());
    let destination = remote.list(&range).await;
    spinner.finish_and_clear();

    let destination = destination.context("Failed to list destination events")?;
    let reconciliation = reconcile(&export.events, &destination);

    Ok(Plan {
        remote,
        export,
        reconciliation,
    })
}
