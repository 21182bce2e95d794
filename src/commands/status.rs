use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use schedsync_core::config::SyncConfig;

use crate::render::{Render, VerboseRender};

pub async fn run(config: &SyncConfig, file: Option<&Path>, verbose: bool) -> Result<()> {
    let plan = super::plan(config, file).await?;

    println!("{}", plan.remote.render());
    println!("{}", plan.reconciliation.render(verbose));

    if !plan.export.failures.is_empty() {
        let skipped = format!(
            "   {} unreadable row(s) skipped, see `schedsync check`",
            plan.export.failures.len()
        );
        println!("{}", skipped.yellow());
    }

    Ok(())
}
