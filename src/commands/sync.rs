use std::path::Path;

use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use schedsync_core::config::SyncConfig;
use schedsync_core::sync::apply;

use crate::render::{Render, VerboseRender};

pub async fn run(config: &SyncConfig, file: Option<&Path>, force: bool, verbose: bool) -> Result<()> {
    let plan = super::plan(config, file).await?;

    println!("{}", plan.remote.render());
    println!("{}", plan.reconciliation.render(verbose));

    if !plan.export.failures.is_empty() {
        let skipped = format!("   {} unreadable row(s) skipped", plan.export.failures.len());
        println!("{}", skipped.yellow());
    }

    if plan.reconciliation.is_empty() {
        return Ok(());
    }

    if plan.reconciliation.needs_force(&plan.export.events) && !force {
        bail!(
            "The export contains no events; refusing to delete {} destination event(s).\n\
            Run `schedsync sync --force` if the schedule really is empty.",
            plan.reconciliation.to_delete.len()
        );
    }

    let report = apply(plan.remote, &plan.reconciliation).await;

    for failure in report.failures() {
        println!("   {}", failure.render());
    }

    println!("\n{}", report.render());

    if !report.is_success() {
        bail!("{} of {} changes failed", report.failed(), report.outcomes.len());
    }

    Ok(())
}
