use std::path::Path;

use anyhow::Result;
use schedsync_core::config::SyncConfig;

use crate::render::VerboseRender;

pub async fn run(config: &SyncConfig, file: Option<&Path>, verbose: bool) -> Result<()> {
    let (range, export) = super::read_source(config, file).await?;

    println!("{} to {}", range.from, range.to);
    println!("{}", export.render(verbose));

    Ok(())
}
