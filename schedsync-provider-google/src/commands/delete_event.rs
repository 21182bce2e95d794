use anyhow::{Context, Result};
use google_calendar::types::SendUpdates;
use schedsync_core::remote::protocol::DeleteEvent;

use crate::remote_config::GoogleRemoteConfig;
use crate::session::Session;

pub async fn handle(cmd: DeleteEvent) -> Result<()> {
    let config = GoogleRemoteConfig::try_from(&cmd.remote_config)?;

    let client = Session::load_valid(&config.google_account).await?.client()?;

    let result = client
        .events()
        .delete(
            &config.google_calendar_id,
            &cmd.event_id,
            false,
            SendUpdates::None,
        )
        .await;

    match result {
        Ok(_) => Ok(()),
        // Already gone counts as deleted
        Err(e) if is_gone(&e.to_string()) => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to delete event: {}", cmd.event_id)),
    }
}

fn is_gone(error: &str) -> bool {
    error.contains("410") || error.contains("Gone")
}
