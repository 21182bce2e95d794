use anyhow::{Context, Result};
use google_calendar::types::SendUpdates;
use schedsync_core::event::Event;
use schedsync_core::remote::protocol::CreateEvent;

use crate::google_event::{FromGoogle, ToGoogle};
use crate::remote_config::GoogleRemoteConfig;
use crate::session::Session;

pub async fn handle(cmd: CreateEvent) -> Result<Event> {
    let config = GoogleRemoteConfig::try_from(&cmd.remote_config)?;

    let client = Session::load_valid(&config.google_account).await?.client()?;

    // Google assigns the id
    let mut google_event = cmd.event.to_google();
    google_event.id = String::new();

    let response = client
        .events()
        .insert(
            &config.google_calendar_id,
            0,
            0,
            false,
            SendUpdates::None,
            false,
            &google_event,
        )
        .await
        .with_context(|| format!("Failed to create event: {}", &google_event.summary))?;

    Event::from_google(response.body)
}
