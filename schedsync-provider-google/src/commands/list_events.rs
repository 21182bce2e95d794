use anyhow::{Context, Result};
use google_calendar::types::OrderBy;
use schedsync_core::event::Event;
use schedsync_core::remote::protocol::ListEvents;

use crate::google_event::FromGoogle;
use crate::remote_config::GoogleRemoteConfig;
use crate::session::Session;

pub async fn handle(cmd: ListEvents) -> Result<Vec<Event>> {
    let config = GoogleRemoteConfig::try_from(&cmd.remote_config)?;

    let client = Session::load_valid(&config.google_account).await?.client()?;

    // single_events expands recurring events into their instances
    let response = client
        .events()
        .list_all(
            &config.google_calendar_id,
            "",                 // i_cal_uid
            0,                  // max_attendees
            OrderBy::StartTime, // order_by
            &[],                // private_extended_property
            "",                 // q (search query)
            &[],                // shared_extended_property
            false,              // show_deleted
            false,              // show_hidden_invitations
            true,               // single_events
            &cmd.to,
            &cmd.from,
            "", // time_zone
            "", // updated_min
        )
        .await
        .context("Failed to fetch events")?;

    response
        .body
        .into_iter()
        .filter(|e| e.status != "cancelled" && !e.id.is_empty())
        .map(Event::from_google)
        .collect()
}
