//! schedsync-provider-google - Google Calendar provider for schedsync
//!
//! This binary implements the schedsync provider protocol: one JSON request
//! per line on stdin, one JSON response per line on stdout.
//!
//! The provider manages its own credentials and tokens:
//!   ~/.config/schedsync/providers/google/app_config.toml
//!   ~/.config/schedsync/providers/google/session/{account}.toml

mod app_config;
mod commands;
mod google_event;
mod remote_config;
mod session;

use anyhow::Result;
use schedsync_core::remote::protocol::{Command, Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::io::{self, BufRead, Write};

#[tokio::main]
async fn main() -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;

        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => handle_request(request).await,
            Err(e) => Response::error(&format!("Failed to parse request: {}", e)),
        };

        writeln!(stdout, "{}", response)?;
        stdout.flush()?;
    }

    Ok(())
}

async fn handle_request(request: Request) -> String {
    match request.command {
        Command::Authenticate => respond(commands::authenticate::handle()).await,
        Command::ListEvents => dispatch(request.params, commands::list_events::handle).await,
        Command::CreateEvent => dispatch(request.params, commands::create_event::handle).await,
        Command::DeleteEvent => dispatch(request.params, commands::delete_event::handle).await,
    }
}

/// Deserialize the typed command from params, run it, and encode the response.
async fn dispatch<C, R, F, Fut>(params: serde_json::Value, handler: F) -> String
where
    C: DeserializeOwned,
    R: Serialize,
    F: FnOnce(C) -> Fut,
    Fut: Future<Output = Result<R>>,
{
    match serde_json::from_value::<C>(params) {
        Ok(cmd) => respond(handler(cmd)).await,
        Err(e) => Response::error(&format!("Invalid params: {}", e)),
    }
}

async fn respond<R: Serialize>(fut: impl Future<Output = Result<R>>) -> String {
    match fut.await {
        Ok(data) => Response::success(data),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}
