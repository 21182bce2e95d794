//! Defines the JSON protocol used for communication between schedsync
//! and provider binaries over stdin/stdout.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::event::Event;

pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Authenticate,
    ListEvents,
    CreateEvent,
    DeleteEvent,
}

/// Request sent from schedsync to provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from provider to schedsync.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data })
            .unwrap_or_else(|e| Response::error(&format!("Failed to serialize response: {e}")))
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        format!(
            r#"{{"status":"error","error":{}}}"#,
            serde_json::Value::String(msg.to_string())
        )
    }
}

/// Run the provider's interactive sign-in. Returns the account identifier.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Authenticate {}

impl ProviderCommand for Authenticate {
    type Response = String;
    fn command() -> Command {
        Command::Authenticate
    }
}

/// List events within a time range.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListEvents {
    /// Provider-specific config (e.g., google_account, google_calendar_id)
    #[serde(flatten)]
    pub remote_config: serde_json::Map<String, serde_json::Value>,
    pub from: String,
    pub to: String,
}

impl ProviderCommand for ListEvents {
    type Response = Vec<Event>;
    fn command() -> Command {
        Command::ListEvents
    }
}

/// Create a new event.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEvent {
    #[serde(flatten)]
    pub remote_config: serde_json::Map<String, serde_json::Value>,
    pub event: Event,
}

impl ProviderCommand for CreateEvent {
    type Response = Event;
    fn command() -> Command {
        Command::CreateEvent
    }
}

/// Delete an event by ID.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteEvent {
    #[serde(flatten)]
    pub remote_config: serde_json::Map<String, serde_json::Value>,
    pub event_id: String,
}

impl ProviderCommand for DeleteEvent {
    type Response = ();
    fn command() -> Command {
        Command::DeleteEvent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_escapes_message() {
        let json = Response::error("bad \"token\"");
        let parsed: Response<()> = serde_json::from_str(&json).unwrap();

        match parsed {
            Response::Error { error } => assert_eq!(error, "bad \"token\""),
            Response::Success { .. } => panic!("expected error"),
        }
    }

    #[test]
    fn delete_request_flattens_remote_config() {
        let mut remote_config = serde_json::Map::new();
        remote_config.insert("google_account".into(), "me@example.com".into());

        let params = serde_json::to_value(DeleteEvent {
            remote_config,
            event_id: "abc".into(),
        })
        .unwrap();

        assert_eq!(params["google_account"], "me@example.com");
        assert_eq!(params["event_id"], "abc");
    }
}
