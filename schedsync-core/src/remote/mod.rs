//! Destination calendar reached through a provider binary.

pub mod protocol;
pub mod provider;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::error::SyncResult;
use crate::event::Event;
use crate::remote::protocol::{CreateEvent, DeleteEvent, ListEvents};
use crate::remote::provider::Provider;
use crate::sync::EventStore;

/// Provider-specific parameters, passed through untouched.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RemoteConfig(pub HashMap<String, toml::Value>);

impl From<&RemoteConfig> for serde_json::Map<String, serde_json::Value> {
    fn from(config: &RemoteConfig) -> Self {
        config
            .0
            .iter()
            .filter_map(|(k, v)| serde_json::to_value(v).ok().map(|v| (k.clone(), v)))
            .collect()
    }
}

/// Destination configuration (e.g., Google Calendar settings)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Remote {
    pub provider: Provider,
    #[serde(flatten)]
    pub config: RemoteConfig,
}

impl Remote {
    fn remote_config(&self) -> serde_json::Map<String, serde_json::Value> {
        serde_json::Map::from(&self.config)
    }

    /// Looks for a `{provider}_calendar_id` field, e.g. `google_calendar_id`.
    pub fn calendar_id(&self) -> Option<&str> {
        let key = format!("{}_calendar_id", self.provider.name());
        self.config.0.get(&key).and_then(|v| v.as_str())
    }
}

impl EventStore for Remote {
    async fn list(&self, range: &DateRange) -> SyncResult<Vec<Event>> {
        self.provider
            .call(ListEvents {
                remote_config: self.remote_config(),
                from: range.from_rfc3339(),
                to: range.to_rfc3339(),
            })
            .await
    }

    async fn insert(&self, event: &Event) -> SyncResult<Event> {
        self.provider
            .call(CreateEvent {
                remote_config: self.remote_config(),
                event: event.clone(),
            })
            .await
    }

    async fn delete(&self, event_id: &str) -> SyncResult<()> {
        self.provider
            .call(DeleteEvent {
                remote_config: self.remote_config(),
                event_id: event_id.to_string(),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_flattened_provider_params() {
        let remote: Remote = toml::from_str(
            r#"
            provider = "google"
            google_account = "me@example.com"
            google_calendar_id = "work@group.calendar.google.com"
            "#,
        )
        .unwrap();

        assert_eq!(remote.provider.name(), "google");
        assert_eq!(remote.calendar_id(), Some("work@group.calendar.google.com"));

        let params = remote.remote_config();
        assert_eq!(params["google_account"], "me@example.com");
        assert!(!params.contains_key("provider"));
    }
}
