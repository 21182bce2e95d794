//! Google-specific destination configuration.
//!
//! schedsync-core passes the `[destination]` table through untouched; this
//! gives it a type on the provider side.

use anyhow::Result;

/// Google's alias for the user's main calendar
const DEFAULT_CALENDAR_ID: &str = "primary";

#[derive(Debug, Clone, PartialEq)]
pub struct GoogleRemoteConfig {
    pub google_account: String,
    pub google_calendar_id: String,
}

impl TryFrom<&serde_json::Map<String, serde_json::Value>> for GoogleRemoteConfig {
    type Error = anyhow::Error;

    fn try_from(map: &serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let google_account = map
            .get("google_account")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Missing required field: google_account"))?
            .to_string();

        let google_calendar_id = map
            .get("google_calendar_id")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_CALENDAR_ID)
            .to_string();

        Ok(Self {
            google_account,
            google_calendar_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_id_defaults_to_primary() {
        let map = serde_json::json!({ "google_account": "me@example.com" });
        let config = GoogleRemoteConfig::try_from(map.as_object().unwrap()).unwrap();

        assert_eq!(config.google_calendar_id, "primary");
    }

    #[test]
    fn account_is_required() {
        let map = serde_json::json!({ "google_calendar_id": "work" });
        assert!(GoogleRemoteConfig::try_from(map.as_object().unwrap()).is_err());
    }
}
