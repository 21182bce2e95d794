//! Provider subprocess protocol.
//!
//! This module handles communication with external provider binaries
//! (e.g., `schedsync-provider-google`) using JSON over stdin/stdout.
//!
//! The protocol is language-agnostic: any executable that speaks the JSON
//! protocol can be a provider. Providers manage their own credentials and
//! tokens; schedsync only passes the destination parameters from its config.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::debug;

use crate::error::{SyncError, SyncResult};
use crate::remote::protocol::{Authenticate, Command, ProviderCommand, Request, Response};

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);
/// Sign-in waits on the user.
const AUTH_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Provider(String);

impl Provider {
    pub fn from_name(name: &str) -> Self {
        Provider(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn binary_name(&self) -> String {
        format!("schedsync-provider-{}", self.0)
    }

    fn binary_path(&self) -> SyncResult<std::path::PathBuf> {
        let binary_name = self.binary_name();
        which::which(&binary_name).map_err(|_| SyncError::ProviderNotInstalled {
            name: self.0.clone(),
            binary: binary_name.clone(),
        })
    }

    /// Run the provider's sign-in flow; returns the account identifier.
    pub async fn authenticate(&self) -> SyncResult<String> {
        timeout(AUTH_TIMEOUT, self.call_raw(Command::Authenticate, Authenticate {}))
            .await
            .map_err(|_| SyncError::ProviderTimeout(AUTH_TIMEOUT.as_secs()))?
    }

    /// Call a typed provider command and return the result.
    ///
    /// The response type is inferred from the command's associated type.
    pub async fn call<C: ProviderCommand>(&self, cmd: C) -> SyncResult<C::Response> {
        timeout(PROVIDER_TIMEOUT, self.call_raw(C::command(), cmd))
            .await
            .map_err(|_| SyncError::ProviderTimeout(PROVIDER_TIMEOUT.as_secs()))?
    }

    /// Low-level call that sends a command with params and deserializes the response.
    async fn call_raw<P: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> SyncResult<R> {
        let params =
            serde_json::to_value(params).map_err(|e| SyncError::Serialization(e.to_string()))?;
        let request = Request { command, params };
        let request_json =
            serde_json::to_string(&request).map_err(|e| SyncError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;
        debug!(provider = %self.0, ?command, "Calling provider");

        let mut child = TokioCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SyncError::Provider(format!("Failed to spawn {}: {}", binary_path.display(), e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| SyncError::Provider("Provider stdin unavailable".into()))?;
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(SyncError::Provider(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.trim().is_empty() {
            return Err(SyncError::Provider("Provider returned no response".into()));
        }

        parse_response(&response_str)
    }
}

fn parse_response<R: serde::de::DeserializeOwned>(response: &str) -> SyncResult<R> {
    let response: Response<R> = serde_json::from_str(response.trim())
        .map_err(|e| SyncError::Provider(format!("Failed to parse response: {}", e)))?;

    match response {
        Response::Success { data } => Ok(data),
        Response::Error { error } => Err(SyncError::Provider(error)),
    }
}
