//! Configuration for the Spaceship DNS-01 webhook solver
//!
//! Two configuration surfaces live here:
//!
//! - [`ServerConfig`]: process startup configuration, built once from CLI
//!   flags and environment and validated before anything else runs.
//! - [`SolverConfig`]: the per-issuer configuration blob the host attaches
//!   to each challenge request, decoded fresh on every call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default address the webhook protocol is served on.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Default timeout for outbound API calls, in seconds.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Errors raised while building or decoding configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The solver must register under a non-empty API group
    #[error("group name must not be empty (set GROUP_NAME or --group-name)")]
    EmptyGroupName,

    /// Listen address does not parse as host:port
    #[error("invalid listen address '{addr}': {reason}")]
    InvalidListenAddr { addr: String, reason: String },

    /// The per-issuer configuration blob is not valid JSON for the schema
    #[error("error decoding solver config: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Process startup configuration.
///
/// The webhook registers under `group_name` with the host orchestrator;
/// the remaining fields control how this process listens and reaches the
/// cluster. Validated once at entry, before any client is built.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// API group the solver is registered under
    pub group_name: String,
    /// Address to serve the webhook protocol on
    pub listen_addr: String,
    /// Kubeconfig path; `None` means in-cluster configuration
    pub kubeconfig: Option<String>,
    /// Timeout applied to outbound API calls
    pub api_timeout_secs: u64,
}

impl ServerConfig {
    /// Validate the startup configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.group_name.trim().is_empty() {
            return Err(ConfigError::EmptyGroupName);
        }

        self.listen_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|e| ConfigError::InvalidListenAddr {
                addr: self.listen_addr.clone(),
                reason: e.to_string(),
            })?;

        Ok(())
    }
}

/// Reference to one field of a named Kubernetes secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretRef {
    /// Name of the secret object
    pub name: String,
    /// Field within the secret's data mapping
    pub key: String,
}

/// Per-issuer solver configuration, decoded from the opaque JSON blob on
/// each challenge request.
///
/// An absent blob is valid and yields the all-default config; unknown
/// keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolverConfig {
    /// Secret field holding the Spaceship API key
    pub api_key_secret_ref: SecretRef,
    /// Secret field holding the Spaceship API secret
    pub api_secret_ref: SecretRef,
    /// Override for the Spaceship API base URL
    pub base_url: Option<String>,
}

impl SolverConfig {
    /// Decode the configuration blob attached to a challenge request.
    ///
    /// `None` (no blob at all) decodes to the default configuration.
    pub fn from_json(raw: Option<&serde_json::Value>) -> Result<Self, ConfigError> {
        match raw {
            None => Ok(Self::default()),
            Some(value) if value.is_null() => Ok(Self::default()),
            Some(value) => serde_json::from_value(value.clone()).map_err(ConfigError::Decode),
        }
    }
}
