//! The host-facing challenge solver
//!
//! Defines the capability contract the host orchestrator drives solvers
//! through, and the one concrete implementation for Spaceship DNS.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use spaceship_config::SolverConfig;

use crate::dns::{split_fqdn, ApiCredentials, SpaceshipClient};
use crate::error::{SolverError, SolverResult};
use crate::kube::SecretsClient;

/// Name this solver is addressed by on issuer resources
pub const SOLVER_NAME: &str = "spaceship";

/// One DNS-01 challenge request from the host orchestrator.
///
/// Field names follow the host's wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    /// Opaque identifier the host assigns to this challenge
    #[serde(default)]
    pub uid: String,
    /// "Present" or "CleanUp"; informational, routing happens by endpoint
    #[serde(default)]
    pub action: String,
    /// Domain the certificate is being issued for
    #[serde(default)]
    pub dns_name: String,
    /// Fully-qualified name of the TXT record to publish
    #[serde(rename = "resolvedFQDN")]
    pub resolved_fqdn: String,
    /// Value the TXT record must carry
    pub key: String,
    /// Namespace to resolve credential secrets in
    pub resource_namespace: String,
    /// Opaque per-issuer solver configuration
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

/// The capability contract the host drives solvers through.
///
/// Implementations must be thread-safe; the host may run independent
/// challenges concurrently.
#[async_trait]
pub trait ChallengeSolver: Send + Sync + std::fmt::Debug {
    /// Name the solver is addressed by on issuer resources
    fn name(&self) -> &'static str;

    /// Publish the TXT record proving control of the challenge domain.
    async fn present(&self, challenge: &ChallengeRequest) -> SolverResult<()>;

    /// Remove the TXT record once validation has completed.
    async fn cleanup(&self, challenge: &ChallengeRequest) -> SolverResult<()>;
}

/// DNS-01 solver for the Spaceship DNS API.
///
/// Holds only the cluster Secrets client and the outbound timeout;
/// everything else (config, credentials, zone split) is resolved fresh on
/// every call, so concurrent invocations share no mutable state.
#[derive(Debug)]
pub struct SpaceshipSolver {
    secrets: SecretsClient,
    api_timeout: Duration,
}

impl SpaceshipSolver {
    /// Create a solver bound to a cluster Secrets client.
    ///
    /// This is the initialization hook of the host contract: the cluster
    /// client handle arrives here, once, before any challenge is served.
    pub fn new(secrets: SecretsClient, api_timeout: Duration) -> Self {
        Self {
            secrets,
            api_timeout,
        }
    }

    fn solver_config(challenge: &ChallengeRequest) -> SolverResult<SolverConfig> {
        SolverConfig::from_json(challenge.config.as_ref())
            .map_err(|e| SolverError::ConfigDecode(e.to_string()))
    }

    /// Resolve the API key/secret pair named by the issuer config.
    ///
    /// Each reference resolves against its own named secret; an
    /// `apiSecretRef` without a name reads from the key ref's secret.
    async fn credentials(
        &self,
        challenge: &ChallengeRequest,
        config: &SolverConfig,
    ) -> SolverResult<ApiCredentials> {
        let key_ref = &config.api_key_secret_ref;
        let key = self
            .secrets
            .resolve(&challenge.resource_namespace, key_ref)
            .await?;

        let mut secret_ref = config.api_secret_ref.clone();
        if secret_ref.name.is_empty() {
            secret_ref.name = key_ref.name.clone();
        }
        let secret = self
            .secrets
            .resolve(&challenge.resource_namespace, &secret_ref)
            .await?;

        Ok(ApiCredentials { key, secret })
    }

    fn dns_client(&self, config: &SolverConfig) -> SolverResult<SpaceshipClient> {
        SpaceshipClient::new(config.base_url.as_deref(), self.api_timeout)
    }
}

#[async_trait]
impl ChallengeSolver for SpaceshipSolver {
    fn name(&self) -> &'static str {
        SOLVER_NAME
    }

    async fn present(&self, challenge: &ChallengeRequest) -> SolverResult<()> {
        let config = Self::solver_config(challenge)?;
        let credentials = self.credentials(challenge, &config).await?;
        let parts = split_fqdn(&challenge.resolved_fqdn)?;

        info!(
            fqdn = %challenge.resolved_fqdn,
            zone = %parts.zone,
            record = %parts.record_name,
            "presenting DNS-01 challenge record"
        );

        self.dns_client(&config)?
            .create_txt_record(&credentials, &parts.zone, &parts.record_name, &challenge.key)
            .await
    }

    async fn cleanup(&self, challenge: &ChallengeRequest) -> SolverResult<()> {
        let config = Self::solver_config(challenge)?;
        let credentials = self.credentials(challenge, &config).await?;
        let parts = split_fqdn(&challenge.resolved_fqdn)?;

        info!(
            fqdn = %challenge.resolved_fqdn,
            zone = %parts.zone,
            record = %parts.record_name,
            "cleaning up DNS-01 challenge record"
        );

        self.dns_client(&config)?
            .delete_txt_record(&credentials, &parts.zone, &parts.record_name, &challenge.key)
            .await
    }
}
