//! Read-only Secrets client against the cluster API
//!
//! Issuer credentials live in Kubernetes Secrets in whatever namespace
//! the host names on each challenge request. Every lookup is one GET
//! against the apiserver; nothing is cached and nothing is retried.

use std::collections::BTreeMap;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use spaceship_config::SecretRef;

use super::config::{KubeAuth, ResolvedKubeConfig};
use crate::error::{SolverError, SolverResult};

/// One Kubernetes Secret, as returned by the cluster API.
///
/// Field values arrive base64-encoded in `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct Secret {
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

/// Read-only client for the cluster Secrets API
#[derive(Debug, Clone)]
pub struct SecretsClient {
    client: Client,
    server: String,
    auth: KubeAuth,
}

impl SecretsClient {
    /// Build a client from resolved cluster connection parameters.
    ///
    /// The CA certificate and any client identity are baked into the
    /// underlying HTTP client; bearer tokens are attached per request.
    pub fn new(config: ResolvedKubeConfig, timeout: Duration) -> SolverResult<Self> {
        let mut builder = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(config.insecure_skip_tls_verify);

        if let Some(ca_data) = &config.ca_cert {
            let cert = reqwest::Certificate::from_pem(ca_data).map_err(|e| {
                SolverError::Configuration(format!("failed to parse cluster CA certificate: {}", e))
            })?;
            builder = builder.add_root_certificate(cert);
        }

        if let KubeAuth::ClientCert { cert, key } = &config.auth {
            let mut identity_pem = cert.clone();
            identity_pem.extend_from_slice(key);
            let identity = reqwest::Identity::from_pem(&identity_pem).map_err(|e| {
                SolverError::Configuration(format!("failed to create client identity: {}", e))
            })?;
            builder = builder.identity(identity);
        }

        let client = builder.build().map_err(|e| {
            SolverError::Configuration(format!("failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            server: config.server.trim_end_matches('/').to_string(),
            auth: config.auth,
        })
    }

    /// Fetch a named secret in `namespace`.
    pub async fn get(&self, namespace: &str, name: &str) -> SolverResult<Secret> {
        let url = format!(
            "{}/api/v1/namespaces/{}/secrets/{}",
            self.server, namespace, name
        );

        debug!(namespace = %namespace, secret = %name, "fetching secret");

        let mut request = self.client.get(&url);
        if let KubeAuth::Token(token) = &self.auth {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            SolverError::Transport(format!("failed to fetch secret '{}': {}", name, e))
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SolverError::SecretNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            });
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SolverError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| {
            SolverError::Transport(format!("failed to parse secret response: {}", e))
        })
    }

    /// Resolve one credential: fetch the secret named by `reference` and
    /// decode the referenced field.
    pub async fn resolve(&self, namespace: &str, reference: &SecretRef) -> SolverResult<String> {
        let secret = self.get(namespace, &reference.name).await?;

        let encoded =
            secret
                .data
                .get(&reference.key)
                .ok_or_else(|| SolverError::SecretFieldMissing {
                    name: reference.name.clone(),
                    key: reference.key.clone(),
                })?;

        let bytes = BASE64.decode(encoded).map_err(|e| {
            SolverError::Configuration(format!(
                "secret '{}' field '{}' is not valid base64: {}",
                reference.name, reference.key, e
            ))
        })?;

        String::from_utf8(bytes).map_err(|_| {
            SolverError::Configuration(format!(
                "secret '{}' field '{}' is not valid UTF-8",
                reference.name, reference.key
            ))
        })
    }
}
