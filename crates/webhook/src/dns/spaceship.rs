//! Spaceship DNS API client
//!
//! Manages TXT records for DNS-01 challenges through the Spaceship REST
//! API. Records are written with a PUT per zone and removed with a DELETE
//! identifying the record by name, type, and value.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::error::{SolverError, SolverResult};

/// Spaceship DNS API base URL
pub const DEFAULT_API_BASE: &str = "https://api.spaceship.com";

/// TTL applied to challenge TXT records
const RECORD_TTL: u32 = 600;

/// API key/secret pair resolved from the cluster secret store.
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub key: String,
    pub secret: String,
}

/// Spaceship DNS API client
#[derive(Debug, Clone)]
pub struct SpaceshipClient {
    client: Client,
    base_url: String,
}

impl SpaceshipClient {
    /// Create a new client.
    ///
    /// `base_url` overrides the production endpoint (issuer configs use
    /// this to point at a sandbox); a trailing slash is trimmed.
    pub fn new(base_url: Option<&str>, timeout: Duration) -> SolverResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            SolverError::Configuration(format!("failed to create HTTP client: {}", e))
        })?;

        let base_url = base_url
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();

        Ok(Self { client, base_url })
    }

    fn records_url(&self, zone: &str) -> String {
        format!("{}/v1/dns/records/{}", self.base_url, zone)
    }

    /// Create a TXT record under `zone`.
    ///
    /// Authenticates with the `X-API-Key`/`X-API-Secret` header pair. A
    /// 401 is retried once with the same pair as HTTP basic auth before
    /// giving up; any other non-2xx status fails immediately.
    pub async fn create_txt_record(
        &self,
        credentials: &ApiCredentials,
        zone: &str,
        record_name: &str,
        value: &str,
    ) -> SolverResult<()> {
        let payload = RecordSet {
            items: vec![TxtRecord {
                r#type: "TXT",
                name: record_name.to_string(),
                ttl: Some(RECORD_TTL),
                address: value.to_string(),
            }],
        };

        debug!(zone = %zone, record = %record_name, "creating TXT record");

        let response = self
            .client
            .put(self.records_url(zone))
            .header("X-API-Key", &credentials.key)
            .header("X-API-Secret", &credentials.secret)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                SolverError::Transport(format!("failed to send create record request: {}", e))
            })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!(zone = %zone, "header auth rejected, retrying with basic auth");

            let retry = self
                .client
                .put(self.records_url(zone))
                .basic_auth(&credentials.key, Some(&credentials.secret))
                .json(&payload)
                .send()
                .await
                .map_err(|e| {
                    SolverError::Transport(format!(
                        "failed to send create record retry request: {}",
                        e
                    ))
                })?;

            return check_status(retry).await;
        }

        check_status(response).await
    }

    /// Delete a TXT record under `zone` identified by name and value.
    ///
    /// Same status interpretation as create, but no basic-auth fallback.
    pub async fn delete_txt_record(
        &self,
        credentials: &ApiCredentials,
        zone: &str,
        record_name: &str,
        value: &str,
    ) -> SolverResult<()> {
        let payload = vec![TxtRecord {
            r#type: "TXT",
            name: record_name.to_string(),
            ttl: None,
            address: value.to_string(),
        }];

        debug!(zone = %zone, record = %record_name, "deleting TXT record");

        let response = self
            .client
            .delete(self.records_url(zone))
            .header("X-API-Key", &credentials.key)
            .header("X-API-Secret", &credentials.secret)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                SolverError::Transport(format!("failed to send delete record request: {}", e))
            })?;

        check_status(response).await
    }
}

/// Any 2xx is success; anything else fails with the code and body.
async fn check_status(response: reqwest::Response) -> SolverResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(SolverError::ApiStatus {
        status: status.as_u16(),
        body,
    })
}

// Spaceship API types

#[derive(Debug, Serialize)]
struct RecordSet {
    items: Vec<TxtRecord>,
}

#[derive(Debug, Serialize)]
struct TxtRecord {
    r#type: &'static str,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ttl: Option<u32>,
    address: String,
}
