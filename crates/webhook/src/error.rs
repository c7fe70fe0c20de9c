//! Solver error types

use thiserror::Error;

/// Result type for solver operations
pub type SolverResult<T> = Result<T, SolverError>;

/// Errors that can occur while handling a challenge request
#[derive(Debug, Error)]
pub enum SolverError {
    /// The per-issuer configuration blob could not be decoded
    #[error("failed to decode solver configuration: {0}")]
    ConfigDecode(String),

    /// The referenced secret object does not exist
    #[error("secret '{namespace}/{name}' not found")]
    SecretNotFound { namespace: String, name: String },

    /// The secret exists but lacks the referenced field
    #[error("secret '{name}' does not contain key '{key}'")]
    SecretFieldMissing { name: String, key: String },

    /// Challenge FQDN has fewer than two labels
    #[error("malformed domain name '{fqdn}': expected at least two labels")]
    MalformedFqdn { fqdn: String },

    /// An outbound request could not be sent
    #[error("request failed: {0}")]
    Transport(String),

    /// The remote API answered with a non-success status
    #[error("API returned HTTP {status}: {body}")]
    ApiStatus { status: u16, body: String },

    /// Client construction or startup configuration fault
    #[error("invalid configuration: {0}")]
    Configuration(String),
}
