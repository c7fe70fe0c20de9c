//! Kubernetes cluster access
//!
//! The solver reads issuer credentials from Secrets in the namespace the
//! host names on each request. Cluster reachability is resolved once at
//! startup: in-cluster service-account configuration when available, a
//! kubeconfig file otherwise.

pub mod config;
pub mod secrets;

pub use config::{in_cluster_config, KubeAuth, Kubeconfig, KubeconfigError, ResolvedKubeConfig};
pub use secrets::{Secret, SecretsClient};
