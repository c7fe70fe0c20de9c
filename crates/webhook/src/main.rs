//! Spaceship DNS-01 webhook solver - main entry point

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use spaceship_config::{ServerConfig, DEFAULT_API_TIMEOUT_SECS, DEFAULT_LISTEN_ADDR};
use spaceship_webhook::kube::{self, ResolvedKubeConfig, SecretsClient};
use spaceship_webhook::server::webhook_router;
use spaceship_webhook::solver::SpaceshipSolver;
use spaceship_webhook::ChallengeSolver;

/// ACME DNS-01 webhook solver for Spaceship DNS
#[derive(Parser, Debug)]
#[command(name = "spaceship-webhook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API group the solver registers under with the host orchestrator
    #[arg(long = "group-name", env = "GROUP_NAME")]
    group_name: String,

    /// Address to serve the webhook protocol on
    #[arg(long = "listen", default_value = DEFAULT_LISTEN_ADDR)]
    listen: String,

    /// Path to a kubeconfig file (defaults to in-cluster configuration)
    #[arg(long = "kubeconfig", env = "KUBECONFIG")]
    kubeconfig: Option<String>,

    /// Timeout for outbound API calls, in seconds
    #[arg(long = "api-timeout-secs", default_value_t = DEFAULT_API_TIMEOUT_SECS)]
    api_timeout_secs: u64,

    /// Enable verbose logging (debug level)
    #[arg(long = "verbose")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let config = ServerConfig {
        group_name: cli.group_name,
        listen_addr: cli.listen,
        kubeconfig: cli.kubeconfig,
        api_timeout_secs: cli.api_timeout_secs,
    };
    config
        .validate()
        .context("invalid startup configuration")?;

    let cluster = resolve_cluster_config(config.kubeconfig.as_deref())?;
    let api_timeout = Duration::from_secs(config.api_timeout_secs);
    let secrets = SecretsClient::new(cluster, api_timeout)
        .context("failed to build cluster secrets client")?;

    let solver = Arc::new(SpaceshipSolver::new(secrets, api_timeout));
    info!(
        group = %config.group_name,
        solver = %solver.name(),
        "starting DNS-01 webhook solver"
    );

    let app = webhook_router(solver);
    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .context("invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(addr = %addr, "webhook listening");

    axum::serve(listener, app)
        .await
        .context("webhook server exited")?;

    Ok(())
}

/// Resolve cluster connection parameters.
///
/// An explicit kubeconfig path wins; otherwise in-cluster configuration
/// is tried first with the default kubeconfig location as fallback.
fn resolve_cluster_config(kubeconfig: Option<&str>) -> Result<ResolvedKubeConfig> {
    if let Some(path) = kubeconfig {
        let parsed = kube::Kubeconfig::from_file(path)
            .with_context(|| format!("failed to load kubeconfig from {}", path))?;
        return parsed
            .resolve_current()
            .context("failed to resolve kubeconfig context");
    }

    match kube::in_cluster_config() {
        Ok(config) => Ok(config),
        Err(e) => {
            debug!(error = %e, "in-cluster config not available, trying default kubeconfig");
            let parsed = kube::Kubeconfig::from_default_location()
                .context("failed to load kubeconfig from default location")?;
            parsed
                .resolve_current()
                .context("failed to resolve kubeconfig context")
        }
    }
}
