pub mod challenge;
pub mod serve;

pub use challenge::{CleanupCommand, PresentCommand};
pub use serve::ServeCommand;

use clap::Args;
use std::sync::Arc;
use tracing::{debug, info};
use volcdns_dns::{ChallengeSolver, KubeClientConfig, ProviderSettings, VolcengineProviderFactory};

/// How to reach the Kubernetes API for secret lookups
#[derive(Args, Debug, Clone)]
pub struct KubeArgs {
    /// Kubernetes API server URL (defaults to the in-cluster service)
    #[arg(long, env = "KUBE_API_SERVER")]
    pub kube_api_server: Option<String>,

    /// Bearer token for the Kubernetes API
    #[arg(long, env = "KUBE_TOKEN", hide_env_values = true)]
    pub kube_token: Option<String>,
}

impl KubeArgs {
    /// Explicit API server if given, otherwise the pod's service account
    pub fn client_config(&self) -> anyhow::Result<Option<KubeClientConfig>> {
        if let Some(server) = &self.kube_api_server {
            return Ok(Some(KubeClientConfig::new(
                server.clone(),
                self.kube_token.clone().unwrap_or_default(),
            )));
        }
        if std::env::var("KUBERNETES_SERVICE_HOST").is_ok() {
            return Ok(Some(KubeClientConfig::from_in_cluster()?));
        }
        Ok(None)
    }
}

/// Build a solver against the public Volcengine API
pub fn build_solver(kube: Option<&KubeClientConfig>) -> anyhow::Result<ChallengeSolver> {
    let factory = VolcengineProviderFactory::new(ProviderSettings::default())?;
    let solver = ChallengeSolver::new(Arc::new(factory));

    match kube {
        Some(config) => {
            debug!("Using Kubernetes API at {}", config.api_server);
            solver.initialize(config)?;
        }
        None => info!("No Kubernetes API configured; only OIDC credentials are available"),
    }

    Ok(solver)
}
