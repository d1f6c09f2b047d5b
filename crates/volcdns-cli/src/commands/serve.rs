use clap::Args;
use std::sync::Arc;
use tokio::net::TcpListener;
use std::future::Future;
use tracing::{error, info};
use volcdns_dns::{configure_routes, KubeClientConfig, WebhookAppState};

use super::{build_solver, KubeArgs};

#[derive(Args)]
pub struct ServeCommand {
    /// API group the webhook is registered under
    #[arg(long, env = "GROUP_NAME")]
    pub group_name: String,

    /// Address to bind the webhook server to
    #[arg(long, default_value = "0.0.0.0:8443", env = "VOLCDNS_BIND")]
    pub bind: String,

    #[command(flatten)]
    pub kube: KubeArgs,
}

impl ServeCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        if self.group_name.trim().is_empty() {
            anyhow::bail!("GROUP_NAME must be specified");
        }

        // The webhook always runs in a cluster, so secret access is mandatory here.
        let kube = match self.kube.client_config()? {
            Some(config) => config,
            None => KubeClientConfig::from_in_cluster()?,
        };
        let solver = Arc::new(build_solver(Some(&kube))?);

        let state = Arc::new(WebhookAppState {
            solver: solver.clone(),
            group_name: self.group_name.clone(),
        });
        let app = configure_routes().with_state(state);

        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(async move {
            let listener = TcpListener::bind(&self.bind).await?;
            info!(
                "Serving {} for group {} on {}",
                solver.name(),
                self.group_name,
                self.bind
            );

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c()))
                .await?;
            Ok::<_, anyhow::Error>(())
        })
    }
}

/// Resolves once the signal fires. A handler that cannot be installed is
/// logged and also triggers shutdown.
async fn shutdown_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutting down webhook server"),
        Err(e) => error!("Failed to listen for shutdown signal, shutting down: {}", e),
    }
}
