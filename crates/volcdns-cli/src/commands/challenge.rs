use anyhow::Context;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::debug;
use volcdns_dns::{ChallengeAction, ChallengeRequest, CleanupOutcome};

use super::{build_solver, KubeArgs};

/// Arguments shared by `present` and `cleanup`
#[derive(Args, Debug)]
pub struct ChallengeArgs {
    /// Fully-qualified challenge record name, e.g. _acme-challenge.example.com
    #[arg(long)]
    pub fqdn: String,

    /// Challenge token
    #[arg(long)]
    pub key: String,

    /// Namespace the secret references resolve in
    #[arg(long, default_value = "default")]
    pub namespace: String,

    /// Path to the solver config JSON
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub kube: KubeArgs,
}

impl ChallengeArgs {
    fn request(&self, action: ChallengeAction) -> anyhow::Result<ChallengeRequest> {
        let request = ChallengeRequest::new(action, &self.fqdn, &self.key, &self.namespace);
        match &self.config {
            Some(path) => Ok(request.with_config(read_config(path)?)),
            None => Ok(request),
        }
    }
}

fn read_config(path: &Path) -> anyhow::Result<serde_json::Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read solver config {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Solver config {} is not valid JSON", path.display()))
}

#[derive(Args)]
pub struct PresentCommand {
    #[command(flatten)]
    pub challenge: ChallengeArgs,
}

impl PresentCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let request = self.challenge.request(ChallengeAction::Present)?;
        let solver = build_solver(self.challenge.kube.client_config()?.as_ref())?;

        debug!("Presenting {}", request.resolved_fqdn);
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(solver.present(&request))?;

        println!(
            "{} TXT record published for {}",
            "✓".bright_green(),
            request.resolved_fqdn.bright_cyan()
        );
        Ok(())
    }
}

#[derive(Args)]
pub struct CleanupCommand {
    #[command(flatten)]
    pub challenge: ChallengeArgs,
}

impl CleanupCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let request = self.challenge.request(ChallengeAction::CleanUp)?;
        let solver = build_solver(self.challenge.kube.client_config()?.as_ref())?;

        debug!("Cleaning up {}", request.resolved_fqdn);
        let rt = tokio::runtime::Runtime::new()?;
        match rt.block_on(solver.clean_up(&request))? {
            CleanupOutcome::Deleted { record_id } => println!(
                "{} Deleted TXT record {} for {}",
                "✓".bright_green(),
                record_id,
                request.resolved_fqdn.bright_cyan()
            ),
            CleanupOutcome::RecordAbsent => println!(
                "{} No TXT record found for {}; nothing to delete",
                "!".bright_yellow(),
                request.resolved_fqdn.bright_cyan()
            ),
        }
        Ok(())
    }
}
