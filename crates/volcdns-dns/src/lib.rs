//! ACME DNS-01 challenge solving on Volcengine DNS
//!
//! This crate answers cert-manager DNS-01 challenges by publishing and
//! removing TXT records in zones hosted on Volcengine DNS.
//!
//! # Features
//!
//! - **Zone resolution**: longest-suffix match over the account's zones, or a pinned zone ID
//! - **Credentials**: static keys from Kubernetes secrets, or an OIDC token exchanged through STS
//! - **Webhook**: the cert-manager `ChallengePayload` protocol over axum
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use volcdns_dns::{ChallengeSolver, ProviderSettings, VolcengineProviderFactory};
//!
//! let factory = VolcengineProviderFactory::new(ProviderSettings::default())?;
//! let solver = ChallengeSolver::new(Arc::new(factory));
//! solver.initialize(&KubeClientConfig::from_in_cluster()?)?;
//!
//! solver.present(&request).await?;
//! solver.clean_up(&request).await?;
//! ```

pub mod errors;
pub mod handlers;
pub mod pager;
pub mod providers;
pub mod secrets;
pub mod services;

// Re-export main types
pub use errors::DnsError;
pub use handlers::{configure_routes, WebhookAppState};
pub use providers::{
    Credential, DnsProvider, DnsProviderFactory, DnsRecord, DnsRecordRequest, DnsRecordType,
    DnsZone, OidcCredentialSource, ProviderSettings, StaticCredentials, VolcengineProvider,
    VolcengineProviderFactory,
};
pub use secrets::{KubeClientConfig, KubeSecretStore, SecretStore};
pub use services::{
    ChallengeAction, ChallengeRequest, ChallengeSolver, CleanupOutcome, SolverConfig,
    SolverSettings,
};
