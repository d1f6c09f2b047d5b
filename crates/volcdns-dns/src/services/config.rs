//! Challenge request and per-challenge solver configuration

use serde::{Deserialize, Serialize};

use super::zone_resolver::parse_zone_id;
use crate::errors::DnsError;
use crate::providers::DEFAULT_REGION;

/// Reference to one key of a Kubernetes secret
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKeySelector {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub key: String,
}

impl SecretKeySelector {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }

    pub fn is_set(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Solver configuration carried in each challenge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverConfig {
    #[serde(default)]
    pub region: String,

    /// Pins the zone instead of resolving it by suffix
    #[serde(rename = "zoneID", default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,

    /// Overrides the role from `VOLCENGINE_OIDC_ROLE_TRN`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_trn: Option<String>,

    #[serde(default)]
    pub access_key_secret_ref: SecretKeySelector,

    #[serde(default)]
    pub secret_key_secret_ref: SecretKeySelector,
}

impl SolverConfig {
    /// Decode the opaque config; absent or `null` is the default config
    pub fn from_json(config: Option<&serde_json::Value>) -> Result<Self, DnsError> {
        match config {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                DnsError::InvalidArgument(format!("error decoding solver config: {}", e))
            }),
        }
    }

    /// Region to call, falling back to `cn-north-1`
    pub fn region(&self) -> &str {
        if self.region.is_empty() {
            DEFAULT_REGION
        } else {
            &self.region
        }
    }

    /// Parsed pinned zone ID; an empty string counts as unset
    pub fn pinned_zone_id(&self) -> Result<Option<i64>, DnsError> {
        match self.zone_id.as_deref() {
            None | Some("") => Ok(None),
            Some(id) => parse_zone_id(id).map(Some),
        }
    }

    /// Static keys are used only when both secret references name a secret
    pub fn uses_static_credentials(&self) -> bool {
        self.access_key_secret_ref.is_set() && self.secret_key_secret_ref.is_set()
    }

    /// Exactly one secret reference is set
    pub fn has_partial_secret_refs(&self) -> bool {
        self.access_key_secret_ref.is_set() != self.secret_key_secret_ref.is_set()
    }
}

/// What the dispatcher wants done for a challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeAction {
    Present,
    CleanUp,
}

impl std::fmt::Display for ChallengeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChallengeAction::Present => write!(f, "Present"),
            ChallengeAction::CleanUp => write!(f, "CleanUp"),
        }
    }
}

/// One DNS-01 challenge, as sent by cert-manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    #[serde(default)]
    pub uid: String,

    pub action: ChallengeAction,

    #[serde(rename = "type", default)]
    pub challenge_type: String,

    #[serde(default)]
    pub dns_name: String,

    /// Challenge token to publish
    pub key: String,

    /// Namespace the secret references resolve in
    #[serde(default)]
    pub resource_namespace: String,

    #[serde(rename = "resolvedFQDN")]
    pub resolved_fqdn: String,

    #[serde(default)]
    pub resolved_zone: String,

    #[serde(default)]
    pub allow_ambient_credentials: bool,

    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

impl ChallengeRequest {
    pub fn new(
        action: ChallengeAction,
        resolved_fqdn: impl Into<String>,
        key: impl Into<String>,
        resource_namespace: impl Into<String>,
    ) -> Self {
        Self {
            uid: String::new(),
            action,
            challenge_type: "dns-01".to_string(),
            dns_name: String::new(),
            key: key.into(),
            resource_namespace: resource_namespace.into(),
            resolved_fqdn: resolved_fqdn.into(),
            resolved_zone: String::new(),
            allow_ambient_credentials: false,
            config: None,
        }
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }
}
