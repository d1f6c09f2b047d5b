//! Provider credentials
//!
//! A credential is either a static access key pair read from secrets, or a
//! descriptor for exchanging a projected OIDC token for temporary keys.
//! Credentials are built per challenge and never cached.

use serde::{Deserialize, Serialize};

/// Default STS endpoint for the OIDC token exchange
pub const DEFAULT_STS_ENDPOINT: &str = "sts.volcengineapi.com";

/// Default role session name
pub const DEFAULT_ROLE_SESSION_NAME: &str = "cert-manager";

/// Default location of the projected service account token
pub const DEFAULT_OIDC_TOKEN_FILE: &str = "/var/run/secrets/vke.volcengine.com/irsa-tokens/token";

pub const ENV_OIDC_ROLE_TRN: &str = "VOLCENGINE_OIDC_ROLE_TRN";
pub const ENV_OIDC_TOKEN_FILE: &str = "VOLCENGINE_OIDC_TOKEN_FILE";
pub const ENV_OIDC_ROLE_SESSION_NAME: &str = "VOLCENGINE_OIDC_ROLE_SESSION_NAME";
pub const ENV_OIDC_STS_ENDPOINT: &str = "VOLCENGINE_OIDC_STS_ENDPOINT";

/// Static access key credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticCredentials {
    /// Access Key ID
    pub access_key_id: String,

    /// Secret Access Key
    pub secret_access_key: String,

    /// Session token, present for temporary credentials from STS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

impl StaticCredentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &mask_string(&self.access_key_id))
            .field("secret_access_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Everything needed to exchange an OIDC token for temporary credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OidcCredentialSource {
    /// Role to assume
    pub role_trn: String,

    /// STS endpoint host (or full base URL)
    pub endpoint: String,

    /// Path of the projected OIDC token
    pub token_file: String,

    /// Role session name
    pub session_name: String,
}

impl OidcCredentialSource {
    /// Read the descriptor from the process environment, leaving unset fields empty
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        Self {
            role_trn: var(ENV_OIDC_ROLE_TRN),
            endpoint: var(ENV_OIDC_STS_ENDPOINT),
            token_file: var(ENV_OIDC_TOKEN_FILE),
            session_name: var(ENV_OIDC_ROLE_SESSION_NAME),
        }
    }

    /// Apply the role override and fill in defaults for fields that are still unset
    pub fn resolve(mut self, role_trn: Option<&str>) -> Self {
        if let Some(role) = role_trn.filter(|r| !r.is_empty()) {
            self.role_trn = role.to_string();
        }
        if self.endpoint.is_empty() {
            self.endpoint = DEFAULT_STS_ENDPOINT.to_string();
        }
        if self.session_name.is_empty() {
            self.session_name = DEFAULT_ROLE_SESSION_NAME.to_string();
        }
        if self.token_file.is_empty() {
            self.token_file = DEFAULT_OIDC_TOKEN_FILE.to_string();
        }
        self
    }
}

/// Resolved authentication material for one provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Static(StaticCredentials),
    TokenExchange(OidcCredentialSource),
}

impl Credential {
    /// Loggable description without secret material
    pub fn masked(&self) -> serde_json::Value {
        match self {
            Credential::Static(c) => serde_json::json!({
                "type": "static",
                "access_key_id": mask_string(&c.access_key_id),
                "secret_access_key": "***",
            }),
            Credential::TokenExchange(source) => serde_json::json!({
                "type": "oidc",
                "role_trn": source.role_trn,
                "endpoint": source.endpoint,
                "token_file": source.token_file,
                "session_name": source.session_name,
            }),
        }
    }
}

/// Mask a string, showing only first 4 and last 4 characters
fn mask_string(s: &str) -> String {
    if s.len() <= 8 || !s.is_ascii() {
        "***".to_string()
    } else {
        format!("{}...{}", &s[..4], &s[s.len() - 4..])
    }
}
