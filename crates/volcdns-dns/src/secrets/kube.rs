//! Kubernetes-backed secret store
//!
//! Reads `Secret` objects straight from the API server with the pod's service
//! account token.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use super::SecretStore;
use crate::errors::DnsError;

const SERVICE_ACCOUNT_DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";

/// How to reach the Kubernetes API
#[derive(Clone, Default)]
pub struct KubeClientConfig {
    /// API server base URL, e.g. `https://10.0.0.1:443`
    pub api_server: String,

    /// Bearer token
    pub token: String,

    /// PEM bundle to trust in addition to the system roots
    pub ca_cert: Option<Vec<u8>>,
}

impl std::fmt::Debug for KubeClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeClientConfig")
            .field("api_server", &self.api_server)
            .field("token", &"***")
            .field("ca_cert", &self.ca_cert.as_ref().map(|c| c.len()))
            .finish()
    }
}

impl KubeClientConfig {
    pub fn new(api_server: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_server: api_server.into(),
            token: token.into(),
            ca_cert: None,
        }
    }

    /// Build the config from the pod's service account
    pub fn from_in_cluster() -> Result<Self, DnsError> {
        let host = std::env::var("KUBERNETES_SERVICE_HOST").map_err(|_| {
            DnsError::InvalidArgument(
                "KUBERNETES_SERVICE_HOST not set, not running in Kubernetes?".to_string(),
            )
        })?;
        let port = std::env::var("KUBERNETES_SERVICE_PORT").unwrap_or_else(|_| "443".to_string());

        let token = std::fs::read_to_string(format!("{}/token", SERVICE_ACCOUNT_DIR))
            .map_err(|e| {
                DnsError::AccessDenied(format!("Failed to read service account token: {}", e))
            })?;
        let ca_cert = std::fs::read(format!("{}/ca.crt", SERVICE_ACCOUNT_DIR)).ok();

        Ok(Self {
            api_server: format!("https://{}:{}", host, port),
            token: token.trim().to_string(),
            ca_cert,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SecretObject {
    #[serde(default)]
    data: HashMap<String, String>,
}

/// [`SecretStore`] backed by the Kubernetes core/v1 API
pub struct KubeSecretStore {
    client: Client,
    config: KubeClientConfig,
}

impl KubeSecretStore {
    pub fn new(config: KubeClientConfig) -> Result<Self, DnsError> {
        let builder = Client::builder().timeout(Duration::from_secs(10));

        let builder = match &config.ca_cert {
            Some(ca) => {
                let cert = reqwest::Certificate::from_pem(ca).map_err(|e| {
                    DnsError::InvalidArgument(format!("Failed to parse CA certificate: {}", e))
                })?;
                builder.add_root_certificate(cert)
            }
            None => builder,
        };

        let client = builder
            .build()
            .map_err(|e| DnsError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl SecretStore for KubeSecretStore {
    async fn get_secret_value(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
    ) -> Result<Vec<u8>, DnsError> {
        let url = format!(
            "{}/api/v1/namespaces/{}/secrets/{}",
            self.config.api_server.trim_end_matches('/'),
            urlencoding::encode(namespace),
            urlencoding::encode(name)
        );

        debug!("Fetching secret {}/{}", namespace, name);

        let mut request = self.client.get(&url);
        if !self.config.token.is_empty() {
            request = request.bearer_auth(&self.config.token);
        }

        let response = request.send().await.map_err(|e| {
            DnsError::AccessDenied(format!(
                "failed to get secret {}/{}: {}",
                namespace, name, e
            ))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DnsError::NotFound(format!(
                "secret {}/{} not found",
                namespace, name
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DnsError::AccessDenied(format!(
                "failed to get secret {}/{}: Kubernetes API returned {}: {}",
                namespace, name, status, body
            )));
        }

        let secret: SecretObject = response.json().await.map_err(|e| {
            DnsError::AccessDenied(format!(
                "failed to parse secret {}/{}: {}",
                namespace, name, e
            ))
        })?;

        let encoded = secret.data.get(key).ok_or_else(|| {
            DnsError::NotFound(format!(
                "secret {}/{} does not contain key {}",
                namespace, name, key
            ))
        })?;

        BASE64.decode(encoded).map_err(|e| {
            DnsError::AccessDenied(format!(
                "secret {}/{} key {} is not valid base64: {}",
                namespace, name, key, e
            ))
        })
    }
}
