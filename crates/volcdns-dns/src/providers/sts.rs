//! OIDC token exchange against Volcengine STS
//!
//! `AssumeRoleWithOIDC` trades the projected service account token for
//! short-lived keys. The call itself is unsigned; the OIDC token is the proof.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::credentials::{OidcCredentialSource, StaticCredentials};
use super::volcengine::decode_envelope;
use crate::errors::DnsError;

const STS_API_VERSION: &str = "2018-01-01";

/// Lifetime requested for temporary credentials
pub const DEFAULT_DURATION_SECONDS: u32 = 3600;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AssumeRoleResult {
    credentials: AssumedCredentials,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AssumedCredentials {
    access_key_id: String,
    secret_access_key: String,
    #[serde(default)]
    session_token: Option<String>,
}

/// Client for the STS token exchange
pub struct StsClient {
    client: Client,
}

impl StsClient {
    pub fn new() -> Result<Self, DnsError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| DnsError::Provider(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Exchange the OIDC token named by `source` for temporary keys
    pub async fn assume_role_with_oidc(
        &self,
        source: &OidcCredentialSource,
    ) -> Result<StaticCredentials, DnsError> {
        if source.role_trn.is_empty() {
            return Err(DnsError::InvalidArgument(
                "no role configured for OIDC token exchange (set roleTrn or VOLCENGINE_OIDC_ROLE_TRN)"
                    .to_string(),
            ));
        }

        let token = tokio::fs::read_to_string(&source.token_file)
            .await
            .map_err(|e| {
                DnsError::AccessDenied(format!(
                    "failed to read OIDC token file {}: {}",
                    source.token_file, e
                ))
            })?;
        let token = token.trim();

        let duration = DEFAULT_DURATION_SECONDS.to_string();
        let url = format!("{}/", sts_base_url(&source.endpoint).trim_end_matches('/'));

        debug!(
            "Assuming role {} via {} (session {})",
            source.role_trn, url, source.session_name
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("Action", "AssumeRoleWithOIDC"),
                ("Version", STS_API_VERSION),
                ("RoleTrn", source.role_trn.as_str()),
                ("RoleSessionName", source.session_name.as_str()),
                ("OIDCToken", token),
                ("DurationSeconds", duration.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DnsError::Provider(format!("STS request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DnsError::Provider(format!("Failed to read response: {}", e)))?;

        // A rejected token or role is a credential problem, whatever code STS picks.
        let result: AssumeRoleResult = match decode_envelope(status, &body) {
            Ok(Some(result)) => result,
            Ok(None) => {
                return Err(DnsError::Provider(
                    "AssumeRoleWithOIDC response carried no result".to_string(),
                ))
            }
            Err(DnsError::Provider(msg)) if status.is_client_error() || status.is_success() => {
                return Err(DnsError::AccessDenied(msg))
            }
            Err(e) => return Err(e),
        };

        info!("Obtained temporary credentials for role {}", source.role_trn);

        Ok(StaticCredentials {
            access_key_id: result.credentials.access_key_id,
            secret_access_key: result.credentials.secret_access_key,
            session_token: result.credentials.session_token,
        })
    }
}

/// Accept either a bare host or a full base URL
fn sts_base_url(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint)
    }
}
