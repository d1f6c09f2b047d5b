//! DNS provider trait definitions
//!
//! The challenge solver talks to the DNS provider only through these traits,
//! so the zone resolver and solver can be exercised against fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use super::credentials::Credential;
use crate::errors::DnsError;

/// Default page size for provider list calls
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Remark attached to every record this service creates
pub const DEFAULT_RECORD_REMARK: &str = "managed by cert-manager-volcdns-webhook";

/// Public Volcengine OpenAPI endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://open.volcengineapi.com";

/// DNS record types handled by the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    TXT,
}

impl DnsRecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DnsRecordType::TXT => "TXT",
        }
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A DNS zone hosted by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsZone {
    /// Provider zone ID
    pub id: i64,

    /// Zone name as reported by the provider
    pub name: String,
}

/// A DNS record as listed by the provider
///
/// `record_type` stays a plain string because listings return every type
/// in the zone, not only the ones this crate writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Provider-specific record ID
    pub id: String,

    /// Host relative to the zone ("@" for the apex)
    pub host: String,

    /// Record type as reported by the provider
    pub record_type: String,

    /// Stored value
    pub value: String,

    /// Time to live in seconds
    pub ttl: Option<u32>,
}

/// Request to create a DNS record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordRequest {
    /// Host relative to the zone
    pub host: String,

    /// Record type
    pub record_type: DnsRecordType,

    /// Value to store
    pub value: String,

    /// TTL in seconds
    pub ttl: u32,
}

/// Tunables for a provider client
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Page size for list calls
    pub page_size: usize,

    /// Remark attached to created records
    pub record_remark: String,

    /// OpenAPI base URL, without a trailing path
    pub base_url: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            record_remark: DEFAULT_RECORD_REMARK.to_string(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

/// DNS provider client
///
/// Every method folds transport failures and provider-reported errors into a
/// single [`DnsError`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List every zone in the account
    async fn list_zones(&self) -> Result<Vec<DnsZone>, DnsError>;

    /// List records in a zone
    ///
    /// `host` is forwarded as a server-side filter the provider may ignore;
    /// callers must still match host and type themselves.
    async fn list_records(&self, zone_id: i64, host: &str) -> Result<Vec<DnsRecord>, DnsError>;

    /// Create a record in a zone
    async fn create_record(&self, zone_id: i64, request: DnsRecordRequest) -> Result<(), DnsError>;

    /// Delete a record by ID
    async fn delete_record(&self, zone_id: i64, record_id: &str) -> Result<(), DnsError>;
}

/// Builds a provider client scoped to one region and credential
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DnsProviderFactory: Send + Sync {
    async fn connect(
        &self,
        region: &str,
        credential: Credential,
    ) -> Result<Arc<dyn DnsProvider>, DnsError>;
}
