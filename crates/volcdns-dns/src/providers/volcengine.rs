//! Volcengine DNS provider implementation
//!
//! Talks to the Volcengine DNS OpenAPI (service `DNS`, version `2018-08-01`).
//! Every action is a signed `POST /?Action=..&Version=..` with a JSON body,
//! answered by a `ResponseMetadata` / `Result` envelope.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use super::credentials::{Credential, StaticCredentials};
use super::signing;
use super::sts::StsClient;
use super::traits::{
    DnsProvider, DnsProviderFactory, DnsRecord, DnsRecordRequest, DnsZone, ProviderSettings,
};
use crate::errors::DnsError;
use crate::pager::{query_all, Page};

/// Region used when the solver config leaves it empty
pub const DEFAULT_REGION: &str = "cn-north-1";

const API_VERSION: &str = "2018-08-01";
const SERVICE: &str = "DNS";

/// Provider error codes that mean the caller's credentials were rejected
const AUTH_ERROR_CODES: &[&str] = &[
    "InvalidAccessKey",
    "InvalidCredential",
    "InvalidSecretToken",
    "InvalidSecurityToken",
    "SignatureDoesNotMatch",
    "AccessDenied",
];

// ============================================================================
// Response envelope
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ApiEnvelope<T> {
    #[serde(default)]
    pub response_metadata: ResponseMetadata,
    pub result: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ResponseMetadata {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl ApiError {
    pub(crate) fn is_auth_failure(&self) -> bool {
        AUTH_ERROR_CODES.contains(&self.code.as_str())
    }
}

/// Fold an HTTP response into either the envelope's result or a single error
///
/// A provider-reported error wins over the HTTP status, since it carries the
/// more useful code and message.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<Option<T>, DnsError> {
    let envelope = serde_json::from_str::<ApiEnvelope<T>>(body);

    if let Ok(ApiEnvelope {
        response_metadata:
            ResponseMetadata {
                error: Some(error),
                request_id,
            },
        ..
    }) = &envelope
    {
        let message = format!(
            "{}: {} (request id {})",
            error.code, error.message, request_id
        );
        return Err(
            if error.is_auth_failure()
                || status == StatusCode::UNAUTHORIZED
                || status == StatusCode::FORBIDDEN
            {
                DnsError::AccessDenied(message)
            } else {
                DnsError::Provider(message)
            },
        );
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(DnsError::AccessDenied(format!(
            "API returned status {}: {}",
            status, body
        )));
    }
    if !status.is_success() {
        return Err(DnsError::Provider(format!(
            "API returned status {}: {}",
            status, body
        )));
    }

    envelope
        .map(|e| e.result)
        .map_err(|e| DnsError::Provider(format!("Failed to parse response: {} - Body: {}", e, body)))
}

// ============================================================================
// API payloads
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ListZonesRequest {
    page_number: usize,
    page_size: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListZonesResult {
    #[serde(default)]
    zones: Vec<ZoneItem>,
    #[serde(default)]
    total: usize,
}

#[derive(Debug, Deserialize)]
struct ZoneItem {
    #[serde(rename = "ZID")]
    zid: i64,
    #[serde(rename = "ZoneName")]
    zone_name: String,
}

#[derive(Debug, Serialize)]
struct ListRecordsRequest<'a> {
    #[serde(rename = "ZID")]
    zid: i64,
    #[serde(rename = "PageNumber")]
    page_number: usize,
    #[serde(rename = "PageSize")]
    page_size: usize,
    #[serde(rename = "Host")]
    host: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListRecordsResult {
    #[serde(default)]
    records: Vec<RecordItem>,
    #[serde(default)]
    total_count: usize,
}

#[derive(Debug, Deserialize)]
struct RecordItem {
    #[serde(rename = "RecordID")]
    record_id: String,
    #[serde(rename = "Host", default)]
    host: String,
    #[serde(rename = "Type", default)]
    record_type: String,
    #[serde(rename = "Value", default)]
    value: String,
    #[serde(rename = "TTL", default)]
    ttl: Option<u32>,
}

impl From<RecordItem> for DnsRecord {
    fn from(item: RecordItem) -> Self {
        DnsRecord {
            id: item.record_id,
            host: item.host,
            record_type: item.record_type,
            value: item.value,
            ttl: item.ttl,
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateRecordRequest<'a> {
    #[serde(rename = "ZID")]
    zid: i64,
    #[serde(rename = "Host")]
    host: &'a str,
    #[serde(rename = "Type")]
    record_type: &'a str,
    #[serde(rename = "Value")]
    value: &'a str,
    #[serde(rename = "TTL")]
    ttl: u32,
    #[serde(rename = "Remark")]
    remark: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateRecordResult {
    #[serde(rename = "RecordID", default)]
    record_id: String,
}

#[derive(Debug, Serialize)]
struct DeleteRecordRequest<'a> {
    #[serde(rename = "RecordID")]
    record_id: &'a str,
}

// ============================================================================
// Provider
// ============================================================================

/// Volcengine DNS client scoped to one region and one set of keys
pub struct VolcengineProvider {
    client: Client,
    credentials: StaticCredentials,
    region: String,
    settings: ProviderSettings,
    host: String,
}

impl VolcengineProvider {
    pub fn new(
        region: &str,
        credentials: StaticCredentials,
        settings: ProviderSettings,
    ) -> Result<Self, DnsError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| DnsError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        let region = if region.is_empty() {
            DEFAULT_REGION.to_string()
        } else {
            region.to_string()
        };
        let host = host_header(&settings.base_url)?;

        Ok(Self {
            client,
            credentials,
            region,
            settings,
            host,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Make a signed API call and unwrap the response envelope
    async fn api_call<Req: Serialize, Res: DeserializeOwned>(
        &self,
        action: &str,
        body: &Req,
    ) -> Result<Option<Res>, DnsError> {
        let payload = serde_json::to_vec(body)
            .map_err(|e| DnsError::Provider(format!("Failed to encode request: {}", e)))?;

        let mut headers = vec![
            ("Host", self.host.as_str()),
            ("Content-Type", "application/json"),
        ];
        if let Some(token) = &self.credentials.session_token {
            headers.push(("X-Security-Token", token.as_str()));
        }

        let query = [("Action", action), ("Version", API_VERSION)];
        let signed = signing::sign_request(
            "POST",
            "/",
            &query,
            &headers,
            &payload,
            &self.credentials.access_key_id,
            &self.credentials.secret_access_key,
            &self.region,
            SERVICE,
            Utc::now(),
        );

        let url = format!("{}/", self.settings.base_url.trim_end_matches('/'));
        let mut request = self
            .client
            .post(&url)
            .query(&query)
            .header("X-Date", &signed.x_date)
            .header("X-Content-Sha256", &signed.content_sha256)
            .header("Authorization", &signed.authorization)
            .body(payload);
        for (name, value) in &headers {
            request = request.header(*name, *value);
        }

        debug!("Volcengine API request: {} (region {})", action, self.region);

        let response = request
            .send()
            .await
            .map_err(|e| DnsError::Provider(format!("API request failed: {}", e)))?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|e| DnsError::Provider(format!("Failed to read response: {}", e)))?;

        decode_envelope(status, &response_body)
    }
}

fn host_header(base_url: &str) -> Result<String, DnsError> {
    let url = Url::parse(base_url).map_err(|e| {
        DnsError::InvalidArgument(format!("invalid API base URL {}: {}", base_url, e))
    })?;
    let host = url.host_str().ok_or_else(|| {
        DnsError::InvalidArgument(format!("API base URL {} has no host", base_url))
    })?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

fn missing_result(action: &str) -> DnsError {
    DnsError::Provider(format!("{} response carried no result", action))
}

#[async_trait]
impl DnsProvider for VolcengineProvider {
    async fn list_zones(&self) -> Result<Vec<DnsZone>, DnsError> {
        let zones = query_all(self.settings.page_size, |page_number, page_size| async move {
            let result: ListZonesResult = self
                .api_call(
                    "ListZones",
                    &ListZonesRequest {
                        page_number,
                        page_size,
                    },
                )
                .await?
                .ok_or_else(|| missing_result("ListZones"))?;
            Ok::<_, DnsError>(Page::new(result.zones, result.total))
        })
        .await
        .map_err(|e| e.context("failed to list zones"))?;

        debug!("Listed {} Volcengine zones", zones.len());

        Ok(zones
            .into_iter()
            .map(|z| DnsZone {
                id: z.zid,
                name: z.zone_name,
            })
            .collect())
    }

    async fn list_records(&self, zone_id: i64, host: &str) -> Result<Vec<DnsRecord>, DnsError> {
        let records = query_all(self.settings.page_size, |page_number, page_size| async move {
            let result: ListRecordsResult = self
                .api_call(
                    "ListRecords",
                    &ListRecordsRequest {
                        zid: zone_id,
                        page_number,
                        page_size,
                        host,
                    },
                )
                .await?
                .ok_or_else(|| missing_result("ListRecords"))?;
            Ok::<_, DnsError>(Page::new(result.records, result.total_count))
        })
        .await
        .map_err(|e| e.context("failed to list records"))?;

        debug!(
            "Listed {} records in zone {} for host {}",
            records.len(),
            zone_id,
            host
        );

        Ok(records.into_iter().map(DnsRecord::from).collect())
    }

    async fn create_record(&self, zone_id: i64, request: DnsRecordRequest) -> Result<(), DnsError> {
        let body = CreateRecordRequest {
            zid: zone_id,
            host: &request.host,
            record_type: request.record_type.as_str(),
            value: &request.value,
            ttl: request.ttl,
            remark: &self.settings.record_remark,
        };

        let result: Option<CreateRecordResult> = self
            .api_call("CreateRecord", &body)
            .await
            .map_err(|e| e.context("failed to create record"))?;

        info!(
            "Created {} record {} in zone {} (record id {})",
            request.record_type,
            request.host,
            zone_id,
            result.map(|r| r.record_id).unwrap_or_default()
        );
        Ok(())
    }

    async fn delete_record(&self, zone_id: i64, record_id: &str) -> Result<(), DnsError> {
        self.api_call::<_, serde_json::Value>("DeleteRecord", &DeleteRecordRequest { record_id })
            .await
            .map_err(|e| e.context("failed to delete record"))?;

        info!("Deleted record {} from zone {}", record_id, zone_id);
        Ok(())
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Builds [`VolcengineProvider`]s, exchanging OIDC tokens for keys when needed
pub struct VolcengineProviderFactory {
    settings: ProviderSettings,
    sts: StsClient,
}

impl VolcengineProviderFactory {
    pub fn new(settings: ProviderSettings) -> Result<Self, DnsError> {
        Ok(Self {
            settings,
            sts: StsClient::new()?,
        })
    }
}

#[async_trait]
impl DnsProviderFactory for VolcengineProviderFactory {
    async fn connect(
        &self,
        region: &str,
        credential: Credential,
    ) -> Result<Arc<dyn DnsProvider>, DnsError> {
        debug!("Connecting to Volcengine DNS with {}", credential.masked());

        let credentials = match credential {
            Credential::Static(credentials) => credentials,
            Credential::TokenExchange(source) => self
                .sts
                .assume_role_with_oidc(&source)
                .await
                .map_err(|e| e.context("failed to assume role"))?,
        };

        let provider = VolcengineProvider::new(region, credentials, self.settings.clone())?;
        Ok(Arc::new(provider))
    }
}
