//! DNS-01 challenge solver
//!
//! Each `present` / `clean_up` call runs start to finish on its own: decode
//! the config, resolve credentials, connect a provider client, resolve the
//! zone, then create or delete the TXT record. Nothing is cached between
//! calls and nothing is retried; the dispatcher owns retries.

use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

use super::codec;
use super::config::{ChallengeAction, ChallengeRequest, SecretKeySelector, SolverConfig};
use super::zone_resolver::{self, extract_host, ZoneInfo};
use crate::errors::DnsError;
use crate::providers::{
    Credential, DnsProvider, DnsProviderFactory, DnsRecordRequest, DnsRecordType,
    OidcCredentialSource, StaticCredentials,
};
use crate::secrets::{KubeClientConfig, KubeSecretStore, SecretStore};

/// Name the solver registers under
pub const SOLVER_NAME: &str = "volcdns-resolver";

/// TTL of challenge records
pub const DEFAULT_TTL: u32 = 300;

#[derive(Debug, Clone)]
pub struct SolverSettings {
    pub ttl: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self { ttl: DEFAULT_TTL }
    }
}

/// Result of a cleanup that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    Deleted { record_id: String },
    /// No matching record was found; treated as already cleaned up
    RecordAbsent,
}

/// Everything a Present or CleanUp needs once the zone is known
struct Target {
    provider: Arc<dyn DnsProvider>,
    zone: ZoneInfo,
    host: String,
}

pub struct ChallengeSolver {
    factory: Arc<dyn DnsProviderFactory>,
    secrets: OnceLock<Arc<dyn SecretStore>>,
    settings: SolverSettings,
    /// Fixed OIDC descriptor; when unset the environment is read on every call
    oidc_source: Option<OidcCredentialSource>,
}

impl ChallengeSolver {
    pub fn new(factory: Arc<dyn DnsProviderFactory>) -> Self {
        Self {
            factory,
            secrets: OnceLock::new(),
            settings: SolverSettings::default(),
            oidc_source: None,
        }
    }

    pub fn with_settings(mut self, settings: SolverSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_oidc_source(mut self, source: OidcCredentialSource) -> Self {
        self.oidc_source = Some(source);
        self
    }

    pub fn name(&self) -> &'static str {
        SOLVER_NAME
    }

    /// Wire up secret access through the Kubernetes API
    pub fn initialize(&self, config: &KubeClientConfig) -> Result<(), DnsError> {
        let store = KubeSecretStore::new(config.clone())?;
        self.initialize_with_store(Arc::new(store))
    }

    /// Wire up secret access through any [`SecretStore`]; may only happen once
    pub fn initialize_with_store(&self, store: Arc<dyn SecretStore>) -> Result<(), DnsError> {
        self.secrets
            .set(store)
            .map_err(|_| DnsError::InvalidArgument("solver is already initialized".to_string()))?;
        info!("Initialized {} solver", SOLVER_NAME);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.secrets.get().is_some()
    }

    /// Run whichever action the request asks for
    pub async fn solve(&self, request: &ChallengeRequest) -> Result<(), DnsError> {
        match request.action {
            ChallengeAction::Present => self.present(request).await,
            ChallengeAction::CleanUp => self.clean_up(request).await.map(|_| ()),
        }
    }

    /// Publish the challenge token as a TXT record
    pub async fn present(&self, request: &ChallengeRequest) -> Result<(), DnsError> {
        info!("Presenting challenge for {}", request.resolved_fqdn);

        let target = self.prepare(request).await?;
        let record = DnsRecordRequest {
            host: target.host,
            record_type: DnsRecordType::TXT,
            value: codec::escape(&request.key),
            ttl: self.settings.ttl,
        };

        target
            .provider
            .create_record(target.zone.id, record)
            .await
    }

    /// Remove the TXT record created by [`present`](Self::present)
    pub async fn clean_up(&self, request: &ChallengeRequest) -> Result<CleanupOutcome, DnsError> {
        info!("Cleaning up challenge for {}", request.resolved_fqdn);

        let target = self.prepare(request).await?;
        let records = target
            .provider
            .list_records(target.zone.id, &target.host)
            .await?;

        let escaped = codec::escape(&request.key);
        let txt = DnsRecordType::TXT.as_str();

        // The host filter is only a hint to the provider; match host and type here.
        let found = records.into_iter().find(|r| {
            r.record_type == txt
                && r.host == target.host
                && codec::stored_value_matches(&r.value, &escaped)
        });

        match found {
            Some(record) => {
                target
                    .provider
                    .delete_record(target.zone.id, &record.id)
                    .await?;
                Ok(CleanupOutcome::Deleted {
                    record_id: record.id,
                })
            }
            None => {
                warn!(
                    "Record not found for cleanup: {} (zone {}, host {})",
                    request.resolved_fqdn, target.zone.name, target.host
                );
                Ok(CleanupOutcome::RecordAbsent)
            }
        }
    }

    async fn prepare(&self, request: &ChallengeRequest) -> Result<Target, DnsError> {
        let config = SolverConfig::from_json(request.config.as_ref())?;
        let pinned_zone_id = config.pinned_zone_id()?;

        let credential = self
            .resolve_credential(&config, &request.resource_namespace)
            .await?;
        let provider = self.factory.connect(config.region(), credential).await?;

        let zone = zone_resolver::resolve(provider.as_ref(), &request.resolved_fqdn, pinned_zone_id)
            .await
            .map_err(|e| e.context(&format!("failed to resolve zone for {}", request.resolved_fqdn)))?;
        let host = extract_host(&request.resolved_fqdn, &zone.name);

        debug!(
            "Challenge {} maps to host {} in zone {} ({})",
            request.resolved_fqdn, host, zone.name, zone.id
        );

        Ok(Target {
            provider,
            zone,
            host,
        })
    }

    async fn resolve_credential(
        &self,
        config: &SolverConfig,
        namespace: &str,
    ) -> Result<Credential, DnsError> {
        if config.uses_static_credentials() {
            let store = self.secrets.get().ok_or_else(|| {
                DnsError::NotInitialized(
                    "secret references are configured but no secret store is available".to_string(),
                )
            })?;

            let access_key =
                read_secret(store.as_ref(), namespace, &config.access_key_secret_ref).await?;
            let secret_key =
                read_secret(store.as_ref(), namespace, &config.secret_key_secret_ref).await?;

            return Ok(Credential::Static(StaticCredentials::new(
                access_key, secret_key,
            )));
        }

        if config.has_partial_secret_refs() {
            warn!("Only one of accessKeySecretRef/secretKeySecretRef is set; using OIDC credentials");
        }

        let source = self
            .oidc_source
            .clone()
            .unwrap_or_else(OidcCredentialSource::from_env)
            .resolve(config.role_trn.as_deref());
        Ok(Credential::TokenExchange(source))
    }
}

async fn read_secret(
    store: &dyn SecretStore,
    namespace: &str,
    selector: &SecretKeySelector,
) -> Result<String, DnsError> {
    let bytes = store
        .get_secret_value(namespace, &selector.name, &selector.key)
        .await?;
    let value = String::from_utf8(bytes).map_err(|_| {
        DnsError::InvalidArgument(format!(
            "secret {}/{} key {} is not valid UTF-8",
            namespace, selector.name, selector.key
        ))
    })?;
    Ok(value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::traits::{MockDnsProvider, MockDnsProviderFactory};
    use crate::providers::{DnsRecord, DnsZone};
    use crate::secrets::MockSecretStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory provider that ignores the host filter, like a provider without
    /// server-side filtering would
    #[derive(Default)]
    struct FakeProvider {
        zones: Vec<DnsZone>,
        records: Mutex<Vec<DnsRecord>>,
        created: Mutex<Vec<(i64, DnsRecordRequest)>>,
        deletes: AtomicUsize,
    }

    impl FakeProvider {
        fn with_zones(zones: &[(i64, &str)]) -> Self {
            Self {
                zones: zones
                    .iter()
                    .map(|(id, name)| DnsZone {
                        id: *id,
                        name: name.to_string(),
                    })
                    .collect(),
                ..Default::default()
            }
        }

        fn with_record(self, id: &str, host: &str, record_type: &str, value: &str) -> Self {
            self.records.lock().unwrap().push(DnsRecord {
                id: id.to_string(),
                host: host.to_string(),
                record_type: record_type.to_string(),
                value: value.to_string(),
                ttl: Some(300),
            });
            self
        }
    }

    #[async_trait]
    impl DnsProvider for FakeProvider {
        async fn list_zones(&self) -> Result<Vec<DnsZone>, DnsError> {
            Ok(self.zones.clone())
        }

        async fn list_records(&self, _zone_id: i64, _host: &str) -> Result<Vec<DnsRecord>, DnsError> {
            Ok(self.records.lock().unwrap().clone())
        }

        async fn create_record(
            &self,
            zone_id: i64,
            request: DnsRecordRequest,
        ) -> Result<(), DnsError> {
            let id = format!("rec-{}", self.records.lock().unwrap().len() + 1);
            self.records.lock().unwrap().push(DnsRecord {
                id,
                host: request.host.clone(),
                record_type: request.record_type.to_string(),
                value: request.value.clone(),
                ttl: Some(request.ttl),
            });
            self.created.lock().unwrap().push((zone_id, request));
            Ok(())
        }

        async fn delete_record(&self, _zone_id: i64, record_id: &str) -> Result<(), DnsError> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|r| r.id != record_id);
            if records.len() == before {
                return Err(DnsError::Provider(format!("record {} not found", record_id)));
            }
            Ok(())
        }
    }

    /// Hands out the same fake provider and remembers how it was asked
    struct FakeFactory {
        provider: Arc<FakeProvider>,
        connections: Mutex<Vec<(String, Credential)>>,
    }

    impl FakeFactory {
        fn new(provider: FakeProvider) -> Arc<Self> {
            Arc::new(Self {
                provider: Arc::new(provider),
                connections: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl DnsProviderFactory for FakeFactory {
        async fn connect(
            &self,
            region: &str,
            credential: Credential,
        ) -> Result<Arc<dyn DnsProvider>, DnsError> {
            self.connections
                .lock()
                .unwrap()
                .push((region.to_string(), credential));
            Ok(self.provider.clone())
        }
    }

    fn static_config() -> serde_json::Value {
        json!({
            "region": "cn-beijing",
            "accessKeySecretRef": {"name": "volc-secret", "key": "access-key"},
            "secretKeySecretRef": {"name": "volc-secret", "key": "secret-key"}
        })
    }

    fn secret_store() -> Arc<MockSecretStore> {
        let mut store = MockSecretStore::new();
        store
            .expect_get_secret_value()
            .returning(|namespace, name, key| {
                assert_eq!(namespace, "cert-manager");
                assert_eq!(name, "volc-secret");
                match key {
                    "access-key" => Ok(b"AKLTexample".to_vec()),
                    "secret-key" => Ok(b"c2VjcmV0\n".to_vec()),
                    other => Err(DnsError::NotFound(format!("no key {}", other))),
                }
            });
        Arc::new(store)
    }

    fn solver_for(factory: Arc<FakeFactory>) -> ChallengeSolver {
        let solver = ChallengeSolver::new(factory).with_oidc_source(OidcCredentialSource::default());
        solver.initialize_with_store(secret_store()).unwrap();
        solver
    }

    fn challenge(action: ChallengeAction, fqdn: &str, key: &str) -> ChallengeRequest {
        ChallengeRequest::new(action, fqdn, key, "cert-manager").with_config(static_config())
    }

    #[tokio::test]
    async fn test_present_creates_one_txt_record() {
        let factory = FakeFactory::new(FakeProvider::with_zones(&[(7, "example.com")]));
        let solver = solver_for(factory.clone());

        solver
            .present(&challenge(
                ChallengeAction::Present,
                "_acme-challenge.foo.example.com",
                "tok123",
            ))
            .await
            .unwrap();

        let created = factory.provider.created.lock().unwrap().clone();
        assert_eq!(
            created,
            vec![(
                7,
                DnsRecordRequest {
                    host: "_acme-challenge.foo".to_string(),
                    record_type: DnsRecordType::TXT,
                    value: "tok123".to_string(),
                    ttl: 300,
                }
            )]
        );

        let connections = factory.connections.lock().unwrap();
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].0, "cn-beijing");
        assert_eq!(
            connections[0].1,
            Credential::Static(StaticCredentials::new("AKLTexample", "c2VjcmV0"))
        );
    }

    #[tokio::test]
    async fn test_present_uses_most_specific_zone() {
        let factory = FakeFactory::new(FakeProvider::with_zones(&[
            (1, "example.com"),
            (2, "sub.example.com."),
        ]));
        let solver = solver_for(factory.clone());

        solver
            .present(&challenge(
                ChallengeAction::Present,
                "_acme-challenge.sub.example.com.",
                "tok\"en",
            ))
            .await
            .unwrap();

        let created = factory.provider.created.lock().unwrap().clone();
        assert_eq!(created[0].0, 2);
        assert_eq!(created[0].1.host, "_acme-challenge");
        assert_eq!(created[0].1.value, "token");
    }

    #[tokio::test]
    async fn test_clean_up_twice_deletes_once() {
        let factory = FakeFactory::new(FakeProvider::with_zones(&[(7, "example.com")]));
        let solver = solver_for(factory.clone());
        let fqdn = "_acme-challenge.foo.example.com";

        solver
            .present(&challenge(ChallengeAction::Present, fqdn, "tok123"))
            .await
            .unwrap();

        let request = challenge(ChallengeAction::CleanUp, fqdn, "tok123");
        let first = solver.clean_up(&request).await.unwrap();
        let second = solver.clean_up(&request).await.unwrap();

        assert_eq!(
            first,
            CleanupOutcome::Deleted {
                record_id: "rec-1".to_string()
            }
        );
        assert_eq!(second, CleanupOutcome::RecordAbsent);
        assert_eq!(factory.provider.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clean_up_filters_host_type_and_matches_quoted_value() {
        let provider = FakeProvider::with_zones(&[(7, "example.com")])
            .with_record("a", "_acme-challenge.www", "CNAME", "tok123")
            .with_record("b", "_acme-challenge", "TXT", "tok123")
            .with_record("c", "_acme-challenge.www", "TXT", "other")
            .with_record("d", "_acme-challenge.www", "TXT", "\"tok123\"");
        let factory = FakeFactory::new(provider);
        let solver = solver_for(factory.clone());

        let outcome = solver
            .clean_up(&challenge(
                ChallengeAction::CleanUp,
                "_acme-challenge.www.example.com.",
                "tok123",
            ))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            CleanupOutcome::Deleted {
                record_id: "d".to_string()
            }
        );
        let remaining: Vec<String> = factory
            .provider
            .records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.id.clone())
            .collect();
        assert_eq!(remaining, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_clean_up_deletes_first_match_only() {
        let provider = FakeProvider::with_zones(&[(7, "example.com")])
            .with_record("first", "_acme-challenge", "TXT", "tok123")
            .with_record("second", "_acme-challenge", "TXT", "tok123");
        let factory = FakeFactory::new(provider);
        let solver = solver_for(factory.clone());

        let outcome = solver
            .clean_up(&challenge(
                ChallengeAction::CleanUp,
                "_acme-challenge.example.com",
                "tok123",
            ))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            CleanupOutcome::Deleted {
                record_id: "first".to_string()
            }
        );
        assert_eq!(factory.provider.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unparsable_zone_id_fails_before_network() {
        let mut factory = MockDnsProviderFactory::new();
        factory.expect_connect().times(0);

        let mut store = MockSecretStore::new();
        store.expect_get_secret_value().times(0);

        let solver = ChallengeSolver::new(Arc::new(factory));
        solver.initialize_with_store(Arc::new(store)).unwrap();

        let mut config = static_config();
        config["zoneID"] = json!("abc");
        let request = ChallengeRequest::new(
            ChallengeAction::Present,
            "_acme-challenge.example.com",
            "tok123",
            "cert-manager",
        )
        .with_config(config);

        let err = solver.present(&request).await.unwrap_err();
        assert!(matches!(err, DnsError::InvalidArgument(_)));

        let err = solver.clean_up(&request).await.unwrap_err();
        assert!(matches!(err, DnsError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_pinned_zone_absent_is_not_found() {
        let factory = FakeFactory::new(FakeProvider::with_zones(&[(7, "example.com")]));
        let solver = solver_for(factory.clone());

        let mut config = static_config();
        config["zoneID"] = json!("8");
        let request = ChallengeRequest::new(
            ChallengeAction::Present,
            "_acme-challenge.example.com",
            "tok123",
            "cert-manager",
        )
        .with_config(config);

        let err = solver.present(&request).await.unwrap_err();
        assert!(matches!(err, DnsError::NotFound(msg) if msg.contains("configured zoneID 8 not found")));
        assert!(factory.provider.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_static_refs_without_initialize() {
        let mut factory = MockDnsProviderFactory::new();
        factory.expect_connect().times(0);
        let solver = ChallengeSolver::new(Arc::new(factory));

        let err = solver
            .present(&challenge(
                ChallengeAction::Present,
                "_acme-challenge.example.com",
                "tok123",
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, DnsError::NotInitialized(_)));
    }

    #[tokio::test]
    async fn test_initialize_only_once() {
        let factory = FakeFactory::new(FakeProvider::default());
        let solver = ChallengeSolver::new(factory);
        assert!(!solver.is_initialized());

        solver.initialize_with_store(secret_store()).unwrap();
        assert!(solver.is_initialized());

        let err = solver.initialize_with_store(secret_store()).unwrap_err();
        assert!(matches!(err, DnsError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_missing_secret_key_is_not_found() {
        let mut factory = MockDnsProviderFactory::new();
        factory.expect_connect().times(0);
        let solver = ChallengeSolver::new(Arc::new(factory));
        solver.initialize_with_store(secret_store()).unwrap();

        let mut config = static_config();
        config["secretKeySecretRef"]["key"] = json!("missing");
        let request = ChallengeRequest::new(
            ChallengeAction::Present,
            "_acme-challenge.example.com",
            "tok123",
            "cert-manager",
        )
        .with_config(config);

        let err = solver.present(&request).await.unwrap_err();
        assert!(matches!(err, DnsError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_oidc_credentials_without_secret_refs() {
        let factory = FakeFactory::new(FakeProvider::with_zones(&[(7, "example.com")]));
        let solver = ChallengeSolver::new(factory.clone()).with_oidc_source(OidcCredentialSource {
            role_trn: "trn:iam::1:role/from-env".to_string(),
            token_file: "/custom/token".to_string(),
            ..Default::default()
        });

        let request = ChallengeRequest::new(
            ChallengeAction::Present,
            "_acme-challenge.example.com",
            "tok123",
            "cert-manager",
        )
        .with_config(json!({
            "roleTrn": "trn:iam::2:role/from-config",
            "accessKeySecretRef": {"name": "only-one", "key": "access-key"}
        }));
        solver.present(&request).await.unwrap();

        let connections = factory.connections.lock().unwrap();
        assert_eq!(connections[0].0, "cn-north-1");
        assert_eq!(
            connections[0].1,
            Credential::TokenExchange(OidcCredentialSource {
                role_trn: "trn:iam::2:role/from-config".to_string(),
                endpoint: "sts.volcengineapi.com".to_string(),
                token_file: "/custom/token".to_string(),
                session_name: "cert-manager".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_oidc_environment_is_read_per_challenge() {
        let factory = FakeFactory::new(FakeProvider::with_zones(&[(7, "example.com")]));
        let solver = ChallengeSolver::new(factory.clone());
        let request = ChallengeRequest::new(
            ChallengeAction::Present,
            "_acme-challenge.example.com",
            "tok123",
            "cert-manager",
        )
        .with_config(json!({"roleTrn": "trn:iam::1:role/webhook"}));

        std::env::set_var(crate::providers::credentials::ENV_OIDC_ROLE_SESSION_NAME, "first-session");
        solver.present(&request).await.unwrap();
        std::env::set_var(crate::providers::credentials::ENV_OIDC_ROLE_SESSION_NAME, "second-session");
        solver.present(&request).await.unwrap();
        std::env::remove_var(crate::providers::credentials::ENV_OIDC_ROLE_SESSION_NAME);

        let sessions: Vec<String> = factory
            .connections
            .lock()
            .unwrap()
            .iter()
            .map(|(_, credential)| match credential {
                Credential::TokenExchange(source) => source.session_name.clone(),
                other => panic!("expected token exchange, got {:?}", other),
            })
            .collect();
        assert_eq!(sessions, vec!["first-session", "second-session"]);
    }

    #[tokio::test]
    async fn test_absent_config_uses_defaults() {
        let factory = FakeFactory::new(FakeProvider::with_zones(&[(7, "example.com")]));
        let solver = ChallengeSolver::new(factory.clone()).with_oidc_source(OidcCredentialSource::default());

        let request = ChallengeRequest::new(
            ChallengeAction::Present,
            "example.com",
            "tok123",
            "default",
        );
        solver.solve(&request).await.unwrap();

        let created = factory.provider.created.lock().unwrap().clone();
        assert_eq!(created[0].1.host, "@");
        assert!(matches!(
            factory.connections.lock().unwrap()[0].1,
            Credential::TokenExchange(_)
        ));
    }

    #[tokio::test]
    async fn test_create_error_is_surfaced() {
        let mut provider = MockDnsProvider::new();
        provider.expect_list_zones().returning(|| {
            Ok(vec![DnsZone {
                id: 7,
                name: "example.com".to_string(),
            }])
        });
        provider.expect_create_record().times(1).returning(|_, _| {
            Err(DnsError::Provider(
                "failed to create record: RecordDuplicate".to_string(),
            ))
        });
        let provider: Arc<dyn DnsProvider> = Arc::new(provider);

        let mut factory = MockDnsProviderFactory::new();
        factory
            .expect_connect()
            .times(1)
            .returning(move |_, _| Ok(provider.clone()));

        let solver = ChallengeSolver::new(Arc::new(factory)).with_oidc_source(OidcCredentialSource::default());
        let err = solver
            .present(&ChallengeRequest::new(
                ChallengeAction::Present,
                "_acme-challenge.example.com",
                "tok123",
                "default",
            ))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DnsError::Provider("failed to create record: RecordDuplicate".to_string())
        );
    }

    #[tokio::test]
    async fn test_zone_listing_error_carries_context() {
        let mut provider = MockDnsProvider::new();
        provider
            .expect_list_zones()
            .returning(|| Err(DnsError::AccessDenied("failed to list zones: bad key".to_string())));
        provider.expect_create_record().times(0);
        let provider: Arc<dyn DnsProvider> = Arc::new(provider);

        let mut factory = MockDnsProviderFactory::new();
        factory
            .expect_connect()
            .returning(move |_, _| Ok(provider.clone()));

        let solver = ChallengeSolver::new(Arc::new(factory)).with_oidc_source(OidcCredentialSource::default());
        let err = solver
            .present(&ChallengeRequest::new(
                ChallengeAction::Present,
                "_acme-challenge.example.com",
                "tok123",
                "default",
            ))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DnsError::AccessDenied(
                "failed to resolve zone for _acme-challenge.example.com: failed to list zones: bad key"
                    .to_string()
            )
        );
    }
}
