//! DNS provider implementations
//!
//! This module contains the provider trait definitions, credential handling,
//! and the Volcengine DNS client with its request signing and STS exchange.

pub mod credentials;
pub mod signing;
pub mod sts;
pub mod traits;
pub mod volcengine;

// Re-export commonly used types
pub use credentials::{Credential, OidcCredentialSource, StaticCredentials};
pub use sts::StsClient;
pub use traits::{
    DnsProvider, DnsProviderFactory, DnsRecord, DnsRecordRequest, DnsRecordType, DnsZone,
    ProviderSettings,
};
pub use volcengine::{VolcengineProvider, VolcengineProviderFactory, DEFAULT_REGION};
