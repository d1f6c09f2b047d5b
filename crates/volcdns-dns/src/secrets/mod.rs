//! Secret lookup for static provider keys

pub mod kube;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::errors::DnsError;

pub use kube::{KubeClientConfig, KubeSecretStore};

/// Read access to namespaced secrets
///
/// A missing secret or key is [`DnsError::NotFound`]; any other failure to
/// fetch is [`DnsError::AccessDenied`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get_secret_value(
        &self,
        namespace: &str,
        name: &str,
        key: &str,
    ) -> Result<Vec<u8>, DnsError>;
}
