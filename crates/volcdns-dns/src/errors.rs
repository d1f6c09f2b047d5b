//! DNS challenge error types

use thiserror::Error;

/// Errors surfaced by the challenge solver and the components beneath it
///
/// Transport failures and provider-reported logical errors are both
/// [`DnsError::Provider`]; callers never need to tell them apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Solver not initialized: {0}")]
    NotInitialized(String),
}

impl DnsError {
    /// Prefix the message with the failed operation, keeping the error kind
    pub fn context(self, operation: &str) -> Self {
        match self {
            DnsError::InvalidArgument(msg) => {
                DnsError::InvalidArgument(format!("{}: {}", operation, msg))
            }
            DnsError::NotFound(msg) => DnsError::NotFound(format!("{}: {}", operation, msg)),
            DnsError::AccessDenied(msg) => {
                DnsError::AccessDenied(format!("{}: {}", operation, msg))
            }
            DnsError::Provider(msg) => DnsError::Provider(format!("{}: {}", operation, msg)),
            DnsError::NotInitialized(msg) => {
                DnsError::NotInitialized(format!("{}: {}", operation, msg))
            }
        }
    }

    /// Short machine-readable reason, used in webhook failure statuses
    pub fn reason(&self) -> &'static str {
        match self {
            DnsError::InvalidArgument(_) => "InvalidArgument",
            DnsError::NotFound(_) => "NotFound",
            DnsError::AccessDenied(_) => "AccessDenied",
            DnsError::Provider(_) => "ProviderError",
            DnsError::NotInitialized(_) => "NotInitialized",
        }
    }
}
