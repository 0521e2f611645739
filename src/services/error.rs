use thiserror::Error;

use crate::domain::Domain;
use crate::models::NormalizeError;

/// Failures surfaced by location resolution and the record caches.
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("{provider} request failed: {message}")]
    Upstream {
        provider: &'static str,
        message: String,
    },

    #[error("Invalid {domain} record: field `{field}`: {message}")]
    Normalization {
        domain: Domain,
        field: &'static str,
        message: String,
    },

    #[error("Store error: {0}")]
    Store(String),

    #[error("{provider} returned nothing usable: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },
}

impl ExplorerError {
    pub fn upstream(provider: &'static str, err: &anyhow::Error) -> Self {
        Self::Upstream {
            provider,
            message: format!("{err:#}"),
        }
    }

    #[must_use]
    pub fn normalization(domain: Domain, err: &NormalizeError) -> Self {
        Self::Normalization {
            domain,
            field: err.field(),
            message: err.to_string(),
        }
    }

    #[allow(clippy::needless_pass_by_value)]
    pub fn store(err: anyhow::Error) -> Self {
        Self::Store(format!("{err:#}"))
    }

    /// Short label for logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Upstream { .. } => "upstream",
            Self::Normalization { .. } => "normalization",
            Self::Store(_) => "store",
            Self::Provider { .. } => "provider",
        }
    }
}
