//! Driven port for catalog reads and the provider verification write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Provider, Service, VerificationCounts, VerificationStatus};

/// Errors raised by catalog repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueRepositoryError {
    /// Repository connection could not be established.
    #[error("catalogue repository connection failed: {message}")]
    Connection {
        /// Adapter-provided description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("catalogue repository query failed: {message}")]
    Query {
        /// Adapter-provided description.
        message: String,
    },
}

impl CatalogueRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for reading services/providers and recording verification decisions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// Fetch a service by id.
    async fn find_service(
        &self,
        service_id: Uuid,
    ) -> Result<Option<Service>, CatalogueRepositoryError>;

    /// Fetch a provider by id.
    async fn find_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Option<Provider>, CatalogueRepositoryError>;

    /// Record an admin verification decision. Returns false when the
    /// provider does not exist.
    async fn set_verification_status(
        &self,
        provider_id: Uuid,
        status: VerificationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, CatalogueRepositoryError>;

    /// Count providers per verification state.
    async fn verification_counts(&self) -> Result<VerificationCounts, CatalogueRepositoryError>;
}
