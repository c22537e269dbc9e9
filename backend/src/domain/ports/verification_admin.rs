//! Driving port for provider verification administration.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, VerificationCounts, VerificationStatus};

/// Port for reading and deciding provider verification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationAdmin: Send + Sync {
    /// Current verification state of a provider.
    async fn verification_status(&self, provider_id: Uuid) -> Result<VerificationStatus, Error>;

    /// Record an admin decision; only approved and rejected are accepted.
    async fn verify_provider(
        &self,
        provider_id: Uuid,
        decision: VerificationStatus,
    ) -> Result<(), Error>;

    /// Providers per verification state.
    async fn verification_counts(&self) -> Result<VerificationCounts, Error>;
}
