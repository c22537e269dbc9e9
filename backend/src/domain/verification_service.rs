//! Provider verification service: the one catalog write kept in this core.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError, VerificationAdmin};
use crate::domain::{Error, VerificationCounts, VerificationStatus};

fn map_catalogue_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalogue unavailable: {message}"))
        }
        CatalogueRepositoryError::Query { message } => {
            Error::internal(format!("catalogue error: {message}"))
        }
    }
}

/// Verification service implementing the admin driving port.
#[derive(Clone)]
pub struct VerificationService<C> {
    catalogue: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<C> VerificationService<C> {
    /// Create a new service over the catalog repository.
    pub fn new(catalogue: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { catalogue, clock }
    }
}

#[async_trait]
impl<C> VerificationAdmin for VerificationService<C>
where
    C: CatalogueRepository,
{
    async fn verification_status(&self, provider_id: Uuid) -> Result<VerificationStatus, Error> {
        self.catalogue
            .find_provider(provider_id)
            .await
            .map_err(map_catalogue_error)?
            .map(|provider| provider.verification_status)
            .ok_or_else(|| Error::not_found("provider not found"))
    }

    async fn verify_provider(
        &self,
        provider_id: Uuid,
        decision: VerificationStatus,
    ) -> Result<(), Error> {
        if decision == VerificationStatus::Pending {
            return Err(Error::invalid_request(
                "verification decision must be approved or rejected",
            )
            .with_details(json!({ "status": decision.as_str() })));
        }

        let updated = self
            .catalogue
            .set_verification_status(provider_id, decision, self.clock.utc())
            .await
            .map_err(map_catalogue_error)?;
        if !updated {
            return Err(Error::not_found("provider not found"));
        }
        Ok(())
    }

    async fn verification_counts(&self) -> Result<VerificationCounts, Error> {
        self.catalogue
            .verification_counts()
            .await
            .map_err(map_catalogue_error)
    }
}

#[cfg(test)]
#[path = "verification_service_tests.rs"]
mod tests;
