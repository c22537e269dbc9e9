//! PostgreSQL-backed `CatalogueRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError};
use crate::domain::{Provider, Service, VerificationCounts, VerificationStatus};

use super::models::{ProviderRow, ServiceRow};
use super::pool::PgPool;
use super::schema::{service_providers, services};

/// Diesel-backed implementation of the catalog port.
#[derive(Clone)]
pub struct DieselCatalogueRepository {
    pool: PgPool,
}

impl DieselCatalogueRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn conn(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, diesel_async::AsyncPgConnection>,
        CatalogueRepositoryError,
    > {
        self.pool
            .get()
            .await
            .map_err(|err| CatalogueRepositoryError::connection(err.to_string()))
    }
}

fn map_diesel_error(error: diesel::result::Error) -> CatalogueRepositoryError {
    CatalogueRepositoryError::query(error.to_string())
}

#[async_trait]
impl CatalogueRepository for DieselCatalogueRepository {
    async fn find_service(
        &self,
        service_id: Uuid,
    ) -> Result<Option<Service>, CatalogueRepositoryError> {
        let mut conn = self.conn().await?;

        let row = services::table
            .filter(services::id.eq(service_id))
            .select(ServiceRow::as_select())
            .first::<ServiceRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Service::from))
    }

    async fn find_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Option<Provider>, CatalogueRepositoryError> {
        let mut conn = self.conn().await?;

        let row = service_providers::table
            .filter(service_providers::id.eq(provider_id))
            .select(ProviderRow::as_select())
            .first::<ProviderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| Provider::try_from(row).map_err(CatalogueRepositoryError::query))
            .transpose()
    }

    async fn set_verification_status(
        &self,
        provider_id: Uuid,
        status: VerificationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, CatalogueRepositoryError> {
        let mut conn = self.conn().await?;

        let updated =
            diesel::update(service_providers::table.filter(service_providers::id.eq(provider_id)))
                .set((
                    service_providers::verification_status.eq(status.as_str()),
                    service_providers::updated_at.eq(updated_at),
                ))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn verification_counts(&self) -> Result<VerificationCounts, CatalogueRepositoryError> {
        let mut conn = self.conn().await?;

        let rows = service_providers::table
            .group_by(service_providers::verification_status)
            .select((service_providers::verification_status, diesel::dsl::count_star()))
            .load::<(String, i64)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut counts = VerificationCounts::default();
        for (status, count) in rows {
            match status.parse::<VerificationStatus>() {
                Ok(VerificationStatus::Pending) => counts.pending = count,
                Ok(VerificationStatus::Approved) => counts.approved = count,
                Ok(VerificationStatus::Rejected) => counts.rejected = count,
                Err(err) => return Err(CatalogueRepositoryError::query(err.to_string())),
            }
        }
        Ok(counts)
    }
}
