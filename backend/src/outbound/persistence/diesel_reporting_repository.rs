//! PostgreSQL-backed `ReportingRepository` implementation using Diesel.
//!
//! Pure read models; every query here is a projection over the ledger,
//! catalog, and review tables.

use async_trait::async_trait;
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::dsl::{avg, count_star};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    RatingCount, ReportingRepository, ReportingRepositoryError, TopProviderRow,
};
use crate::domain::{DashboardStats, LatestReview};

use super::pool::PgPool;
use super::schema::{bookings, service_providers, service_reviews, services, users};

/// Diesel-backed implementation of the reporting port.
#[derive(Clone)]
pub struct DieselReportingRepository {
    pool: PgPool,
}

impl DieselReportingRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn conn(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, diesel_async::AsyncPgConnection>,
        ReportingRepositoryError,
    > {
        self.pool
            .get()
            .await
            .map_err(|err| ReportingRepositoryError::connection(err.to_string()))
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ReportingRepositoryError {
    ReportingRepositoryError::query(error.to_string())
}

const APPROVED: &str = "approved";
const COMPLETED: &str = "completed";

#[async_trait]
impl ReportingRepository for DieselReportingRepository {
    async fn provider_average_rating(
        &self,
        provider_id: Uuid,
    ) -> Result<Option<f64>, ReportingRepositoryError> {
        let mut conn = self.conn().await?;

        let average = service_reviews::table
            .inner_join(services::table.on(services::id.eq(service_reviews::service_id)))
            .filter(services::provider_id.eq(provider_id))
            .select(avg(service_reviews::rating))
            .first::<Option<BigDecimal>>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(average.and_then(|value| value.to_f64()))
    }

    async fn service_rating_counts(
        &self,
        service_id: Uuid,
    ) -> Result<Vec<RatingCount>, ReportingRepositoryError> {
        let mut conn = self.conn().await?;

        let rows = service_reviews::table
            .filter(service_reviews::service_id.eq(service_id))
            .group_by(service_reviews::rating)
            .select((service_reviews::rating, count_star()))
            .load::<(i32, i64)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(rating, count)| RatingCount { rating, count })
            .collect())
    }

    async fn dashboard_counts(&self) -> Result<DashboardStats, ReportingRepositoryError> {
        let mut conn = self.conn().await?;

        let total_users = users::table
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let total_verified_providers = service_providers::table
            .filter(service_providers::verification_status.eq(APPROVED))
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let total_active_services = services::table
            .inner_join(service_providers::table)
            .filter(services::active.eq(true))
            .filter(service_providers::verification_status.eq(APPROVED))
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let total_completed_services = bookings::table
            .inner_join(
                service_providers::table.on(service_providers::id.eq(bookings::provider_id)),
            )
            .filter(bookings::status.eq(COMPLETED))
            .filter(service_providers::verification_status.eq(APPROVED))
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(DashboardStats {
            total_users,
            total_verified_providers,
            total_active_services,
            total_completed_services,
        })
    }

    async fn completed_booking_dates(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<NaiveDate>, ReportingRepositoryError> {
        let mut conn = self.conn().await?;

        bookings::table
            .filter(bookings::status.eq(COMPLETED))
            .filter(bookings::booking_date.ge(from))
            .filter(bookings::booking_date.lt(until))
            .select(bookings::booking_date)
            .load::<NaiveDate>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn top_providers(
        &self,
        limit: i64,
    ) -> Result<Vec<TopProviderRow>, ReportingRepositoryError> {
        let mut conn = self.conn().await?;

        let providers = service_providers::table
            .filter(service_providers::verification_status.eq(APPROVED))
            .order((
                service_providers::total_rating.desc(),
                service_providers::rating_count.desc(),
            ))
            .limit(limit)
            .select((
                service_providers::id,
                service_providers::business_name,
                service_providers::total_rating,
                service_providers::rating_count,
            ))
            .load::<(Uuid, String, f64, i32)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut rows = Vec::with_capacity(providers.len());
        for (provider_id, business_name, average_rating, rating_count) in providers {
            let total_bookings = bookings::table
                .filter(bookings::provider_id.eq(provider_id))
                .count()
                .get_result::<i64>(&mut conn)
                .await
                .map_err(map_diesel_error)?;

            let completed_bookings = bookings::table
                .filter(bookings::provider_id.eq(provider_id))
                .filter(bookings::status.eq(COMPLETED))
                .count()
                .get_result::<i64>(&mut conn)
                .await
                .map_err(map_diesel_error)?;

            rows.push(TopProviderRow {
                provider_id,
                business_name,
                average_rating,
                rating_count,
                total_bookings,
                completed_bookings,
            });
        }
        Ok(rows)
    }

    async fn latest_reviews(
        &self,
        limit: i64,
    ) -> Result<Vec<LatestReview>, ReportingRepositoryError> {
        let mut conn = self.conn().await?;

        let rows = service_reviews::table
            .inner_join(services::table.on(services::id.eq(service_reviews::service_id)))
            .inner_join(users::table.on(users::id.eq(service_reviews::user_id)))
            .inner_join(
                service_providers::table.on(service_providers::id.eq(services::provider_id)),
            )
            .order(service_reviews::created_at.desc())
            .limit(limit)
            .select((
                service_reviews::id,
                service_reviews::rating,
                service_reviews::review_text,
                service_reviews::created_at,
                services::title,
                users::name,
                service_providers::business_name,
            ))
            .load::<(
                Uuid,
                i32,
                Option<String>,
                DateTime<Utc>,
                String,
                String,
                String,
            )>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(
                |(id, rating, review_text, created_at, service_title, user_name, provider_name)| {
                    LatestReview {
                        id,
                        rating,
                        review_text,
                        created_at,
                        service_title,
                        user_name,
                        provider_name,
                    }
                },
            )
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::VerificationStatus;

    #[rstest]
    fn status_literals_match_domain_wire_values() {
        assert_eq!(APPROVED, VerificationStatus::Approved.as_str());
        assert_eq!(COMPLETED, crate::domain::BookingStatus::Completed.as_str());
    }
}
