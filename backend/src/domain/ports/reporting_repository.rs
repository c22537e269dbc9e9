//! Driven port for the aggregation reporters' read models.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{DashboardStats, LatestReview};

/// Errors raised by reporting repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportingRepositoryError {
    /// Repository connection could not be established.
    #[error("reporting repository connection failed: {message}")]
    Connection {
        /// Adapter-provided description.
        message: String,
    },
    /// Query failed during execution.
    #[error("reporting repository query failed: {message}")]
    Query {
        /// Adapter-provided description.
        message: String,
    },
}

impl ReportingRepositoryError {
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

/// Review count for one star value as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingCount {
    /// Star value, 1 through 5.
    pub rating: i32,
    /// Number of reviews with that value.
    pub count: i64,
}

/// One leaderboard row before ranking is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TopProviderRow {
    /// Provider identifier.
    pub provider_id: Uuid,
    /// Registered business name.
    pub business_name: String,
    /// Denormalised mean provider rating.
    pub average_rating: f64,
    /// Number of ratings behind the mean.
    pub rating_count: i32,
    /// All bookings ever taken.
    pub total_bookings: i64,
    /// Bookings that reached completed.
    pub completed_bookings: i64,
}

/// Port for the read-only aggregation queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportingRepository: Send + Sync {
    /// Mean review rating across a provider's services, when any exist.
    async fn provider_average_rating(
        &self,
        provider_id: Uuid,
    ) -> Result<Option<f64>, ReportingRepositoryError>;

    /// Raw per-star review counts for a service.
    async fn service_rating_counts(
        &self,
        service_id: Uuid,
    ) -> Result<Vec<RatingCount>, ReportingRepositoryError>;

    /// Headline dashboard counts.
    async fn dashboard_counts(&self) -> Result<DashboardStats, ReportingRepositoryError>;

    /// Dates of completed bookings within the given range (inclusive start,
    /// exclusive end).
    async fn completed_booking_dates(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<NaiveDate>, ReportingRepositoryError>;

    /// Verified providers ranked by rating, with booking counts.
    async fn top_providers(
        &self,
        limit: i64,
    ) -> Result<Vec<TopProviderRow>, ReportingRepositoryError>;

    /// Most recent reviews with display fields.
    async fn latest_reviews(&self, limit: i64)
        -> Result<Vec<LatestReview>, ReportingRepositoryError>;
}
