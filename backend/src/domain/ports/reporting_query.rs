//! Driving port for the aggregation reporters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    DashboardStats, Error, LatestReview, MonthlyCompletedCount, ProviderRatingSummary,
    ServiceRatingStats, TopProvider,
};

/// Port exposing the read-only projections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportingQuery: Send + Sync {
    /// Average review rating for a provider.
    async fn provider_rating(&self, provider_id: Uuid) -> Result<ProviderRatingSummary, Error>;

    /// Per-star distribution and totals for a service.
    async fn service_rating_stats(&self, service_id: Uuid) -> Result<ServiceRatingStats, Error>;

    /// Headline dashboard counts.
    async fn dashboard_stats(&self) -> Result<DashboardStats, Error>;

    /// Completed bookings per month, January through June of the current
    /// year, zero-filled.
    async fn monthly_completed(&self) -> Result<Vec<MonthlyCompletedCount>, Error>;

    /// Top verified providers by rating.
    async fn top_providers(&self) -> Result<Vec<TopProvider>, Error>;

    /// Most recent reviews.
    async fn latest_reviews(&self) -> Result<Vec<LatestReview>, Error>;
}
