//! Read-only projection types produced by the aggregation reporters.
//!
//! These are derived views over the booking ledger and the catalog; nothing
//! here feeds back into booking decisions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Average review rating across a provider's services.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct ProviderRatingSummary {
    /// Mean rating rounded to one decimal; 0.0 when unreviewed.
    pub average_rating: f64,
}

/// Review count for one star value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct RatingBucket {
    /// Star value, 1 through 5.
    pub rating: u8,
    /// Number of reviews with this star value.
    pub count: i64,
    /// Share of all reviews, 0–100.
    pub percentage: f64,
}

/// Per-star distribution and totals for one service's reviews.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ServiceRatingStats {
    /// Buckets ordered 5 stars down to 1.
    pub distribution: Vec<RatingBucket>,
    /// Total number of reviews.
    pub total_reviews: i64,
    /// Sum of all star values.
    pub total_rating: i64,
    /// Mean star value; 0.0 when unreviewed.
    pub average_rating: f64,
}

/// Headline counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardStats {
    /// Registered customers.
    pub total_users: i64,
    /// Providers with approved verification.
    pub total_verified_providers: i64,
    /// Active services offered by verified providers.
    pub total_active_services: i64,
    /// Completed bookings delivered by verified providers.
    pub total_completed_services: i64,
}

/// Completed bookings for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MonthlyCompletedCount {
    /// English month name.
    pub month: String,
    /// Completed bookings dated in that month.
    pub count: i64,
}

/// One entry in the top-provider leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TopProvider {
    /// Leaderboard position, starting at 1.
    pub rank: usize,
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

/// A recent review with display fields for the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LatestReview {
    /// Review identifier.
    pub id: Uuid,
    /// Star value, 1 through 5.
    pub rating: i32,
    /// Free-text review body, if any.
    pub review_text: Option<String>,
    /// When the review was left.
    pub created_at: DateTime<Utc>,
    /// Reviewed service title.
    pub service_title: String,
    /// Reviewer display name.
    pub user_name: String,
    /// Provider business name.
    pub provider_name: String,
}
