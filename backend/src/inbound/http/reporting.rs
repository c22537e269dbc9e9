//! Aggregation reporter HTTP handlers.
//!
//! ```text
//! GET /api/v1/providers/{provider_id}/rating      Average provider rating
//! GET /api/v1/services/{service_id}/rating-stats  Review distribution
//! GET /api/v1/dashboard/stats                     Headline counts
//! GET /api/v1/bookings/monthly-completed          Completed per month
//! GET /api/v1/providers/top                       Provider leaderboard
//! GET /api/v1/reviews/latest                      Recent reviews
//! ```

use actix_web::{get, web};
use uuid::Uuid;

use crate::domain::{
    DashboardStats, LatestReview, MonthlyCompletedCount, ProviderRatingSummary,
    ServiceRatingStats, TopProvider,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Average review rating for a provider.
#[utoipa::path(
    get,
    path = "/api/v1/providers/{provider_id}/rating",
    params(("provider_id" = Uuid, Path, description = "Provider identifier")),
    responses((status = 200, description = "Rating summary", body = ProviderRatingSummary)),
    tags = ["reporting"],
    operation_id = "getProviderRating"
)]
#[get("/providers/{provider_id}/rating")]
pub async fn provider_rating(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ProviderRatingSummary>> {
    let summary = state.reporting.provider_rating(path.into_inner()).await?;
    Ok(web::Json(summary))
}

/// Per-star distribution and totals for a service's reviews.
#[utoipa::path(
    get,
    path = "/api/v1/services/{service_id}/rating-stats",
    params(("service_id" = Uuid, Path, description = "Service identifier")),
    responses((status = 200, description = "Rating statistics", body = ServiceRatingStats)),
    tags = ["reporting"],
    operation_id = "getServiceRatingStats"
)]
#[get("/services/{service_id}/rating-stats")]
pub async fn service_rating_stats(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ServiceRatingStats>> {
    let stats = state
        .reporting
        .service_rating_stats(path.into_inner())
        .await?;
    Ok(web::Json(stats))
}

/// Headline counts for the admin dashboard.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    responses((status = 200, description = "Dashboard counts", body = DashboardStats)),
    tags = ["reporting"],
    operation_id = "getDashboardStats"
)]
#[get("/dashboard/stats")]
pub async fn dashboard_stats(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DashboardStats>> {
    let stats = state.reporting.dashboard_stats().await?;
    Ok(web::Json(stats))
}

/// Completed bookings per month, zero-filled January through June.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/monthly-completed",
    responses((status = 200, description = "Monthly counts", body = [MonthlyCompletedCount])),
    tags = ["reporting"],
    operation_id = "getMonthlyCompleted"
)]
#[get("/bookings/monthly-completed")]
pub async fn monthly_completed(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<MonthlyCompletedCount>>> {
    let months = state.reporting.monthly_completed().await?;
    Ok(web::Json(months))
}

/// Top verified providers by rating.
#[utoipa::path(
    get,
    path = "/api/v1/providers/top",
    responses((status = 200, description = "Leaderboard", body = [TopProvider])),
    tags = ["reporting"],
    operation_id = "getTopProviders"
)]
#[get("/providers/top")]
pub async fn top_providers(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<TopProvider>>> {
    let top = state.reporting.top_providers().await?;
    Ok(web::Json(top))
}

/// Most recent reviews with display fields.
#[utoipa::path(
    get,
    path = "/api/v1/reviews/latest",
    responses((status = 200, description = "Recent reviews", body = [LatestReview])),
    tags = ["reporting"],
    operation_id = "getLatestReviews"
)]
#[get("/reviews/latest")]
pub async fn latest_reviews(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<LatestReview>>> {
    let reviews = state.reporting.latest_reviews().await?;
    Ok(web::Json(reviews))
}
