//! Aggregation reporter service: read-only projections over ledger + catalog.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{ReportingQuery, ReportingRepository, ReportingRepositoryError};
use crate::domain::{
    DashboardStats, Error, LatestReview, MonthlyCompletedCount, ProviderRatingSummary,
    RatingBucket, ServiceRatingStats, TopProvider,
};

/// Months covered by the monthly completed-bookings projection.
const REPORTED_MONTHS: [&str; 6] = ["January", "February", "March", "April", "May", "June"];

/// Leaderboard and latest-review lengths.
const LEADERBOARD_LIMIT: i64 = 3;

fn map_reporting_error(error: ReportingRepositoryError) -> Error {
    match error {
        ReportingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("reporting store unavailable: {message}"))
        }
        ReportingRepositoryError::Query { message } => {
            Error::internal(format!("reporting store error: {message}"))
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Reporting service implementing the read-only driving port.
#[derive(Clone)]
pub struct ReportingService<R> {
    reporting: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ReportingService<R> {
    /// Create a new service over the reporting read models.
    pub fn new(reporting: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { reporting, clock }
    }
}

#[async_trait]
impl<R> ReportingQuery for ReportingService<R>
where
    R: ReportingRepository,
{
    async fn provider_rating(&self, provider_id: Uuid) -> Result<ProviderRatingSummary, Error> {
        let average = self
            .reporting
            .provider_average_rating(provider_id)
            .await
            .map_err(map_reporting_error)?
            .unwrap_or(0.0);

        Ok(ProviderRatingSummary {
            average_rating: round_one_decimal(average),
        })
    }

    async fn service_rating_stats(&self, service_id: Uuid) -> Result<ServiceRatingStats, Error> {
        let counts = self
            .reporting
            .service_rating_counts(service_id)
            .await
            .map_err(map_reporting_error)?;

        let count_for = |stars: i32| {
            counts
                .iter()
                .find(|c| c.rating == stars)
                .map_or(0, |c| c.count)
        };
        let total_reviews: i64 = (1..=5).map(count_for).sum();
        let total_rating: i64 = (1..=5).map(|stars| i64::from(stars) * count_for(stars)).sum();

        let distribution = (1..=5)
            .rev()
            .map(|stars| {
                let count = count_for(stars);
                let percentage = if total_reviews > 0 {
                    count as f64 / total_reviews as f64 * 100.0
                } else {
                    0.0
                };
                RatingBucket {
                    rating: stars as u8,
                    count,
                    percentage,
                }
            })
            .collect();

        let average_rating = if total_reviews > 0 {
            total_rating as f64 / total_reviews as f64
        } else {
            0.0
        };

        Ok(ServiceRatingStats {
            distribution,
            total_reviews,
            total_rating,
            average_rating,
        })
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, Error> {
        self.reporting
            .dashboard_counts()
            .await
            .map_err(map_reporting_error)
    }

    async fn monthly_completed(&self) -> Result<Vec<MonthlyCompletedCount>, Error> {
        let year = self.clock.utc().year();
        let from = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| Error::internal("invalid start of reporting year"))?;
        let until = NaiveDate::from_ymd_opt(year, 7, 1)
            .ok_or_else(|| Error::internal("invalid end of reporting window"))?;

        let dates = self
            .reporting
            .completed_booking_dates(from, until)
            .await
            .map_err(map_reporting_error)?;

        let mut counts = [0_i64; REPORTED_MONTHS.len()];
        for date in dates {
            let index = date.month0() as usize;
            if let Some(slot) = counts.get_mut(index) {
                *slot += 1;
            }
        }

        Ok(REPORTED_MONTHS
            .iter()
            .zip(counts)
            .map(|(month, count)| MonthlyCompletedCount {
                month: (*month).to_owned(),
                count,
            })
            .collect())
    }

    async fn top_providers(&self) -> Result<Vec<TopProvider>, Error> {
        let rows = self
            .reporting
            .top_providers(LEADERBOARD_LIMIT)
            .await
            .map_err(map_reporting_error)?;

        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| TopProvider {
                rank: index + 1,
                provider_id: row.provider_id,
                business_name: row.business_name,
                average_rating: row.average_rating,
                rating_count: row.rating_count,
                total_bookings: row.total_bookings,
                completed_bookings: row.completed_bookings,
            })
            .collect())
    }

    async fn latest_reviews(&self) -> Result<Vec<LatestReview>, Error> {
        self.reporting
            .latest_reviews(LEADERBOARD_LIMIT)
            .await
            .map_err(map_reporting_error)
    }
}

#[cfg(test)]
#[path = "reporting_service_tests.rs"]
mod tests;
