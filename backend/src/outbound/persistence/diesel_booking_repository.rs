//! PostgreSQL-backed `BookingRepository` implementation using Diesel.
//!
//! The slot-conflict guarantee lives in the database: the partial unique
//! index over (service_id, booking_date, booking_time) for active statuses
//! makes the conflict check and the insert one atomic unit. A unique
//! violation on insert is surfaced as [`BookingRepositoryError::SlotTaken`].

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingDetails, BookingFilter, BookingStatus, ACTIVE_STATUSES};

use super::models::{row_to_details, BookingRow, JoinedBookingRow, NewBookingRow};
use super::pool::PgPool;
use super::schema::{bookings, service_providers, services, users};

/// Diesel-backed implementation of the booking ledger port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: PgPool,
}

impl DieselBookingRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn conn(
        &self,
    ) -> Result<
        diesel_async::pooled_connection::bb8::PooledConnection<'_, diesel_async::AsyncPgConnection>,
        BookingRepositoryError,
    > {
        self.pool
            .get()
            .await
            .map_err(|err| BookingRepositoryError::connection(err.to_string()))
    }
}

fn map_diesel_error(error: diesel::result::Error) -> BookingRepositoryError {
    BookingRepositoryError::query(error.to_string())
}

fn active_status_values() -> Vec<&'static str> {
    ACTIVE_STATUSES.iter().map(|status| status.as_str()).collect()
}

macro_rules! joined_selection {
    () => {
        (
            BookingRow::as_select(),
            services::title,
            services::image,
            users::name,
            users::mobile,
            service_providers::business_name,
        )
    };
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut conn = self.conn().await?;
        let new_row = NewBookingRow::from_booking(booking);

        diesel::insert_into(bookings::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| match err {
                diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    BookingRepositoryError::SlotTaken
                }
                other => map_diesel_error(other),
            })
    }

    async fn find_details(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<BookingDetails>, BookingRepositoryError> {
        let mut conn = self.conn().await?;

        let row = bookings::table
            .inner_join(services::table.on(services::id.eq(bookings::service_id)))
            .inner_join(users::table.on(users::id.eq(bookings::user_id)))
            .inner_join(
                service_providers::table.on(service_providers::id.eq(bookings::provider_id)),
            )
            .filter(bookings::id.eq(booking_id))
            .select(joined_selection!())
            .first::<JoinedBookingRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_details).transpose()
    }

    async fn find_status(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<BookingStatus>, BookingRepositoryError> {
        let mut conn = self.conn().await?;

        let status = bookings::table
            .filter(bookings::id.eq(booking_id))
            .select(bookings::status)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        status
            .map(|value| {
                value
                    .parse()
                    .map_err(|err: crate::domain::ParseBookingStatusError| {
                        BookingRepositoryError::query(err.to_string())
                    })
            })
            .transpose()
    }

    async fn set_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, BookingRepositoryError> {
        let mut conn = self.conn().await?;

        let updated = diesel::update(bookings::table.filter(bookings::id.eq(booking_id)))
            .set((
                bookings::status.eq(status.as_str()),
                bookings::updated_at.eq(updated_at),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn list_for_provider(
        &self,
        provider_id: Uuid,
        filter: &BookingFilter,
    ) -> Result<Vec<BookingDetails>, BookingRepositoryError> {
        let mut conn = self.conn().await?;

        let mut query = bookings::table
            .inner_join(services::table.on(services::id.eq(bookings::service_id)))
            .inner_join(users::table.on(users::id.eq(bookings::user_id)))
            .inner_join(
                service_providers::table.on(service_providers::id.eq(bookings::provider_id)),
            )
            .filter(bookings::provider_id.eq(provider_id))
            .select(joined_selection!())
            .into_boxed();

        if let Some(status) = filter.status {
            query = query.filter(bookings::status.eq(status.as_str()));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(bookings::booking_date.ge(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(bookings::booking_date.le(end));
        }

        let rows = query
            .order((bookings::booking_date.desc(), bookings::booking_time.desc()))
            .load::<JoinedBookingRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_details).collect()
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: &BookingFilter,
    ) -> Result<Vec<BookingDetails>, BookingRepositoryError> {
        let mut conn = self.conn().await?;

        let mut query = bookings::table
            .inner_join(services::table.on(services::id.eq(bookings::service_id)))
            .inner_join(users::table.on(users::id.eq(bookings::user_id)))
            .inner_join(
                service_providers::table.on(service_providers::id.eq(bookings::provider_id)),
            )
            .filter(bookings::user_id.eq(user_id))
            .select(joined_selection!())
            .into_boxed();

        if let Some(status) = filter.status {
            query = query.filter(bookings::status.eq(status.as_str()));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(bookings::booking_date.ge(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(bookings::booking_date.le(end));
        }

        let rows = query
            .order((bookings::booking_date.desc(), bookings::booking_time.desc()))
            .load::<JoinedBookingRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_details).collect()
    }

    async fn booked_times(
        &self,
        service_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<NaiveTime>, BookingRepositoryError> {
        let mut conn = self.conn().await?;

        bookings::table
            .filter(bookings::service_id.eq(service_id))
            .filter(bookings::booking_date.eq(date))
            .filter(bookings::status.eq_any(active_status_values()))
            .select(bookings::booking_time)
            .order(bookings::booking_time.asc())
            .load::<NaiveTime>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn active_status_values_match_the_unique_index_predicate() {
        assert_eq!(
            active_status_values(),
            vec!["pending", "approved", "paid_deposit"]
        );
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let mapped = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(mapped, BookingRepositoryError::Query { .. }));
    }
}
