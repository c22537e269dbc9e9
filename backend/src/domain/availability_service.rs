//! Slot availability service: read-only listing of bookable slots.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{AvailabilityQuery, BookingRepository, BookingRepositoryError};
use crate::domain::{slots, Error, SlotAvailability};

fn map_ledger_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking ledger unavailable: {message}"))
        }
        _ => Error::internal(format!("booking ledger error: {error}")),
    }
}

/// Availability service deriving the day grid from the ledger.
#[derive(Clone)]
pub struct AvailabilityService<B> {
    bookings: Arc<B>,
    clock: Arc<dyn Clock>,
}

impl<B> AvailabilityService<B> {
    /// Create a new service over the booking ledger.
    pub fn new(bookings: Arc<B>, clock: Arc<dyn Clock>) -> Self {
        Self { bookings, clock }
    }
}

#[async_trait]
impl<B> AvailabilityQuery for AvailabilityService<B>
where
    B: BookingRepository,
{
    async fn day_availability(
        &self,
        service_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<SlotAvailability>, Error> {
        let now = self.clock.utc();
        if date < now.date_naive() {
            return Err(Error::past_date("cannot check availability for past dates"));
        }

        let booked = self
            .bookings
            .booked_times(service_id, date)
            .await
            .map_err(map_ledger_error)?
            .into_iter()
            .collect();

        Ok(slots::day_slots(date, now, &booked))
    }
}

#[cfg(test)]
#[path = "availability_service_tests.rs"]
mod tests;
