//! Booking ledger services: slot reservation, lifecycle, and queries.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use mockable::Clock;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{
    BookingCommand, BookingQuery, BookingRepository, BookingRepositoryError, CatalogueRepository,
    CatalogueRepositoryError, CreateBookingRequest, StatusUpdate,
};
use crate::domain::{Booking, BookingDetails, BookingDraft, BookingFilter, BookingStatus, Error};

fn map_ledger_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking ledger unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking ledger error: {message}"))
        }
        BookingRepositoryError::SlotTaken => {
            Error::conflict("this time slot is already booked")
        }
    }
}

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

/// Booking service implementing the command and query driving ports.
///
/// Wall-clock reads go through the injected clock so temporal rules stay
/// deterministic under test.
#[derive(Clone)]
pub struct BookingService<B, C> {
    bookings: Arc<B>,
    catalogue: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<B, C> BookingService<B, C> {
    /// Create a new service over the ledger and catalog repositories.
    pub fn new(bookings: Arc<B>, catalogue: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            bookings,
            catalogue,
            clock,
        }
    }
}

#[async_trait]
impl<B, C> BookingCommand for BookingService<B, C>
where
    B: BookingRepository,
    C: CatalogueRepository,
{
    async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<BookingDetails, Error> {
        let now = self.clock.utc();
        if request.booking_date < now.date_naive() {
            return Err(Error::past_date("cannot book for past dates"));
        }
        let slot_start = NaiveDateTime::new(request.booking_date, request.booking_time);
        if slot_start <= now.naive_utc() {
            return Err(Error::past_date("cannot book for past time slots"));
        }

        let service = self
            .catalogue
            .find_service(request.service_id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found("service not found"))?;

        let booking = Booking::new(BookingDraft {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            service_id: request.service_id,
            provider_id: service.provider_id,
            booking_date: request.booking_date,
            booking_time: request.booking_time,
            status: BookingStatus::Pending,
            total_amount: service.price.clone(),
            notes: request.notes,
            created_at: now,
            updated_at: now,
        })
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        // The repository performs the conflict check and the insert as one
        // atomic unit; SlotTaken is the only conflict signal.
        self.bookings
            .insert(&booking)
            .await
            .map_err(map_ledger_error)?;

        self.bookings
            .find_details(booking.id())
            .await
            .map_err(map_ledger_error)?
            .ok_or_else(|| Error::internal("booking missing immediately after insert"))
    }

    async fn update_status(
        &self,
        booking_id: Uuid,
        new_status: BookingStatus,
    ) -> Result<StatusUpdate, Error> {
        let current = self
            .bookings
            .find_status(booking_id)
            .await
            .map_err(map_ledger_error)?
            .ok_or_else(|| Error::not_found("booking not found"))?;

        if !current.can_transition_to(new_status) {
            return Err(Error::invalid_request(format!(
                "cannot transition booking from {current} to {new_status}"
            ))
            .with_details(json!({
                "from": current.as_str(),
                "to": new_status.as_str(),
            })));
        }

        let updated = self
            .bookings
            .set_status(booking_id, new_status, self.clock.utc())
            .await
            .map_err(map_ledger_error)?;
        if !updated {
            return Err(Error::not_found("booking not found"));
        }

        Ok(StatusUpdate {
            booking_id,
            status: new_status,
        })
    }
}

#[async_trait]
impl<B, C> BookingQuery for BookingService<B, C>
where
    B: BookingRepository,
    C: CatalogueRepository,
{
    async fn get_booking(&self, booking_id: Uuid) -> Result<BookingDetails, Error> {
        self.bookings
            .find_details(booking_id)
            .await
            .map_err(map_ledger_error)?
            .ok_or_else(|| Error::not_found("booking not found"))
    }

    async fn list_provider_bookings(
        &self,
        provider_id: Uuid,
        filter: BookingFilter,
    ) -> Result<Vec<BookingDetails>, Error> {
        self.bookings
            .list_for_provider(provider_id, &filter)
            .await
            .map_err(map_ledger_error)
    }

    async fn list_user_bookings(
        &self,
        user_id: Uuid,
        filter: BookingFilter,
    ) -> Result<Vec<BookingDetails>, Error> {
        self.bookings
            .list_for_user(user_id, &filter)
            .await
            .map_err(map_ledger_error)
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
