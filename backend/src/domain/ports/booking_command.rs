//! Driving port for booking ledger mutations.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::domain::{BookingDetails, BookingStatus, Error};

/// Validated input for creating a booking.
///
/// Field presence and format checks happen at the transport boundary; this
/// payload carries already-parsed values.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateBookingRequest {
    /// Customer placing the reservation.
    pub user_id: Uuid,
    /// Service to reserve.
    pub service_id: Uuid,
    /// Requested calendar date.
    pub booking_date: NaiveDate,
    /// Requested time of day.
    pub booking_time: NaiveTime,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// Outcome of a status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    /// The updated booking.
    pub booking_id: Uuid,
    /// Status now held by the booking.
    pub status: BookingStatus,
}

/// Port for creating bookings and driving their lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Reserve a slot, returning the joined record for display.
    async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<BookingDetails, Error>;

    /// Transition an existing booking to a new status.
    async fn update_status(
        &self,
        booking_id: Uuid,
        new_status: BookingStatus,
    ) -> Result<StatusUpdate, Error>;
}
