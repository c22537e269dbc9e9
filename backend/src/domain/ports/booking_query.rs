//! Driving port for booking ledger reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BookingDetails, BookingFilter, Error};

/// Port for querying the booking ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// Fetch one booking with display fields.
    async fn get_booking(&self, booking_id: Uuid) -> Result<BookingDetails, Error>;

    /// List a provider's bookings, most recent slot first.
    async fn list_provider_bookings(
        &self,
        provider_id: Uuid,
        filter: BookingFilter,
    ) -> Result<Vec<BookingDetails>, Error>;

    /// List a customer's bookings, most recent slot first.
    async fn list_user_bookings(
        &self,
        user_id: Uuid,
        filter: BookingFilter,
    ) -> Result<Vec<BookingDetails>, Error>;
}
