//! Driven port for the booking ledger's persistence.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::domain::{Booking, BookingDetails, BookingFilter, BookingStatus};

/// Errors raised by booking repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingRepositoryError {
    /// Repository connection could not be established.
    #[error("booking repository connection failed: {message}")]
    Connection {
        /// Adapter-provided description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("booking repository query failed: {message}")]
    Query {
        /// Adapter-provided description.
        message: String,
    },
    /// The slot is already held by an active booking.
    ///
    /// Adapters must detect this atomically with the insert (e.g. via a
    /// partial unique index), never with a separate pre-check.
    #[error("slot is already held by an active booking")]
    SlotTaken,
}

impl BookingRepositoryError {
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

/// Port for writing and reading booking ledger rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking, failing with [`BookingRepositoryError::SlotTaken`]
    /// when an active booking already holds the slot. The conflict check and
    /// the insert are a single atomic unit.
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;

    /// Fetch a booking joined with display fields.
    async fn find_details(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<BookingDetails>, BookingRepositoryError>;

    /// Fetch only the current status of a booking.
    async fn find_status(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<BookingStatus>, BookingRepositoryError>;

    /// Overwrite the status and update timestamp of an existing booking.
    /// Returns false when the booking does not exist.
    async fn set_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, BookingRepositoryError>;

    /// List a provider's bookings, most recent slot first.
    async fn list_for_provider(
        &self,
        provider_id: Uuid,
        filter: &BookingFilter,
    ) -> Result<Vec<BookingDetails>, BookingRepositoryError>;

    /// List a customer's bookings, most recent slot first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: &BookingFilter,
    ) -> Result<Vec<BookingDetails>, BookingRepositoryError>;

    /// Start times of active bookings for a service on a date.
    async fn booked_times(
        &self,
        service_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<NaiveTime>, BookingRepositoryError>;
}
