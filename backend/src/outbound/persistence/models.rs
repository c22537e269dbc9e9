//! Row types bridging the Diesel schema and domain constructors.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{bookings, service_providers, services};
use crate::domain::ports::BookingRepositoryError;
use crate::domain::{
    Booking, BookingDetails, BookingDraft, Provider, Service, VerificationStatus,
};

/// A booking ledger row as loaded.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookingRow {
    /// Primary key.
    pub id: Uuid,
    /// Customer reference.
    pub user_id: Uuid,
    /// Service reference.
    pub service_id: Uuid,
    /// Provider reference.
    pub provider_id: Uuid,
    /// Calendar date.
    pub booking_date: NaiveDate,
    /// Time of day.
    pub booking_time: NaiveTime,
    /// Persisted status value.
    pub status: String,
    /// Price snapshot.
    pub total_amount: BigDecimal,
    /// Customer notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insertable booking row borrowed from a domain [`Booking`].
#[derive(Debug, Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBookingRow<'a> {
    /// Primary key.
    pub id: Uuid,
    /// Customer reference.
    pub user_id: Uuid,
    /// Service reference.
    pub service_id: Uuid,
    /// Provider reference.
    pub provider_id: Uuid,
    /// Calendar date.
    pub booking_date: NaiveDate,
    /// Time of day.
    pub booking_time: NaiveTime,
    /// Persisted status value.
    pub status: &'a str,
    /// Price snapshot.
    pub total_amount: &'a BigDecimal,
    /// Customer notes.
    pub notes: Option<&'a str>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl<'a> NewBookingRow<'a> {
    /// Borrow the insertable columns from a validated booking.
    pub fn from_booking(booking: &'a Booking) -> Self {
        Self {
            id: booking.id(),
            user_id: booking.user_id(),
            service_id: booking.service_id(),
            provider_id: booking.provider_id(),
            booking_date: booking.booking_date(),
            booking_time: booking.booking_time(),
            status: booking.status().as_str(),
            total_amount: booking.total_amount(),
            notes: booking.notes(),
            created_at: booking.created_at(),
            updated_at: booking.updated_at(),
        }
    }
}

/// The display columns joined onto a booking row.
pub type JoinedBookingRow = (BookingRow, String, Option<String>, String, String, String);

/// Convert a loaded row into a validated domain booking.
pub fn row_to_booking(row: BookingRow) -> Result<Booking, BookingRepositoryError> {
    let status = row
        .status
        .parse()
        .map_err(|err: crate::domain::ParseBookingStatusError| {
            BookingRepositoryError::query(err.to_string())
        })?;
    Booking::new(BookingDraft {
        id: row.id,
        user_id: row.user_id,
        service_id: row.service_id,
        provider_id: row.provider_id,
        booking_date: row.booking_date,
        booking_time: row.booking_time,
        status,
        total_amount: row.total_amount,
        notes: row.notes,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|err| BookingRepositoryError::query(err.to_string()))
}

/// Convert a joined row into booking details.
pub fn row_to_details(row: JoinedBookingRow) -> Result<BookingDetails, BookingRepositoryError> {
    let (booking_row, service_title, service_image, user_name, user_mobile, provider_name) = row;
    Ok(BookingDetails {
        booking: row_to_booking(booking_row)?,
        service_title,
        service_image,
        user_name,
        user_mobile,
        provider_name,
    })
}

/// A catalog service row, without audit columns.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceRow {
    /// Primary key.
    pub id: Uuid,
    /// Owning provider.
    pub provider_id: Uuid,
    /// Display title.
    pub title: String,
    /// Optional image reference.
    pub image: Option<String>,
    /// Current list price.
    pub price: BigDecimal,
    /// Whether the service is currently offered.
    pub active: bool,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Self {
            id: row.id,
            provider_id: row.provider_id,
            title: row.title,
            image: row.image,
            price: row.price,
            active: row.active,
        }
    }
}

/// A provider row, without audit and rating columns.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = service_providers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProviderRow {
    /// Primary key.
    pub id: Uuid,
    /// Registered business name.
    pub business_name: String,
    /// Persisted verification state.
    pub verification_status: String,
}

impl TryFrom<ProviderRow> for Provider {
    type Error = String;

    fn try_from(row: ProviderRow) -> Result<Self, Self::Error> {
        let verification_status: VerificationStatus = row
            .verification_status
            .parse()
            .map_err(|err: crate::domain::ParseVerificationStatusError| err.to_string())?;
        Ok(Self {
            id: row.id,
            business_name: row.business_name,
            verification_status,
        })
    }
}
