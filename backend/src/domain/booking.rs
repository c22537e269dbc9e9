//! Booking aggregate: status lifecycle, slot occupancy, and validated state.
//!
//! A booking reserves one (service, date, time) slot for a user. The slot is
//! held while the booking is in an active status; rejected, completed, and
//! cancelled bookings release it. Bookings are never deleted — cancellation
//! is a status, not a row removal.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Awaiting a provider decision. Holds the slot.
    Pending,
    /// Accepted by the provider. Holds the slot.
    Approved,
    /// Declined by the provider. Terminal.
    Rejected,
    /// Service was delivered. Terminal.
    Completed,
    /// Withdrawn by either party. Terminal.
    Cancelled,
    /// Deposit received ahead of approval. Holds the slot.
    PaidDeposit,
}

/// Statuses that occupy their slot, for both the creation conflict check and
/// the availability listing.
pub const ACTIVE_STATUSES: [BookingStatus; 3] = [
    BookingStatus::Pending,
    BookingStatus::Approved,
    BookingStatus::PaidDeposit,
];

impl BookingStatus {
    /// Whether a booking in this status occupies its slot.
    pub fn is_active(self) -> bool {
        ACTIVE_STATUSES.contains(&self)
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    ///
    /// No transition leads from an inactive status back into the active set,
    /// so status updates cannot re-occupy a slot that was released.
    pub fn can_transition_to(self, next: Self) -> bool {
        use BookingStatus::{Approved, Cancelled, Completed, PaidDeposit, Pending, Rejected};
        match self {
            Pending => matches!(next, Approved | Rejected | Cancelled | PaidDeposit),
            PaidDeposit => matches!(next, Approved | Completed | Cancelled),
            Approved => matches!(next, Completed | Cancelled),
            Rejected | Completed | Cancelled => false,
        }
    }

    /// Wire representation, matching the persisted value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::PaidDeposit => "paid_deposit",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing an unrecognised status value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised booking status: {value}")]
pub struct ParseBookingStatusError {
    /// The rejected input value.
    pub value: String,
}

impl FromStr for BookingStatus {
    type Err = ParseBookingStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "paid_deposit" => Ok(Self::PaidDeposit),
            other => Err(ParseBookingStatusError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Unvalidated booking fields, as assembled by services and adapters.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    /// Booking identifier.
    pub id: Uuid,
    /// Customer placing the reservation.
    pub user_id: Uuid,
    /// Reserved service.
    pub service_id: Uuid,
    /// Provider owning the service, resolved at creation time.
    pub provider_id: Uuid,
    /// Calendar date of the reservation.
    pub booking_date: NaiveDate,
    /// Time of day of the reservation.
    pub booking_time: NaiveTime,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Price snapshot taken from the service at creation time.
    pub total_amount: BigDecimal,
    /// Optional free-text notes from the customer.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validation failures raised when constructing a [`Booking`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    /// The snapshot amount is negative.
    #[error("total_amount must not be negative")]
    NegativeAmount,
    /// The notes exceed the persisted column budget.
    #[error("notes must not exceed {limit} characters")]
    NotesTooLong {
        /// Maximum accepted length.
        limit: usize,
    },
}

const NOTES_LIMIT: usize = 1000;

/// One reservation of a service at a specific date and time for a user.
///
/// ## Invariants
/// - `total_amount` is non-negative and immutable after creation.
/// - Status changes go through [`Booking::transition_to`], which enforces the
///   lifecycle graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    id: Uuid,
    user_id: Uuid,
    service_id: Uuid,
    provider_id: Uuid,
    booking_date: NaiveDate,
    booking_time: NaiveTime,
    status: BookingStatus,
    total_amount: BigDecimal,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Booking {
    /// Validate a draft into a booking.
    pub fn new(draft: BookingDraft) -> Result<Self, BookingValidationError> {
        if draft.total_amount < BigDecimal::from(0) {
            return Err(BookingValidationError::NegativeAmount);
        }
        if draft
            .notes
            .as_ref()
            .is_some_and(|notes| notes.chars().count() > NOTES_LIMIT)
        {
            return Err(BookingValidationError::NotesTooLong { limit: NOTES_LIMIT });
        }
        Ok(Self {
            id: draft.id,
            user_id: draft.user_id,
            service_id: draft.service_id,
            provider_id: draft.provider_id,
            booking_date: draft.booking_date,
            booking_time: draft.booking_time,
            status: draft.status,
            total_amount: draft.total_amount,
            notes: draft.notes,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        })
    }

    /// Booking identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Customer who placed the reservation.
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Reserved service.
    pub fn service_id(&self) -> Uuid {
        self.service_id
    }

    /// Provider owning the service at creation time.
    pub fn provider_id(&self) -> Uuid {
        self.provider_id
    }

    /// Calendar date of the reservation.
    pub fn booking_date(&self) -> NaiveDate {
        self.booking_date
    }

    /// Time of day of the reservation.
    pub fn booking_time(&self) -> NaiveTime {
        self.booking_time
    }

    /// Current lifecycle status.
    pub fn status(&self) -> BookingStatus {
        self.status
    }

    /// Price snapshot taken at creation time.
    pub fn total_amount(&self) -> &BigDecimal {
        &self.total_amount
    }

    /// Customer notes, if any.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last update timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply a lifecycle transition, refreshing the update timestamp.
    ///
    /// Returns the rejected pair when the graph forbids the move.
    pub fn transition_to(
        &mut self,
        next: BookingStatus,
        at: DateTime<Utc>,
    ) -> Result<(), IllegalTransition> {
        if !self.status.can_transition_to(next) {
            return Err(IllegalTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = at;
        Ok(())
    }
}

/// A status change rejected by the lifecycle graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot transition booking from {from} to {to}")]
pub struct IllegalTransition {
    /// Status the booking currently holds.
    pub from: BookingStatus,
    /// Status that was requested.
    pub to: BookingStatus,
}

/// Booking joined with catalog and customer display fields for API responses.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetails {
    /// The underlying ledger record.
    pub booking: Booking,
    /// Title of the reserved service.
    pub service_title: String,
    /// Service image reference, if one is set.
    pub service_image: Option<String>,
    /// Customer display name.
    pub user_name: String,
    /// Customer contact number.
    pub user_mobile: String,
    /// Provider business name.
    pub provider_name: String,
}

/// Optional filters applied to booking list queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    /// Restrict to a single status.
    pub status: Option<BookingStatus>,
    /// Earliest booking date, inclusive.
    pub start_date: Option<NaiveDate>,
    /// Latest booking date, inclusive.
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    fn draft() -> BookingDraft {
        let created = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().expect("valid");
        BookingDraft {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            booking_date: NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid"),
            booking_time: NaiveTime::from_hms_opt(14, 0, 0).expect("valid"),
            status: BookingStatus::Pending,
            total_amount: "500.00".parse().expect("valid decimal"),
            notes: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[rstest]
    #[case(BookingStatus::Pending, BookingStatus::Approved, true)]
    #[case(BookingStatus::Pending, BookingStatus::Rejected, true)]
    #[case(BookingStatus::Pending, BookingStatus::Cancelled, true)]
    #[case(BookingStatus::Pending, BookingStatus::PaidDeposit, true)]
    #[case(BookingStatus::Pending, BookingStatus::Completed, false)]
    #[case(BookingStatus::PaidDeposit, BookingStatus::Approved, true)]
    #[case(BookingStatus::PaidDeposit, BookingStatus::Completed, true)]
    #[case(BookingStatus::PaidDeposit, BookingStatus::Rejected, false)]
    #[case(BookingStatus::Approved, BookingStatus::Completed, true)]
    #[case(BookingStatus::Approved, BookingStatus::Cancelled, true)]
    #[case(BookingStatus::Approved, BookingStatus::Pending, false)]
    #[case(BookingStatus::Rejected, BookingStatus::Pending, false)]
    #[case(BookingStatus::Completed, BookingStatus::Cancelled, false)]
    #[case(BookingStatus::Cancelled, BookingStatus::Pending, false)]
    fn transition_graph(
        #[case] from: BookingStatus,
        #[case] to: BookingStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[rstest]
    fn no_transition_reenters_the_active_set() {
        for from in [
            BookingStatus::Rejected,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            for to in ACTIVE_STATUSES {
                assert!(!from.can_transition_to(to), "{from} -> {to} must be rejected");
            }
        }
    }

    #[rstest]
    #[case("pending", BookingStatus::Pending)]
    #[case("paid_deposit", BookingStatus::PaidDeposit)]
    #[case("cancelled", BookingStatus::Cancelled)]
    fn status_round_trips_through_strings(#[case] text: &str, #[case] status: BookingStatus) {
        assert_eq!(text.parse::<BookingStatus>().expect("parses"), status);
        assert_eq!(status.as_str(), text);
    }

    #[rstest]
    fn unknown_status_is_rejected() {
        let error = "paused".parse::<BookingStatus>().expect_err("must fail");
        assert_eq!(error.value, "paused");
    }

    #[rstest]
    fn negative_amount_is_rejected() {
        let mut bad = draft();
        bad.total_amount = "-1.00".parse().expect("valid decimal");
        assert_eq!(
            Booking::new(bad).expect_err("must fail"),
            BookingValidationError::NegativeAmount
        );
    }

    #[rstest]
    fn oversized_notes_are_rejected() {
        let mut bad = draft();
        bad.notes = Some("x".repeat(NOTES_LIMIT + 1));
        assert!(matches!(
            Booking::new(bad).expect_err("must fail"),
            BookingValidationError::NotesTooLong { .. }
        ));
    }

    #[rstest]
    fn transition_refreshes_updated_at() {
        let mut booking = Booking::new(draft()).expect("valid draft");
        let later = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).single().expect("valid");

        booking
            .transition_to(BookingStatus::Approved, later)
            .expect("pending -> approved is legal");

        assert_eq!(booking.status(), BookingStatus::Approved);
        assert_eq!(booking.updated_at(), later);
    }

    #[rstest]
    fn illegal_transition_reports_the_pair() {
        let mut booking = Booking::new(draft()).expect("valid draft");
        let later = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).single().expect("valid");
        booking
            .transition_to(BookingStatus::Cancelled, later)
            .expect("pending -> cancelled is legal");

        let error = booking
            .transition_to(BookingStatus::Approved, later)
            .expect_err("cancelled is terminal");
        assert_eq!(error.from, BookingStatus::Cancelled);
        assert_eq!(error.to, BookingStatus::Approved);
    }
}
