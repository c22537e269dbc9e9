//! Domain layer: entities, validation, services, and ports.
//!
//! Everything here is transport and storage agnostic. Inbound adapters map
//! [`Error`] to HTTP envelopes; outbound adapters implement the driven ports
//! under [`ports`].

pub mod ports;

mod availability_service;
mod booking;
mod booking_service;
mod catalogue;
mod error;
mod reporting;
mod reporting_service;
pub mod slots;
mod verification_service;

pub use availability_service::AvailabilityService;
pub use booking::{
    Booking, BookingDetails, BookingDraft, BookingFilter, BookingStatus, BookingValidationError,
    IllegalTransition, ParseBookingStatusError, ACTIVE_STATUSES,
};
pub use booking_service::BookingService;
pub use catalogue::{
    ParseVerificationStatusError, Provider, Service, VerificationCounts, VerificationStatus,
};
pub use error::{Error, ErrorCode};
pub use reporting::{
    DashboardStats, LatestReview, MonthlyCompletedCount, ProviderRatingSummary, RatingBucket,
    ServiceRatingStats, TopProvider,
};
pub use reporting_service::ReportingService;
pub use slots::{SlotAvailability, SLOTS_PER_DAY};
pub use verification_service::VerificationService;
