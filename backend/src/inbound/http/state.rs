//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data`, so they depend
//! only on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AvailabilityQuery, BookingCommand, BookingQuery, ReportingQuery, VerificationAdmin,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Booking mutations.
    pub bookings: Arc<dyn BookingCommand>,
    /// Booking reads.
    pub booking_queries: Arc<dyn BookingQuery>,
    /// Slot availability listing.
    pub availability: Arc<dyn AvailabilityQuery>,
    /// Aggregation reporters.
    pub reporting: Arc<dyn ReportingQuery>,
    /// Provider verification administration.
    pub verification: Arc<dyn VerificationAdmin>,
}
