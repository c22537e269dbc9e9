//! Server wiring: configuration and dependency assembly.

pub mod config;

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::{
    AvailabilityService, BookingService, ReportingService, VerificationService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    DieselBookingRepository, DieselCatalogueRepository, DieselReportingRepository, PgPool,
};

pub use config::AppSettings;

/// Assemble the HTTP dependency bundle over Diesel adapters.
pub fn build_http_state(pool: PgPool) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let booking_repo = Arc::new(DieselBookingRepository::new(pool.clone()));
    let catalogue_repo = Arc::new(DieselCatalogueRepository::new(pool.clone()));
    let reporting_repo = Arc::new(DieselReportingRepository::new(pool));

    let bookings = Arc::new(BookingService::new(
        booking_repo.clone(),
        catalogue_repo.clone(),
        clock.clone(),
    ));

    HttpState {
        bookings: bookings.clone(),
        booking_queries: bookings,
        availability: Arc::new(AvailabilityService::new(booking_repo, clock.clone())),
        reporting: Arc::new(ReportingService::new(reporting_repo, clock.clone())),
        verification: Arc::new(VerificationService::new(catalogue_repo, clock)),
    }
}
