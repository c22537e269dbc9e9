//! Domain ports: driving use-case traits and driven repository traits.
//!
//! Driving ports are implemented by domain services and consumed by inbound
//! adapters; driven ports are implemented by outbound adapters (Diesel, or
//! in-memory stand-ins under the `test-support` feature).

mod availability_query;
mod booking_command;
mod booking_query;
mod booking_repository;
mod catalogue_repository;
mod reporting_query;
mod reporting_repository;
mod verification_admin;

pub use availability_query::AvailabilityQuery;
pub use booking_command::{BookingCommand, CreateBookingRequest, StatusUpdate};
pub use booking_query::BookingQuery;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
pub use catalogue_repository::{CatalogueRepository, CatalogueRepositoryError};
pub use reporting_query::ReportingQuery;
pub use reporting_repository::{
    RatingCount, ReportingRepository, ReportingRepositoryError, TopProviderRow,
};
pub use verification_admin::VerificationAdmin;

#[cfg(test)]
pub use availability_query::MockAvailabilityQuery;
#[cfg(test)]
pub use booking_command::MockBookingCommand;
#[cfg(test)]
pub use booking_query::MockBookingQuery;
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
#[cfg(test)]
pub use catalogue_repository::MockCatalogueRepository;
#[cfg(test)]
pub use reporting_query::MockReportingQuery;
#[cfg(test)]
pub use reporting_repository::MockReportingRepository;
#[cfg(test)]
pub use verification_admin::MockVerificationAdmin;
