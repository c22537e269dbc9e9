//! PostgreSQL persistence adapters built on Diesel and diesel-async.

pub mod models;
pub mod pool;
pub mod schema;

mod diesel_booking_repository;
mod diesel_catalogue_repository;
mod diesel_reporting_repository;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_catalogue_repository::DieselCatalogueRepository;
pub use diesel_reporting_repository::DieselReportingRepository;
pub use pool::{build_pool, PgPool, PoolBuildError};
