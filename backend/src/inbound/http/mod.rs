//! HTTP inbound adapter: handlers, DTOs, and route registration.

pub mod bookings;
pub mod error;
pub mod health;
pub mod reporting;
pub mod state;
pub mod validation;
pub mod verification;

pub use error::ApiError;

/// Convenience alias for HTTP handler results.
pub type ApiResult<T> = Result<T, ApiError>;

/// Register every `/api/v1` route on the given service config.
///
/// `timeslots` and the other literal segments are registered before the
/// parameterised booking route so they match first.
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(
        actix_web::web::scope("/api/v1")
            .service(bookings::timeslots)
            .service(bookings::create_booking)
            .service(bookings::update_booking_status)
            .service(reporting::monthly_completed)
            .service(bookings::get_booking)
            .service(bookings::provider_bookings)
            .service(bookings::user_bookings)
            .service(reporting::provider_rating)
            .service(reporting::service_rating_stats)
            .service(reporting::dashboard_stats)
            .service(reporting::top_providers)
            .service(reporting::latest_reviews)
            .service(verification::verification_status)
            .service(verification::verify_provider)
            .service(verification::verification_counts),
    );
}
