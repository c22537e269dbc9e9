//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every annotated HTTP path. Swagger UI serves the
//! generated document in debug builds.

use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketplace backend API",
        description = "Booking ledger, slot availability, and reporting endpoints \
                       for the home-services marketplace."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::get_booking,
        crate::inbound::http::bookings::update_booking_status,
        crate::inbound::http::bookings::provider_bookings,
        crate::inbound::http::bookings::user_bookings,
        crate::inbound::http::bookings::timeslots,
        crate::inbound::http::reporting::provider_rating,
        crate::inbound::http::reporting::service_rating_stats,
        crate::inbound::http::reporting::dashboard_stats,
        crate::inbound::http::reporting::monthly_completed,
        crate::inbound::http::reporting::top_providers,
        crate::inbound::http::reporting::latest_reviews,
        crate::inbound::http::verification::verification_status,
        crate::inbound::http::verification::verify_provider,
        crate::inbound::http::verification::verification_counts,
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
    )
)]
pub struct ApiDoc;
