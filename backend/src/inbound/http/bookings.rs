//! Booking HTTP handlers.
//!
//! ```text
//! POST /api/v1/bookings                              Reserve a slot
//! GET  /api/v1/bookings/{booking_id}                 Booking details
//! PUT  /api/v1/bookings/{booking_id}/status          Lifecycle transition
//! GET  /api/v1/bookings/timeslots                    Day availability
//! GET  /api/v1/providers/{provider_id}/bookings      Provider listing
//! GET  /api/v1/users/{user_id}/bookings              Customer listing
//! ```

use actix_web::{get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::CreateBookingRequest;
use crate::domain::{BookingDetails, BookingFilter, BookingStatus, Error};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    parse_booking_status, parse_date, parse_time, parse_uuid, require, FieldName, DATE_FORMAT,
    TIME_FORMAT,
};
use crate::inbound::http::ApiResult;

/// Request payload for creating a booking.
///
/// Fields are optional at the serde level so absence surfaces as a structured
/// validation error rather than a deserialisation failure.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateBookingRequestBody {
    /// Customer identifier.
    pub user_id: Option<String>,
    /// Service identifier.
    pub service_id: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    pub booking_date: Option<String>,
    /// Time of day, `HH:MM`.
    pub booking_time: Option<String>,
    /// Optional free-text notes.
    pub booking_notes: Option<String>,
}

/// A booking joined with display fields.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingRecordBody {
    /// Booking identifier.
    pub id: Uuid,
    /// Customer identifier.
    pub user_id: Uuid,
    /// Service identifier.
    pub service_id: Uuid,
    /// Provider identifier.
    pub provider_id: Uuid,
    /// Calendar date, `YYYY-MM-DD`.
    pub booking_date: String,
    /// Time of day, `HH:MM`.
    pub booking_time: String,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Price snapshot taken at creation.
    pub total_amount: String,
    /// Customer notes, if any.
    pub booking_notes: Option<String>,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last update timestamp, RFC 3339.
    pub updated_at: String,
    /// Service title.
    pub service_title: String,
    /// Service image reference, if any.
    pub service_image: Option<String>,
    /// Customer display name.
    pub user_name: String,
    /// Customer contact number.
    pub user_mobile: String,
    /// Provider business name.
    pub provider_name: String,
}

impl From<BookingDetails> for BookingRecordBody {
    fn from(details: BookingDetails) -> Self {
        let booking = &details.booking;
        Self {
            id: booking.id(),
            user_id: booking.user_id(),
            service_id: booking.service_id(),
            provider_id: booking.provider_id(),
            booking_date: booking.booking_date().format(DATE_FORMAT).to_string(),
            booking_time: booking.booking_time().format(TIME_FORMAT).to_string(),
            status: booking.status(),
            total_amount: booking.total_amount().to_string(),
            booking_notes: booking.notes().map(ToOwned::to_owned),
            created_at: booking.created_at().to_rfc3339(),
            updated_at: booking.updated_at().to_rfc3339(),
            service_title: details.service_title,
            service_image: details.service_image,
            user_name: details.user_name,
            user_mobile: details.user_mobile,
            provider_name: details.provider_name,
        }
    }
}

/// Listing envelope with a total count.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingListBody {
    /// Number of bookings in the listing.
    pub total_bookings: usize,
    /// The bookings, most recent slot first.
    pub bookings: Vec<BookingRecordBody>,
}

impl From<Vec<BookingDetails>> for BookingListBody {
    fn from(listed: Vec<BookingDetails>) -> Self {
        let bookings: Vec<BookingRecordBody> =
            listed.into_iter().map(BookingRecordBody::from).collect();
        Self {
            total_bookings: bookings.len(),
            bookings,
        }
    }
}

/// Request payload for a status transition.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateStatusRequestBody {
    /// Requested status value.
    pub status: Option<String>,
}

/// Response payload for a status transition.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UpdateStatusResponseBody {
    /// The updated booking.
    pub booking_id: Uuid,
    /// Status now held by the booking.
    pub status: BookingStatus,
}

/// Filters accepted by the provider booking listing.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct ProviderBookingsQuery {
    /// Restrict to a single status.
    pub status: Option<String>,
    /// Earliest booking date, inclusive, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Latest booking date, inclusive, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

/// Filters accepted by the customer booking listing.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct UserBookingsQuery {
    /// Restrict to a single status.
    pub status: Option<String>,
}

/// Query parameters for the availability listing.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct TimeSlotsQuery {
    /// Service identifier.
    pub service_id: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: Option<String>,
}

/// One candidate slot in the availability listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TimeSlotBody {
    /// Slot start, `HH:MM`.
    pub time: String,
    /// Whether the slot is free.
    pub available: bool,
}

/// Availability listing for one service and date.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TimeSlotsBody {
    /// The requested date, `YYYY-MM-DD`.
    pub date: String,
    /// The requested service.
    pub service_id: Uuid,
    /// Ordered candidate slots.
    pub time_slots: Vec<TimeSlotBody>,
}

fn parse_create_request(body: CreateBookingRequestBody) -> Result<CreateBookingRequest, Error> {
    let user_id = require(body.user_id, FieldName::new("user_id"))?;
    let service_id = require(body.service_id, FieldName::new("service_id"))?;
    let booking_date = require(body.booking_date, FieldName::new("booking_date"))?;
    let booking_time = require(body.booking_time, FieldName::new("booking_time"))?;

    Ok(CreateBookingRequest {
        user_id: parse_uuid(&user_id, FieldName::new("user_id"))?,
        service_id: parse_uuid(&service_id, FieldName::new("service_id"))?,
        booking_date: parse_date(&booking_date, FieldName::new("booking_date"))?,
        booking_time: parse_time(&booking_time, FieldName::new("booking_time"))?,
        notes: body.booking_notes,
    })
}

fn parse_provider_filter(query: ProviderBookingsQuery) -> Result<BookingFilter, Error> {
    Ok(BookingFilter {
        status: query
            .status
            .as_deref()
            .map(|value| parse_booking_status(value, FieldName::new("status")))
            .transpose()?,
        start_date: query
            .start_date
            .as_deref()
            .map(|value| parse_date(value, FieldName::new("start_date")))
            .transpose()?,
        end_date: query
            .end_date
            .as_deref()
            .map(|value| parse_date(value, FieldName::new("end_date")))
            .transpose()?,
    })
}

/// Reserve a slot for a customer.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingRequestBody,
    responses(
        (status = 201, description = "Booking created", body = BookingRecordBody),
        (status = 400, description = "Validation or past-date failure"),
        (status = 404, description = "Unknown service"),
        (status = 409, description = "Slot already reserved")
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    payload: web::Json<CreateBookingRequestBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create_request(payload.into_inner())?;
    let created = state.bookings.create_booking(request).await?;
    Ok(HttpResponse::Created().json(BookingRecordBody::from(created)))
}

/// Fetch one booking with display fields.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{booking_id}",
    params(("booking_id" = Uuid, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking details", body = BookingRecordBody),
        (status = 404, description = "Unknown booking")
    ),
    tags = ["bookings"],
    operation_id = "getBooking"
)]
#[get("/bookings/{booking_id}")]
pub async fn get_booking(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<BookingRecordBody>> {
    let details = state.booking_queries.get_booking(path.into_inner()).await?;
    Ok(web::Json(BookingRecordBody::from(details)))
}

/// Transition a booking to a new lifecycle status.
#[utoipa::path(
    put,
    path = "/api/v1/bookings/{booking_id}/status",
    params(("booking_id" = Uuid, Path, description = "Booking identifier")),
    request_body = UpdateStatusRequestBody,
    responses(
        (status = 200, description = "Status updated", body = UpdateStatusResponseBody),
        (status = 400, description = "Unknown status or illegal transition"),
        (status = 404, description = "Unknown booking")
    ),
    tags = ["bookings"],
    operation_id = "updateBookingStatus"
)]
#[put("/bookings/{booking_id}/status")]
pub async fn update_booking_status(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateStatusRequestBody>,
) -> ApiResult<web::Json<UpdateStatusResponseBody>> {
    let raw = require(payload.into_inner().status, FieldName::new("status"))?;
    let status = parse_booking_status(&raw, FieldName::new("status"))?;

    let update = state
        .bookings
        .update_status(path.into_inner(), status)
        .await?;

    Ok(web::Json(UpdateStatusResponseBody {
        booking_id: update.booking_id,
        status: update.status,
    }))
}

/// List a provider's bookings, most recent slot first.
#[utoipa::path(
    get,
    path = "/api/v1/providers/{provider_id}/bookings",
    params(
        ("provider_id" = Uuid, Path, description = "Provider identifier"),
        ProviderBookingsQuery
    ),
    responses(
        (status = 200, description = "Bookings listed", body = BookingListBody),
        (status = 400, description = "Invalid filter")
    ),
    tags = ["bookings"],
    operation_id = "listProviderBookings"
)]
#[get("/providers/{provider_id}/bookings")]
pub async fn provider_bookings(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    query: web::Query<ProviderBookingsQuery>,
) -> ApiResult<web::Json<BookingListBody>> {
    let filter = parse_provider_filter(query.into_inner())?;
    let listed = state
        .booking_queries
        .list_provider_bookings(path.into_inner(), filter)
        .await?;
    Ok(web::Json(BookingListBody::from(listed)))
}

/// List a customer's bookings, most recent slot first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/bookings",
    params(
        ("user_id" = Uuid, Path, description = "Customer identifier"),
        UserBookingsQuery
    ),
    responses(
        (status = 200, description = "Bookings listed", body = BookingListBody),
        (status = 400, description = "Invalid filter")
    ),
    tags = ["bookings"],
    operation_id = "listUserBookings"
)]
#[get("/users/{user_id}/bookings")]
pub async fn user_bookings(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    query: web::Query<UserBookingsQuery>,
) -> ApiResult<web::Json<BookingListBody>> {
    let filter = BookingFilter {
        status: query
            .into_inner()
            .status
            .as_deref()
            .map(|value| parse_booking_status(value, FieldName::new("status")))
            .transpose()?,
        ..BookingFilter::default()
    };
    let listed = state
        .booking_queries
        .list_user_bookings(path.into_inner(), filter)
        .await?;
    Ok(web::Json(BookingListBody::from(listed)))
}

/// List bookable slots for a service on a date.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/timeslots",
    params(TimeSlotsQuery),
    responses(
        (status = 200, description = "Slot listing", body = TimeSlotsBody),
        (status = 400, description = "Missing parameters or invalid/past date")
    ),
    tags = ["bookings"],
    operation_id = "listTimeSlots"
)]
#[get("/bookings/timeslots")]
pub async fn timeslots(
    state: web::Data<HttpState>,
    query: web::Query<TimeSlotsQuery>,
) -> ApiResult<web::Json<TimeSlotsBody>> {
    let query = query.into_inner();
    let service_id = require(query.service_id, FieldName::new("service_id"))
        .and_then(|raw| parse_uuid(&raw, FieldName::new("service_id")))?;
    let date = require(query.date, FieldName::new("date"))
        .and_then(|raw| parse_date(&raw, FieldName::new("date")))?;

    let slots = state.availability.day_availability(service_id, date).await?;

    Ok(web::Json(TimeSlotsBody {
        date: date.format(DATE_FORMAT).to_string(),
        service_id,
        time_slots: slots
            .into_iter()
            .map(|slot| TimeSlotBody {
                time: slot.time.format(TIME_FORMAT).to_string(),
                available: slot.available,
            })
            .collect(),
    }))
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;
