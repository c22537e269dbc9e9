//! Behaviour tests for the booking command and query services.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockBookingRepository, MockCatalogueRepository};
use crate::domain::{ErrorCode, Service};
use crate::test_support::FixedClock;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 14, 0, 0).single().expect("valid instant")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

#[fixture]
fn service() -> Service {
    Service {
        id: Uuid::new_v4(),
        provider_id: Uuid::new_v4(),
        title: "Deep cleaning".to_owned(),
        image: None,
        price: "500.00".parse().expect("valid decimal"),
        active: true,
    }
}

fn request_for(service: &Service) -> CreateBookingRequest {
    CreateBookingRequest {
        user_id: Uuid::new_v4(),
        service_id: service.id,
        booking_date: date(2026, 3, 2),
        booking_time: time(14, 0),
        notes: Some("ring the bell twice".to_owned()),
    }
}

fn build_service(
    ledger: MockBookingRepository,
    catalogue: MockCatalogueRepository,
) -> BookingService<MockBookingRepository, MockCatalogueRepository> {
    BookingService::new(
        Arc::new(ledger),
        Arc::new(catalogue),
        Arc::new(FixedClock(now())),
    )
}

#[rstest]
#[tokio::test]
async fn create_snapshots_price_and_starts_pending(service: Service) {
    let request = request_for(&service);
    let expected_provider = service.provider_id;
    let expected_price = service.price.clone();

    let mut catalogue = MockCatalogueRepository::new();
    let found = service.clone();
    catalogue
        .expect_find_service()
        .returning(move |_| Ok(Some(found.clone())));

    let mut ledger = MockBookingRepository::new();
    ledger
        .expect_insert()
        .withf(move |booking| {
            booking.status() == BookingStatus::Pending
                && *booking.total_amount() == expected_price
                && booking.provider_id() == expected_provider
        })
        .returning(|_| Ok(()));
    ledger
        .expect_find_details()
        .returning(|id| {
            let booking = Booking::new(BookingDraft {
                id,
                user_id: Uuid::new_v4(),
                service_id: Uuid::new_v4(),
                provider_id: Uuid::new_v4(),
                booking_date: NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
                booking_time: NaiveTime::from_hms_opt(14, 0, 0).expect("valid time"),
                status: BookingStatus::Pending,
                total_amount: "500.00".parse().expect("valid decimal"),
                notes: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .expect("valid booking");
            Ok(Some(BookingDetails {
                booking: booking.clone(),
                service_title: "Deep cleaning".to_owned(),
                service_image: None,
                user_name: "Asha".to_owned(),
                user_mobile: "07700900000".to_owned(),
                provider_name: "Sparkle Ltd".to_owned(),
            }))
        });

    let created = build_service(ledger, catalogue)
        .create_booking(request)
        .await
        .expect("creation succeeds");

    assert_eq!(created.booking.status(), BookingStatus::Pending);
    assert_eq!(created.provider_name, "Sparkle Ltd");
}

#[rstest]
#[tokio::test]
async fn create_rejects_past_dates(service: Service) {
    let mut request = request_for(&service);
    request.booking_date = date(2026, 2, 28);

    let error = build_service(MockBookingRepository::new(), MockCatalogueRepository::new())
        .create_booking(request)
        .await
        .expect_err("yesterday must fail");

    assert_eq!(error.code(), ErrorCode::PastDate);
    assert!(error.message().contains("past dates"));
}

#[rstest]
#[case(time(14, 0), false)]
#[case(time(14, 1), true)]
#[tokio::test]
async fn create_boundary_at_current_minute(
    service: Service,
    #[case] at: NaiveTime,
    #[case] accepted: bool,
) {
    // The clock reads exactly 14:00:00; a slot at the current minute has
    // already started, one minute later has not.
    let mut request = request_for(&service);
    request.booking_date = date(2026, 3, 1);
    request.booking_time = at;

    let mut catalogue = MockCatalogueRepository::new();
    let mut ledger = MockBookingRepository::new();
    if accepted {
        let found = service.clone();
        catalogue
            .expect_find_service()
            .returning(move |_| Ok(Some(found.clone())));
        ledger.expect_insert().returning(|_| Ok(()));
        ledger.expect_find_details().returning(|id| {
            let booking = Booking::new(BookingDraft {
                id,
                user_id: Uuid::new_v4(),
                service_id: Uuid::new_v4(),
                provider_id: Uuid::new_v4(),
                booking_date: NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date"),
                booking_time: NaiveTime::from_hms_opt(14, 1, 0).expect("valid time"),
                status: BookingStatus::Pending,
                total_amount: "500.00".parse().expect("valid decimal"),
                notes: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .expect("valid booking");
            let details = BookingDetails {
                booking: booking.clone(),
                service_title: "Deep cleaning".to_owned(),
                service_image: None,
                user_name: "Asha".to_owned(),
                user_mobile: "07700900000".to_owned(),
                provider_name: "Sparkle Ltd".to_owned(),
            };
            Ok(Some(details))
        });
    }

    let result = build_service(ledger, catalogue).create_booking(request).await;

    if accepted {
        result.expect("one minute ahead succeeds");
    } else {
        let error = result.expect_err("current minute must fail");
        assert_eq!(error.code(), ErrorCode::PastDate);
        assert!(error.message().contains("past time slots"));
    }
}

#[rstest]
#[tokio::test]
async fn create_rejects_unknown_service(service: Service) {
    let request = request_for(&service);

    let mut catalogue = MockCatalogueRepository::new();
    catalogue.expect_find_service().returning(|_| Ok(None));

    let error = build_service(MockBookingRepository::new(), catalogue)
        .create_booking(request)
        .await
        .expect_err("unknown service must fail");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_surfaces_slot_conflicts(service: Service) {
    let request = request_for(&service);

    let mut catalogue = MockCatalogueRepository::new();
    let found = service.clone();
    catalogue
        .expect_find_service()
        .returning(move |_| Ok(Some(found.clone())));

    let mut ledger = MockBookingRepository::new();
    ledger
        .expect_insert()
        .returning(|_| Err(BookingRepositoryError::SlotTaken));

    let error = build_service(ledger, catalogue)
        .create_booking(request)
        .await
        .expect_err("held slot must fail");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn create_maps_connection_failures(service: Service) {
    let request = request_for(&service);

    let mut catalogue = MockCatalogueRepository::new();
    catalogue
        .expect_find_service()
        .returning(|_| Err(CatalogueRepositoryError::connection("refused")));

    let error = build_service(MockBookingRepository::new(), catalogue)
        .create_booking(request)
        .await
        .expect_err("connection failure must surface");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn update_applies_legal_transition() {
    let booking_id = Uuid::new_v4();

    let mut ledger = MockBookingRepository::new();
    ledger
        .expect_find_status()
        .returning(|_| Ok(Some(BookingStatus::Pending)));
    ledger
        .expect_set_status()
        .withf(|_, status, _| *status == BookingStatus::Approved)
        .returning(|_, _, _| Ok(true));

    let update = build_service(ledger, MockCatalogueRepository::new())
        .update_status(booking_id, BookingStatus::Approved)
        .await
        .expect("pending -> approved is legal");

    assert_eq!(update.booking_id, booking_id);
    assert_eq!(update.status, BookingStatus::Approved);
}

#[rstest]
#[tokio::test]
async fn update_rejects_illegal_transition() {
    let mut ledger = MockBookingRepository::new();
    ledger
        .expect_find_status()
        .returning(|_| Ok(Some(BookingStatus::Completed)));

    let error = build_service(ledger, MockCatalogueRepository::new())
        .update_status(Uuid::new_v4(), BookingStatus::Approved)
        .await
        .expect_err("completed is terminal");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("transition details attached");
    assert_eq!(details["from"], "completed");
    assert_eq!(details["to"], "approved");
}

#[rstest]
#[tokio::test]
async fn update_rejects_unknown_booking() {
    let mut ledger = MockBookingRepository::new();
    ledger.expect_find_status().returning(|_| Ok(None));

    let error = build_service(ledger, MockCatalogueRepository::new())
        .update_status(Uuid::new_v4(), BookingStatus::Approved)
        .await
        .expect_err("unknown booking must fail");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn get_booking_maps_missing_to_not_found() {
    let mut ledger = MockBookingRepository::new();
    ledger.expect_find_details().returning(|_| Ok(None));

    let error = build_service(ledger, MockCatalogueRepository::new())
        .get_booking(Uuid::new_v4())
        .await
        .expect_err("unknown booking must fail");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_queries_pass_filters_through() {
    let provider_id = Uuid::new_v4();
    let filter = BookingFilter {
        status: Some(BookingStatus::Approved),
        start_date: Some(date(2026, 3, 1)),
        end_date: Some(date(2026, 3, 31)),
    };
    let expected = filter.clone();

    let mut ledger = MockBookingRepository::new();
    ledger
        .expect_list_for_provider()
        .withf(move |id, got| *id == provider_id && *got == expected)
        .returning(|_, _| Ok(Vec::new()));

    let listed = build_service(ledger, MockCatalogueRepository::new())
        .list_provider_bookings(provider_id, filter)
        .await
        .expect("listing succeeds");

    assert!(listed.is_empty());
}
