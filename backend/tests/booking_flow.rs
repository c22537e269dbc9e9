//! End-to-end booking flow over the in-memory adapters.
//!
//! The in-memory store gives the same atomic slot-conflict guarantee as the
//! PostgreSQL partial unique index, so these tests exercise the reservation
//! invariant, the lifecycle, and the availability listing together.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use futures::future::join_all;
use rstest::{fixture, rstest};
use uuid::Uuid;

use backend::domain::ports::{
    AvailabilityQuery, BookingCommand, BookingQuery, CreateBookingRequest,
};
use backend::domain::{
    AvailabilityService, BookingService, BookingStatus, ErrorCode, Provider, Service,
    VerificationStatus,
};
use backend::test_support::{FixedClock, InMemoryMarketplace};

const USER_ID: Uuid = Uuid::from_u128(0x1001);
const PROVIDER_ID: Uuid = Uuid::from_u128(0x2001);
const SERVICE_ID: Uuid = Uuid::from_u128(0x3001);

fn noon_march_first() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().expect("valid instant")
}

fn tomorrow() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

fn two_pm() -> NaiveTime {
    NaiveTime::from_hms_opt(14, 0, 0).expect("valid time")
}

struct Harness {
    store: Arc<InMemoryMarketplace>,
    bookings: BookingService<InMemoryMarketplace, InMemoryMarketplace>,
    availability: AvailabilityService<InMemoryMarketplace>,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryMarketplace::new());
    store.seed_user(USER_ID, "Asha", "07700900000");
    store.seed_provider(Provider {
        id: PROVIDER_ID,
        business_name: "Sparkle Ltd".to_owned(),
        verification_status: VerificationStatus::Approved,
    });
    store.seed_service(Service {
        id: SERVICE_ID,
        provider_id: PROVIDER_ID,
        title: "Deep cleaning".to_owned(),
        image: None,
        price: "500.00".parse().expect("valid decimal"),
        active: true,
    });

    let clock = Arc::new(FixedClock(noon_march_first()));
    Harness {
        store: store.clone(),
        bookings: BookingService::new(store.clone(), store.clone(), clock.clone()),
        availability: AvailabilityService::new(store, clock),
    }
}

fn slot_request() -> CreateBookingRequest {
    CreateBookingRequest {
        user_id: USER_ID,
        service_id: SERVICE_ID,
        booking_date: tomorrow(),
        booking_time: two_pm(),
        notes: Some("ring the bell twice".to_owned()),
    }
}

#[rstest]
#[tokio::test]
async fn reservation_scenario_end_to_end(harness: Harness) {
    // Create: snapshot price, pending status.
    let created = harness
        .bookings
        .create_booking(slot_request())
        .await
        .expect("first reservation succeeds");
    assert_eq!(created.booking.status(), BookingStatus::Pending);
    assert_eq!(created.booking.total_amount().to_string(), "500.00");
    assert_eq!(created.booking.provider_id(), PROVIDER_ID);
    assert_eq!(created.service_title, "Deep cleaning");

    // Same slot again: conflict.
    let conflict = harness
        .bookings
        .create_booking(slot_request())
        .await
        .expect_err("second reservation must conflict");
    assert_eq!(conflict.code(), ErrorCode::Conflict);

    // Approve the booking.
    let update = harness
        .bookings
        .update_status(created.booking.id(), BookingStatus::Approved)
        .await
        .expect("pending -> approved is legal");
    assert_eq!(update.status, BookingStatus::Approved);

    // The 14:00 slot is listed as unavailable.
    let slots = harness
        .availability
        .day_availability(SERVICE_ID, tomorrow())
        .await
        .expect("listing succeeds");
    assert_eq!(slots.len(), 24);
    let fourteen = slots
        .iter()
        .find(|slot| slot.time == two_pm())
        .expect("14:00 in the grid");
    assert!(!fourteen.available);
    assert_eq!(slots.iter().filter(|slot| !slot.available).count(), 1);
}

#[rstest]
#[tokio::test]
async fn concurrent_creations_admit_exactly_one(harness: Harness) {
    const ATTEMPTS: usize = 8;

    let service = Arc::new(harness.bookings);
    let attempts = (0..ATTEMPTS).map(|_| {
        let service = service.clone();
        tokio::spawn(async move { service.create_booking(slot_request()).await })
    });

    let outcomes = join_all(attempts).await;
    let mut successes = 0;
    let mut conflicts = 0;
    for outcome in outcomes {
        match outcome.expect("task not cancelled") {
            Ok(_) => successes += 1,
            Err(error) => {
                assert_eq!(error.code(), ErrorCode::Conflict);
                conflicts += 1;
            }
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(conflicts, ATTEMPTS - 1);
    assert_eq!(harness.store.booking_count(), 1);
}

#[rstest]
#[tokio::test]
async fn create_then_get_round_trips_the_fields(harness: Harness) {
    let created = harness
        .bookings
        .create_booking(slot_request())
        .await
        .expect("reservation succeeds");

    let fetched = harness
        .bookings
        .get_booking(created.booking.id())
        .await
        .expect("lookup succeeds");

    assert_eq!(fetched.booking.user_id(), USER_ID);
    assert_eq!(fetched.booking.service_id(), SERVICE_ID);
    assert_eq!(fetched.booking.booking_date(), tomorrow());
    assert_eq!(fetched.booking.booking_time(), two_pm());
    assert_eq!(fetched.booking.notes(), Some("ring the bell twice"));
    assert_eq!(fetched.booking.status(), BookingStatus::Pending);
    assert_eq!(fetched.user_name, "Asha");
    assert_eq!(fetched.provider_name, "Sparkle Ltd");
}

#[rstest]
#[tokio::test]
async fn cancelling_releases_the_slot(harness: Harness) {
    let created = harness
        .bookings
        .create_booking(slot_request())
        .await
        .expect("reservation succeeds");

    harness
        .bookings
        .update_status(created.booking.id(), BookingStatus::Cancelled)
        .await
        .expect("pending -> cancelled is legal");

    // The slot shows as free again and can be reserved anew.
    let slots = harness
        .availability
        .day_availability(SERVICE_ID, tomorrow())
        .await
        .expect("listing succeeds");
    let fourteen = slots
        .iter()
        .find(|slot| slot.time == two_pm())
        .expect("14:00 in the grid");
    assert!(fourteen.available);

    harness
        .bookings
        .create_booking(slot_request())
        .await
        .expect("released slot can be reserved again");
    assert_eq!(harness.store.booking_count(), 2);
}

#[rstest]
#[tokio::test]
async fn availability_listing_does_not_mutate_the_ledger(harness: Harness) {
    harness
        .bookings
        .create_booking(slot_request())
        .await
        .expect("reservation succeeds");

    for _ in 0..3 {
        harness
            .availability
            .day_availability(SERVICE_ID, tomorrow())
            .await
            .expect("listing succeeds");
    }

    assert_eq!(harness.store.booking_count(), 1);
}

#[rstest]
#[tokio::test]
async fn provider_listing_orders_most_recent_slot_first(harness: Harness) {
    for (day, hour) in [(3, 9), (2, 14), (3, 16)] {
        let request = CreateBookingRequest {
            user_id: USER_ID,
            service_id: SERVICE_ID,
            booking_date: NaiveDate::from_ymd_opt(2026, 3, day).expect("valid date"),
            booking_time: NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time"),
            notes: None,
        };
        harness
            .bookings
            .create_booking(request)
            .await
            .expect("reservation succeeds");
    }

    let listed = harness
        .bookings
        .list_provider_bookings(PROVIDER_ID, Default::default())
        .await
        .expect("listing succeeds");

    let order: Vec<_> = listed
        .iter()
        .map(|details| {
            (
                details.booking.booking_date().day(),
                details.booking.booking_time().hour(),
            )
        })
        .collect();
    assert_eq!(order, vec![(3, 16), (3, 9), (2, 14)]);
}
