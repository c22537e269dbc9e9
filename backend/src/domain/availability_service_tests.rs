//! Behaviour tests for the availability service.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use rstest::rstest;
use uuid::Uuid;

use super::*;
use crate::domain::ports::MockBookingRepository;
use crate::domain::{ErrorCode, SLOTS_PER_DAY};
use crate::test_support::FixedClock;

fn noon() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().expect("valid instant")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn time(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).expect("valid time")
}

fn build_service(ledger: MockBookingRepository) -> AvailabilityService<MockBookingRepository> {
    AvailabilityService::new(Arc::new(ledger), Arc::new(FixedClock(noon())))
}

#[rstest]
#[tokio::test]
async fn tomorrow_lists_the_full_grid_with_booked_slots_flagged() {
    let mut ledger = MockBookingRepository::new();
    ledger
        .expect_booked_times()
        .returning(|_, _| Ok(vec![time(14)]));

    let slots = build_service(ledger)
        .day_availability(Uuid::new_v4(), date(2026, 3, 2))
        .await
        .expect("listing succeeds");

    assert_eq!(slots.len() as u32, SLOTS_PER_DAY);
    let unavailable: Vec<_> = slots.iter().filter(|s| !s.available).collect();
    assert_eq!(unavailable.len(), 1);
    assert_eq!(unavailable.first().map(|s| s.time), Some(time(14)));
}

#[rstest]
#[tokio::test]
async fn today_omits_elapsed_slots() {
    let mut ledger = MockBookingRepository::new();
    ledger.expect_booked_times().returning(|_, _| Ok(Vec::new()));

    let slots = build_service(ledger)
        .day_availability(Uuid::new_v4(), date(2026, 3, 1))
        .await
        .expect("listing succeeds");

    // At noon the 13:00..23:00 candidates remain.
    assert_eq!(slots.len(), 11);
    assert_eq!(slots.first().map(|s| s.time), Some(time(13)));
}

#[rstest]
#[tokio::test]
async fn past_dates_are_rejected_without_touching_the_ledger() {
    let error = build_service(MockBookingRepository::new())
        .day_availability(Uuid::new_v4(), date(2026, 2, 28))
        .await
        .expect_err("yesterday must fail");

    assert_eq!(error.code(), ErrorCode::PastDate);
}

#[rstest]
#[tokio::test]
async fn ledger_connection_failures_surface_as_unavailable() {
    let mut ledger = MockBookingRepository::new();
    ledger
        .expect_booked_times()
        .returning(|_, _| Err(BookingRepositoryError::connection("refused")));

    let error = build_service(ledger)
        .day_availability(Uuid::new_v4(), date(2026, 3, 2))
        .await
        .expect_err("connection failure must surface");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
