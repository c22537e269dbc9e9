//! Behaviour tests for the verification service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::rstest;
use uuid::Uuid;

use super::*;
use crate::domain::ports::MockCatalogueRepository;
use crate::domain::{ErrorCode, Provider};
use crate::test_support::FixedClock;

fn build_service(catalogue: MockCatalogueRepository) -> VerificationService<MockCatalogueRepository> {
    let clock = FixedClock(
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().expect("valid instant"),
    );
    VerificationService::new(Arc::new(catalogue), Arc::new(clock))
}

#[rstest]
#[tokio::test]
async fn status_reads_the_provider_record() {
    let mut catalogue = MockCatalogueRepository::new();
    catalogue.expect_find_provider().returning(|id| {
        Ok(Some(Provider {
            id,
            business_name: "Sparkle Ltd".to_owned(),
            verification_status: VerificationStatus::Approved,
        }))
    });

    let status = build_service(catalogue)
        .verification_status(Uuid::new_v4())
        .await
        .expect("status read succeeds");

    assert_eq!(status, VerificationStatus::Approved);
}

#[rstest]
#[tokio::test]
async fn status_for_unknown_provider_is_not_found() {
    let mut catalogue = MockCatalogueRepository::new();
    catalogue.expect_find_provider().returning(|_| Ok(None));

    let error = build_service(catalogue)
        .verification_status(Uuid::new_v4())
        .await
        .expect_err("unknown provider must fail");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn pending_is_not_an_admin_decision() {
    let error = build_service(MockCatalogueRepository::new())
        .verify_provider(Uuid::new_v4(), VerificationStatus::Pending)
        .await
        .expect_err("pending must be rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(VerificationStatus::Approved)]
#[case(VerificationStatus::Rejected)]
#[tokio::test]
async fn decisions_are_recorded(#[case] decision: VerificationStatus) {
    let mut catalogue = MockCatalogueRepository::new();
    catalogue
        .expect_set_verification_status()
        .withf(move |_, status, _| *status == decision)
        .returning(|_, _, _| Ok(true));

    build_service(catalogue)
        .verify_provider(Uuid::new_v4(), decision)
        .await
        .expect("decision succeeds");
}

#[rstest]
#[tokio::test]
async fn deciding_an_unknown_provider_is_not_found() {
    let mut catalogue = MockCatalogueRepository::new();
    catalogue
        .expect_set_verification_status()
        .returning(|_, _, _| Ok(false));

    let error = build_service(catalogue)
        .verify_provider(Uuid::new_v4(), VerificationStatus::Approved)
        .await
        .expect_err("unknown provider must fail");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
