//! Catalog entities consumed by the booking core.
//!
//! The catalog owns service and provider records; the booking subsystem reads
//! a service's price and provider at creation time only. Provider
//! verification is the one catalog write retained here: an admin moves a
//! provider from pending to approved or rejected.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A bookable service offered by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    /// Service identifier.
    pub id: Uuid,
    /// Owning provider.
    pub provider_id: Uuid,
    /// Display title.
    pub title: String,
    /// Image reference, if one is set.
    pub image: Option<String>,
    /// Current list price. Bookings snapshot this value at creation.
    pub price: BigDecimal,
    /// Whether the service is currently offered.
    pub active: bool,
}

/// Admin-controlled verification state of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Awaiting an admin decision.
    Pending,
    /// Cleared to appear in listings and reports.
    Approved,
    /// Declined by an admin.
    Rejected,
}

impl VerificationStatus {
    /// Wire representation, matching the persisted value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing an unrecognised verification status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised verification status: {value}")]
pub struct ParseVerificationStatusError {
    /// The rejected input value.
    pub value: String,
}

impl FromStr for VerificationStatus {
    type Err = ParseVerificationStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(ParseVerificationStatusError {
                value: other.to_owned(),
            }),
        }
    }
}

/// A service provider as seen by the booking core and reporters.
#[derive(Debug, Clone, PartialEq)]
pub struct Provider {
    /// Provider identifier.
    pub id: Uuid,
    /// Registered business name.
    pub business_name: String,
    /// Admin verification state.
    pub verification_status: VerificationStatus,
}

/// Providers per verification state, for the admin overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct VerificationCounts {
    /// Providers awaiting a decision.
    pub pending: i64,
    /// Approved providers.
    pub approved: i64,
    /// Rejected providers.
    pub rejected: i64,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("pending", VerificationStatus::Pending)]
    #[case("approved", VerificationStatus::Approved)]
    #[case("rejected", VerificationStatus::Rejected)]
    fn verification_status_round_trips(#[case] text: &str, #[case] status: VerificationStatus) {
        assert_eq!(text.parse::<VerificationStatus>().expect("parses"), status);
        assert_eq!(status.as_str(), text);
    }

    #[rstest]
    fn unknown_verification_status_is_rejected() {
        let error = "banned"
            .parse::<VerificationStatus>()
            .expect_err("must fail");
        assert_eq!(error.value, "banned");
    }
}
