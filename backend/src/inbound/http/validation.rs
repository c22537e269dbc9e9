//! Shared validation helpers for inbound HTTP adapters.
//!
//! All helpers return [`Error`] payloads with a `field` detail so clients can
//! attribute failures to the offending input.

use chrono::{NaiveDate, NaiveTime};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{BookingStatus, Error, VerificationStatus};

/// Calendar date wire format.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
/// Time-of-day wire format (24-hour).
pub(crate) const TIME_FORMAT: &str = "%H:%M";

/// Detail codes attached to validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureCode {
    MissingField,
    InvalidUuid,
    InvalidDate,
    InvalidTime,
    InvalidStatus,
}

impl FailureCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidDate => "invalid_date",
            Self::InvalidTime => "invalid_time",
            Self::InvalidStatus => "invalid_status",
        }
    }
}

/// Newtype wrapper for field names to keep call sites typo-resistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn failure(field: FieldName, message: String, code: FailureCode, value: Option<&str>) -> Error {
    let mut details = json!({
        "field": field.as_str(),
        "code": code.as_str(),
    });
    if let (Some(value), Some(map)) = (value, details.as_object_mut()) {
        map.insert("value".to_owned(), json!(value));
    }
    Error::invalid_request(message).with_details(details)
}

/// Error for an absent required field.
pub(crate) fn missing_field_error(field: FieldName) -> Error {
    failure(
        field,
        format!("{} is required", field.as_str()),
        FailureCode::MissingField,
        None,
    )
}

/// Unwrap a required field or fail with [`missing_field_error`].
pub(crate) fn require(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a UUID field.
pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        failure(
            field,
            format!("{} must be a valid UUID", field.as_str()),
            FailureCode::InvalidUuid,
            Some(value),
        )
    })
}

/// Parse a `YYYY-MM-DD` calendar date field.
pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        failure(
            field,
            format!("{} must be a YYYY-MM-DD date", field.as_str()),
            FailureCode::InvalidDate,
            Some(value),
        )
    })
}

/// Parse an `HH:MM` 24-hour time field.
pub(crate) fn parse_time(value: &str, field: FieldName) -> Result<NaiveTime, Error> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| {
        failure(
            field,
            format!("{} must be an HH:MM time", field.as_str()),
            FailureCode::InvalidTime,
            Some(value),
        )
    })
}

/// Parse a booking status field.
pub(crate) fn parse_booking_status(value: &str, field: FieldName) -> Result<BookingStatus, Error> {
    value.parse().map_err(|_| {
        failure(
            field,
            format!(
                "{} must be one of: pending, approved, rejected, completed, cancelled, paid_deposit",
                field.as_str()
            ),
            FailureCode::InvalidStatus,
            Some(value),
        )
    })
}

/// Parse a verification status field.
pub(crate) fn parse_verification_status(
    value: &str,
    field: FieldName,
) -> Result<VerificationStatus, Error> {
    value.parse().map_err(|_| {
        failure(
            field,
            format!(
                "{} must be one of: pending, approved, rejected",
                field.as_str()
            ),
            FailureCode::InvalidStatus,
            Some(value),
        )
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn missing_field_names_the_field() {
        let error = missing_field_error(FieldName::new("booking_date"));
        assert!(error.message().contains("booking_date"));
        let details = error.details().expect("details attached");
        assert_eq!(details["code"], "missing_field");
    }

    #[rstest]
    #[case("2026-03-02", true)]
    #[case("02-03-2026", false)]
    #[case("2026-3-2", false)]
    #[case("tomorrow", false)]
    fn date_parsing(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(parse_date(value, FieldName::new("booking_date")).is_ok(), ok);
    }

    #[rstest]
    #[case("14:00", true)]
    #[case("23:59", true)]
    #[case("24:00", false)]
    #[case("2pm", false)]
    fn time_parsing(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(parse_time(value, FieldName::new("booking_time")).is_ok(), ok);
    }

    #[rstest]
    fn invalid_status_lists_accepted_values() {
        let error = parse_booking_status("paused", FieldName::new("status"))
            .expect_err("unknown status must fail");
        assert!(error.message().contains("paid_deposit"));
        let details = error.details().expect("details attached");
        assert_eq!(details["value"], "paused");
    }
}
