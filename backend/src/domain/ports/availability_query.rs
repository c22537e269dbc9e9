//! Driving port for the slot availability calculator.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Error, SlotAvailability};

/// Port for listing bookable slots. Read-only against the ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityQuery: Send + Sync {
    /// Ordered slot listing for a service on a date.
    async fn day_availability(
        &self,
        service_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<SlotAvailability>, Error>;
}
