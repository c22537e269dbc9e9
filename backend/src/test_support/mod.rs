//! In-memory adapters and a frozen clock for tests.
//!
//! The in-memory marketplace mirrors the storage contract of the Diesel
//! adapters, including the atomic slot-conflict check: the interior mutex
//! makes the check and the insert one critical section, the same guarantee
//! the partial unique index gives the PostgreSQL adapter.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, CatalogueRepository, CatalogueRepositoryError,
};
use crate::domain::{
    Booking, BookingDetails, BookingDraft, BookingFilter, BookingStatus, Provider, Service,
    VerificationCounts, VerificationStatus,
};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A registered customer row.
#[derive(Debug, Clone)]
struct UserRow {
    name: String,
    mobile: String,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<Uuid, UserRow>,
    providers: HashMap<Uuid, Provider>,
    services: HashMap<Uuid, Service>,
    bookings: Vec<Booking>,
}

/// In-memory stand-in for the relational store.
#[derive(Debug, Default)]
pub struct InMemoryMarketplace {
    state: Mutex<State>,
}

impl InMemoryMarketplace {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a customer.
    pub fn seed_user(&self, id: Uuid, name: &str, mobile: &str) {
        let mut state = self.state.lock().expect("store poisoned");
        state.users.insert(
            id,
            UserRow {
                name: name.to_owned(),
                mobile: mobile.to_owned(),
            },
        );
    }

    /// Register a provider.
    pub fn seed_provider(&self, provider: Provider) {
        let mut state = self.state.lock().expect("store poisoned");
        state.providers.insert(provider.id, provider);
    }

    /// Register a service.
    pub fn seed_service(&self, service: Service) {
        let mut state = self.state.lock().expect("store poisoned");
        state.services.insert(service.id, service);
    }

    /// Number of stored bookings, regardless of status.
    pub fn booking_count(&self) -> usize {
        self.state.lock().expect("store poisoned").bookings.len()
    }

    fn join(state: &State, booking: &Booking) -> Option<BookingDetails> {
        let service = state.services.get(&booking.service_id())?;
        let user = state.users.get(&booking.user_id())?;
        let provider = state.providers.get(&booking.provider_id())?;
        Some(BookingDetails {
            booking: booking.clone(),
            service_title: service.title.clone(),
            service_image: service.image.clone(),
            user_name: user.name.clone(),
            user_mobile: user.mobile.clone(),
            provider_name: provider.business_name.clone(),
        })
    }

    fn matches(booking: &Booking, filter: &BookingFilter) -> bool {
        filter.status.is_none_or(|status| booking.status() == status)
            && filter
                .start_date
                .is_none_or(|start| booking.booking_date() >= start)
            && filter
                .end_date
                .is_none_or(|end| booking.booking_date() <= end)
    }

    fn listed(state: &State, mut bookings: Vec<Booking>) -> Vec<BookingDetails> {
        bookings.sort_by(|a, b| {
            (b.booking_date(), b.booking_time()).cmp(&(a.booking_date(), a.booking_time()))
        });
        bookings
            .iter()
            .filter_map(|booking| Self::join(state, booking))
            .collect()
    }
}

#[async_trait]
impl BookingRepository for InMemoryMarketplace {
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut state = self.state.lock().expect("store poisoned");
        let slot_taken = state.bookings.iter().any(|existing| {
            existing.service_id() == booking.service_id()
                && existing.booking_date() == booking.booking_date()
                && existing.booking_time() == booking.booking_time()
                && existing.status().is_active()
        });
        if slot_taken {
            return Err(BookingRepositoryError::SlotTaken);
        }
        state.bookings.push(booking.clone());
        Ok(())
    }

    async fn find_details(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<BookingDetails>, BookingRepositoryError> {
        let state = self.state.lock().expect("store poisoned");
        let Some(booking) = state.bookings.iter().find(|b| b.id() == booking_id) else {
            return Ok(None);
        };
        Self::join(&state, booking)
            .map(Some)
            .ok_or_else(|| BookingRepositoryError::query("booking references missing rows"))
    }

    async fn find_status(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<BookingStatus>, BookingRepositoryError> {
        let state = self.state.lock().expect("store poisoned");
        Ok(state
            .bookings
            .iter()
            .find(|b| b.id() == booking_id)
            .map(Booking::status))
    }

    async fn set_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, BookingRepositoryError> {
        let mut state = self.state.lock().expect("store poisoned");
        let Some(index) = state.bookings.iter().position(|b| b.id() == booking_id) else {
            return Ok(false);
        };
        let booking = state.bookings.remove(index);
        let replacement = Booking::new(BookingDraft {
            id: booking.id(),
            user_id: booking.user_id(),
            service_id: booking.service_id(),
            provider_id: booking.provider_id(),
            booking_date: booking.booking_date(),
            booking_time: booking.booking_time(),
            status,
            total_amount: booking.total_amount().clone(),
            notes: booking.notes().map(ToOwned::to_owned),
            created_at: booking.created_at(),
            updated_at,
        })
        .map_err(|err| BookingRepositoryError::query(err.to_string()))?;
        state.bookings.push(replacement);
        Ok(true)
    }

    async fn list_for_provider(
        &self,
        provider_id: Uuid,
        filter: &BookingFilter,
    ) -> Result<Vec<BookingDetails>, BookingRepositoryError> {
        let state = self.state.lock().expect("store poisoned");
        let selected = state
            .bookings
            .iter()
            .filter(|b| b.provider_id() == provider_id && Self::matches(b, filter))
            .cloned()
            .collect();
        Ok(Self::listed(&state, selected))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: &BookingFilter,
    ) -> Result<Vec<BookingDetails>, BookingRepositoryError> {
        let state = self.state.lock().expect("store poisoned");
        let selected = state
            .bookings
            .iter()
            .filter(|b| b.user_id() == user_id && Self::matches(b, filter))
            .cloned()
            .collect();
        Ok(Self::listed(&state, selected))
    }

    async fn booked_times(
        &self,
        service_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<NaiveTime>, BookingRepositoryError> {
        let state = self.state.lock().expect("store poisoned");
        Ok(state
            .bookings
            .iter()
            .filter(|b| {
                b.service_id() == service_id
                    && b.booking_date() == date
                    && b.status().is_active()
            })
            .map(Booking::booking_time)
            .collect())
    }
}

#[async_trait]
impl CatalogueRepository for InMemoryMarketplace {
    async fn find_service(
        &self,
        service_id: Uuid,
    ) -> Result<Option<Service>, CatalogueRepositoryError> {
        let state = self.state.lock().expect("store poisoned");
        Ok(state.services.get(&service_id).cloned())
    }

    async fn find_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Option<Provider>, CatalogueRepositoryError> {
        let state = self.state.lock().expect("store poisoned");
        Ok(state.providers.get(&provider_id).cloned())
    }

    async fn set_verification_status(
        &self,
        provider_id: Uuid,
        status: VerificationStatus,
        _updated_at: DateTime<Utc>,
    ) -> Result<bool, CatalogueRepositoryError> {
        let mut state = self.state.lock().expect("store poisoned");
        match state.providers.get_mut(&provider_id) {
            Some(provider) => {
                provider.verification_status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn verification_counts(&self) -> Result<VerificationCounts, CatalogueRepositoryError> {
        let state = self.state.lock().expect("store poisoned");
        let mut counts = VerificationCounts::default();
        for provider in state.providers.values() {
            match provider.verification_status {
                VerificationStatus::Pending => counts.pending += 1,
                VerificationStatus::Approved => counts.approved += 1,
                VerificationStatus::Rejected => counts.rejected += 1,
            }
        }
        Ok(counts)
    }
}
