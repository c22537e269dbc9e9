//! Slot grid derivation for the availability calculator.
//!
//! A day exposes 24 fixed hourly candidates, 00:00 through 23:00. Candidates
//! whose start has already elapsed on the current day are omitted entirely
//! rather than marked unavailable; the remaining candidates are flagged
//! against the set of actively booked times.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Number of hourly candidates in a full day grid.
pub const SLOTS_PER_DAY: u32 = 24;

/// One candidate slot in the availability listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAvailability {
    /// Slot start time.
    pub time: NaiveTime,
    /// Whether the slot is free of active bookings.
    pub available: bool,
}

/// Derive the ordered slot listing for `date`.
///
/// `now` is the current instant; when `date` is the current UTC day, slots
/// starting at or before `now` are dropped from the sequence. `booked` holds
/// the start times of active bookings for the service on that date.
pub fn day_slots(
    date: NaiveDate,
    now: DateTime<Utc>,
    booked: &HashSet<NaiveTime>,
) -> Vec<SlotAvailability> {
    let now = now.naive_utc();
    (0..SLOTS_PER_DAY)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .filter(|time| !has_elapsed(date, *time, now))
        .map(|time| SlotAvailability {
            time,
            available: !booked.contains(&time),
        })
        .collect()
}

/// Whether a slot starting at `date`/`time` is at or before `now`.
fn has_elapsed(date: NaiveDate, time: NaiveTime, now: NaiveDateTime) -> bool {
    date == now.date() && NaiveDateTime::new(date, time) <= now
}
