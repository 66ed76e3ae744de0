//! Reservation domain entity
//!
//! A reservation moves through a small state machine:
//!
//! ```text
//! Booked ──mark_arrived──▶ Arrived ──exit gate──▶ (Exited, record removed)
//!    │
//!    └── exit_time passes without arrival ──▶ Expired (swept, not archived)
//! ```
//!
//! `Exited` and `Expired` are terminal: the record leaves the active
//! store, so only `Booked` and `Arrived` are ever observable on a stored
//! reservation. Completed visits are snapshotted into history before
//! removal.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::slot::VehicleCategory;
use crate::domain::{DomainError, DomainResult};

/// Lifecycle state of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationState {
    /// Booked, vehicle not yet at the gate
    Booked,
    /// Entry ticket validated, vehicle on the lot
    Arrived,
    /// Exit ticket validated, visit complete
    Exited,
    /// Exit time passed without arrival (no-show)
    Expired,
}

/// A booked occupancy of one slot for a time window
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    /// Unique id; doubles as the entry token printed on the ticket
    pub id: String,
    /// Owning user's email
    pub owner_id: String,
    /// License plate
    pub plate: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    pub vehicle_category: VehicleCategory,
    pub price: f64,
    pub slot_number: i32,
    /// Set once the entry gate validates the ticket
    pub arrived: bool,
    /// Opaque token checked by the exit gate
    pub exit_token: String,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner_id: impl Into<String>,
        plate: impl Into<String>,
        entry_time: DateTime<Utc>,
        exit_time: DateTime<Utc>,
        vehicle_category: VehicleCategory,
        price: f64,
        slot_number: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            plate: plate.into(),
            entry_time,
            exit_time,
            vehicle_category,
            price,
            slot_number,
            arrived: false,
            exit_token: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
        }
    }

    /// State observable at `now`
    pub fn state(&self, now: DateTime<Utc>) -> ReservationState {
        if self.arrived {
            ReservationState::Arrived
        } else if self.exit_time <= now {
            ReservationState::Expired
        } else {
            ReservationState::Booked
        }
    }

    /// Entry-gate transition. Fails with `AlreadyUsed` when the ticket
    /// was scanned before.
    pub fn mark_arrived(&mut self) -> DomainResult<()> {
        if self.arrived {
            return Err(DomainError::AlreadyUsed(self.id.clone()));
        }
        self.arrived = true;
        Ok(())
    }

    /// A no-show is swept once its exit time has passed without an
    /// arrival. An arrived vehicle is never swept, even past its window.
    pub fn is_no_show(&self, now: DateTime<Utc>) -> bool {
        !self.arrived && self.exit_time <= now
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_reservation() -> Reservation {
        Reservation::new(
            "driver@example.com",
            "ABC-1234",
            Utc::now(),
            Utc::now() + Duration::hours(2),
            VehicleCategory::Car,
            50.0,
            1,
        )
    }

    #[test]
    fn new_reservation_is_booked() {
        let r = sample_reservation();
        assert_eq!(r.state(Utc::now()), ReservationState::Booked);
        assert!(!r.arrived);
        assert!(!r.is_no_show(Utc::now()));
    }

    #[test]
    fn id_and_exit_token_are_distinct() {
        let r = sample_reservation();
        assert_ne!(r.id, r.exit_token);
    }

    #[test]
    fn mark_arrived_transitions_to_arrived() {
        let mut r = sample_reservation();
        r.mark_arrived().unwrap();
        assert!(r.arrived);
        assert_eq!(r.state(Utc::now()), ReservationState::Arrived);
    }

    #[test]
    fn second_arrival_is_rejected() {
        let mut r = sample_reservation();
        r.mark_arrived().unwrap();
        let err = r.mark_arrived().unwrap_err();
        assert!(matches!(err, DomainError::AlreadyUsed(ref id) if *id == r.id));
        // still arrived, not reset
        assert!(r.arrived);
    }

    #[test]
    fn past_exit_time_without_arrival_is_expired() {
        let mut r = sample_reservation();
        r.exit_time = Utc::now() - Duration::minutes(1);
        assert_eq!(r.state(Utc::now()), ReservationState::Expired);
        assert!(r.is_no_show(Utc::now()));
    }

    #[test]
    fn arrived_vehicle_is_never_a_no_show() {
        let mut r = sample_reservation();
        r.mark_arrived().unwrap();
        r.exit_time = Utc::now() - Duration::hours(1);
        assert!(!r.is_no_show(Utc::now()));
        assert_eq!(r.state(Utc::now()), ReservationState::Arrived);
    }
}
