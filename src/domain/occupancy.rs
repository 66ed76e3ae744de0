//! Occupancy projection
//!
//! Derives per-slot status by joining the slot and reservation
//! collections in application code. There is no relational enforcement
//! between the two stores; the functions here are pure and recomputed on
//! every request, no caching or incremental update.

use std::collections::HashMap;

use super::reservation::Reservation;
use super::slot::{Slot, VehicleCategory};

/// Derived status of one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Occupied,
    Available,
}

impl SlotState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Occupied => "occupied",
            Self::Available => "available",
        }
    }
}

/// One row of the occupancy view
#[derive(Debug, Clone, PartialEq)]
pub struct SlotStatus {
    pub slot_number: i32,
    pub vehicle_category: VehicleCategory,
    pub status: SlotState,
    /// Id of the occupying reservation, when occupied
    pub reservation_id: Option<String>,
    /// Arrival flag of the occupying reservation, when occupied
    pub arrived: Option<bool>,
}

/// Aggregate availability counts per vehicle category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilitySummary {
    pub available_motorcycle_slots: u32,
    pub available_car_slots: u32,
    pub occupied_motorcycle_slots: u32,
    pub occupied_car_slots: u32,
    pub total_available_slots: u32,
}

/// Project the occupancy view: a slot is occupied iff some reservation
/// points at its number. O(slots + reservations).
///
/// Duplicate reservations on one slot are a data-integrity fault; the
/// last one in iteration order wins, nothing is reported.
pub fn project_occupancy(slots: &[Slot], reservations: &[Reservation]) -> Vec<SlotStatus> {
    let by_slot: HashMap<i32, &Reservation> = reservations
        .iter()
        .map(|r| (r.slot_number, r))
        .collect();

    slots
        .iter()
        .map(|slot| match by_slot.get(&slot.slot_number) {
            Some(r) => SlotStatus {
                slot_number: slot.slot_number,
                vehicle_category: slot.vehicle_category,
                status: SlotState::Occupied,
                reservation_id: Some(r.id.clone()),
                arrived: Some(r.arrived),
            },
            None => SlotStatus {
                slot_number: slot.slot_number,
                vehicle_category: slot.vehicle_category,
                status: SlotState::Available,
                reservation_id: None,
                arrived: None,
            },
        })
        .collect()
}

/// Availability counts over the same join
pub fn availability_summary(slots: &[Slot], reservations: &[Reservation]) -> AvailabilitySummary {
    let mut summary = AvailabilitySummary::default();

    for status in project_occupancy(slots, reservations) {
        match (status.status, status.vehicle_category) {
            (SlotState::Available, VehicleCategory::Motorcycle) => {
                summary.available_motorcycle_slots += 1;
                summary.total_available_slots += 1;
            }
            (SlotState::Available, VehicleCategory::Car) => {
                summary.available_car_slots += 1;
                summary.total_available_slots += 1;
            }
            (SlotState::Occupied, VehicleCategory::Motorcycle) => {
                summary.occupied_motorcycle_slots += 1;
            }
            (SlotState::Occupied, VehicleCategory::Car) => {
                summary.occupied_car_slots += 1;
            }
        }
    }

    summary
}

/// Count of slots physically in use (reservation arrived), grouped by
/// the slot's vehicle category. Reservations pointing at a deleted slot
/// are dropped from the count, as in a relational lookup-join.
pub fn occupied_per_category(
    slots: &[Slot],
    reservations: &[Reservation],
) -> HashMap<VehicleCategory, u64> {
    let category_by_number: HashMap<i32, VehicleCategory> = slots
        .iter()
        .map(|s| (s.slot_number, s.vehicle_category))
        .collect();

    let mut counts = HashMap::new();
    for r in reservations.iter().filter(|r| r.arrived) {
        if let Some(category) = category_by_number.get(&r.slot_number) {
            *counts.entry(*category).or_insert(0) += 1;
        }
    }
    counts
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn reservation_for(slot_number: i32, category: VehicleCategory) -> Reservation {
        Reservation::new(
            "driver@example.com",
            "ABC-1234",
            Utc::now(),
            Utc::now() + Duration::hours(2),
            category,
            50.0,
            slot_number,
        )
    }

    #[test]
    fn one_car_slot_taken_one_motorcycle_free() {
        let slots = vec![
            Slot::new(1, VehicleCategory::Car),
            Slot::new(2, VehicleCategory::Motorcycle),
        ];
        let reservations = vec![reservation_for(1, VehicleCategory::Car)];

        let view = project_occupancy(&slots, &reservations);
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].status, SlotState::Occupied);
        assert_eq!(view[0].reservation_id.as_deref(), Some(reservations[0].id.as_str()));
        assert_eq!(view[0].arrived, Some(false));
        assert_eq!(view[1].status, SlotState::Available);
        assert_eq!(view[1].reservation_id, None);

        let summary = availability_summary(&slots, &reservations);
        assert_eq!(summary.available_car_slots, 0);
        assert_eq!(summary.available_motorcycle_slots, 1);
        assert_eq!(summary.total_available_slots, 1);
    }

    #[test]
    fn occupied_plus_available_covers_every_slot() {
        let slots: Vec<Slot> = (1..=10)
            .map(|n| {
                let category = if n % 3 == 0 {
                    VehicleCategory::Motorcycle
                } else {
                    VehicleCategory::Car
                };
                Slot::new(n, category)
            })
            .collect();
        let reservations = vec![
            reservation_for(2, VehicleCategory::Car),
            reservation_for(3, VehicleCategory::Motorcycle),
            reservation_for(9, VehicleCategory::Motorcycle),
            // points at a slot that does not exist; must not distort counts
            reservation_for(99, VehicleCategory::Car),
        ];

        let summary = availability_summary(&slots, &reservations);
        let total = summary.available_car_slots
            + summary.available_motorcycle_slots
            + summary.occupied_car_slots
            + summary.occupied_motorcycle_slots;
        assert_eq!(total as usize, slots.len());
        assert_eq!(summary.occupied_motorcycle_slots, 2);
        assert_eq!(summary.occupied_car_slots, 1);
        assert_eq!(summary.total_available_slots, 7);
    }

    #[test]
    fn empty_lot_projects_to_empty_view() {
        let view = project_occupancy(&[], &[reservation_for(1, VehicleCategory::Car)]);
        assert!(view.is_empty());
        let summary = availability_summary(&[], &[]);
        assert_eq!(summary, AvailabilitySummary::default());
    }

    #[test]
    fn arrival_flag_is_carried_into_the_view() {
        let slots = vec![Slot::new(5, VehicleCategory::Car)];
        let mut r = reservation_for(5, VehicleCategory::Car);
        r.mark_arrived().unwrap();

        let view = project_occupancy(&slots, &[r]);
        assert_eq!(view[0].arrived, Some(true));
    }

    #[test]
    fn duplicate_reservations_on_a_slot_still_count_it_once() {
        let slots = vec![Slot::new(1, VehicleCategory::Car)];
        let reservations = vec![
            reservation_for(1, VehicleCategory::Car),
            reservation_for(1, VehicleCategory::Car),
        ];

        let view = project_occupancy(&slots, &reservations);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].status, SlotState::Occupied);

        let summary = availability_summary(&slots, &reservations);
        assert_eq!(summary.occupied_car_slots, 1);
    }

    #[test]
    fn only_arrived_reservations_count_as_physically_parked() {
        let slots = vec![
            Slot::new(1, VehicleCategory::Car),
            Slot::new(2, VehicleCategory::Car),
            Slot::new(3, VehicleCategory::Motorcycle),
        ];
        let mut parked_car = reservation_for(1, VehicleCategory::Car);
        parked_car.mark_arrived().unwrap();
        let mut parked_moto = reservation_for(3, VehicleCategory::Motorcycle);
        parked_moto.mark_arrived().unwrap();
        let pending = reservation_for(2, VehicleCategory::Car);

        let counts = occupied_per_category(&slots, &[parked_car, parked_moto, pending]);
        assert_eq!(counts.get(&VehicleCategory::Car), Some(&1));
        assert_eq!(counts.get(&VehicleCategory::Motorcycle), Some(&1));
    }

    #[test]
    fn parked_on_a_deleted_slot_is_dropped_from_the_count() {
        let slots = vec![Slot::new(1, VehicleCategory::Car)];
        let mut orphan = reservation_for(42, VehicleCategory::Car);
        orphan.mark_arrived().unwrap();

        let counts = occupied_per_category(&slots, &[orphan]);
        assert!(counts.is_empty());
    }
}
