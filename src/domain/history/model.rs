//! Reservation history entity

use chrono::{DateTime, Utc};

use crate::domain::reservation::Reservation;
use crate::domain::slot::VehicleCategory;

/// Immutable archival snapshot of a reservation.
///
/// Deduplicated by natural key: the seven business fields, not the row
/// id. At most one record per distinct tuple exists in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    /// Row id; 0 until persisted
    pub id: i32,
    pub owner_id: String,
    pub plate: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    pub vehicle_category: VehicleCategory,
    pub price: f64,
    pub slot_number: i32,
    pub archived_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn from_reservation(reservation: &Reservation, archived_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            owner_id: reservation.owner_id.clone(),
            plate: reservation.plate.clone(),
            entry_time: reservation.entry_time,
            exit_time: reservation.exit_time,
            vehicle_category: reservation.vehicle_category,
            price: reservation.price,
            slot_number: reservation.slot_number,
            archived_at,
        }
    }

    /// Natural-key match used by the archival dedup check
    pub fn matches_reservation(&self, reservation: &Reservation) -> bool {
        self.owner_id == reservation.owner_id
            && self.plate == reservation.plate
            && self.entry_time == reservation.entry_time
            && self.exit_time == reservation.exit_time
            && self.vehicle_category == reservation.vehicle_category
            && self.price == reservation.price
            && self.slot_number == reservation.slot_number
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn snapshot_matches_its_source() {
        let r = Reservation::new(
            "driver@example.com",
            "ABC-1234",
            Utc::now(),
            Utc::now() + Duration::hours(2),
            VehicleCategory::Motorcycle,
            20.0,
            3,
        );
        let record = HistoryRecord::from_reservation(&r, Utc::now());
        assert!(record.matches_reservation(&r));

        let mut other = r.clone();
        other.plate = "XYZ-9999".to_string();
        assert!(!record.matches_reservation(&other));
    }

    #[test]
    fn arrival_flag_does_not_affect_the_natural_key() {
        let mut r = Reservation::new(
            "driver@example.com",
            "ABC-1234",
            Utc::now(),
            Utc::now() + Duration::hours(1),
            VehicleCategory::Car,
            35.0,
            8,
        );
        let record = HistoryRecord::from_reservation(&r, Utc::now());
        r.mark_arrived().unwrap();
        assert!(record.matches_reservation(&r));
    }
}
