//! Reservation lifecycle service
//!
//! Owns every write into the reservation store: booking, the entry and
//! exit gates, the no-show expiry sweep and history archival. The gates
//! are the transition hooks of the reservation state machine; archival
//! fires on exit so a completed visit is snapshotted before its record
//! is removed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::domain::history::HistoryRecord;
use crate::domain::reservation::Reservation;
use crate::domain::slot::VehicleCategory;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct LifecycleService {
    repos: Arc<dyn RepositoryProvider>,
}

impl LifecycleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Book a slot for a time window.
    ///
    /// The data layer does not enforce one-reservation-per-slot; this is
    /// the caller-discipline check that keeps the invariant in practice.
    #[allow(clippy::too_many_arguments)]
    pub async fn book(
        &self,
        owner_id: &str,
        plate: &str,
        entry_time: DateTime<Utc>,
        exit_time: DateTime<Utc>,
        vehicle_category: VehicleCategory,
        price: f64,
        slot_number: i32,
    ) -> DomainResult<Reservation> {
        if exit_time <= entry_time {
            return Err(DomainError::Validation(
                "exit_time must be after entry_time".to_string(),
            ));
        }

        let Some(slot) = self.repos.slots().find_by_number(slot_number).await? else {
            return Err(DomainError::NotFound {
                entity: "Slot",
                field: "slot_number",
                value: slot_number.to_string(),
            });
        };

        if slot.vehicle_category != vehicle_category {
            return Err(DomainError::Validation(format!(
                "Slot {} is sized for {}",
                slot_number, slot.vehicle_category
            )));
        }

        if self
            .repos
            .reservations()
            .find_for_slot(slot_number)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "Slot {} already has an active reservation",
                slot_number
            )));
        }

        let reservation = Reservation::new(
            owner_id,
            plate,
            entry_time,
            exit_time,
            vehicle_category,
            price,
            slot_number,
        );
        self.repos.reservations().save(reservation.clone()).await?;
        debug!(id = %reservation.id, slot = slot_number, "Reservation booked");
        Ok(reservation)
    }

    /// Entry gate. The ticket id must parse as a store key, the
    /// reservation must exist and must not have arrived yet. Returns the
    /// updated reservation.
    pub async fn validate_entry(&self, id: &str) -> DomainResult<Reservation> {
        if Uuid::parse_str(id).is_err() {
            return Err(DomainError::Validation(
                "Invalid reservation ID format".to_string(),
            ));
        }

        let Some(mut reservation) = self.repos.reservations().find_by_id(id).await? else {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            });
        };

        reservation.mark_arrived()?;
        self.repos.reservations().update(reservation.clone()).await?;
        debug!(id = %reservation.id, "Entry ticket validated");
        Ok(reservation)
    }

    /// Exit gate. Archives the completed visit, then removes the
    /// reservation and returns its prior contents. Entry validation is
    /// not a precondition: a ticket that never passed the entry gate can
    /// still exit.
    pub async fn validate_exit(&self, exit_token: &str) -> DomainResult<Reservation> {
        let Some(reservation) = self
            .repos
            .reservations()
            .find_by_exit_token(exit_token)
            .await?
        else {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "exit_token",
                value: exit_token.to_string(),
            });
        };

        self.archive_one(&reservation, Utc::now()).await?;
        self.repos.reservations().delete(&reservation.id).await?;
        debug!(id = %reservation.id, "Exit ticket validated, reservation closed");
        Ok(reservation)
    }

    /// Remove no-shows: reservations whose exit time passed without an
    /// arrival. Expired bookings are not completed visits and are not
    /// archived. Returns the number removed.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> DomainResult<usize> {
        let expired = self.repos.reservations().find_no_shows(now).await?;
        let count = expired.len();
        for reservation in expired {
            self.repos.reservations().delete(&reservation.id).await?;
        }
        Ok(count)
    }

    /// Copy every active reservation into history unless an equivalent
    /// record (same natural key) is already there. Idempotent. Returns
    /// the active reservations and how many were newly archived.
    pub async fn archive_all(
        &self,
        now: DateTime<Utc>,
    ) -> DomainResult<(Vec<Reservation>, usize)> {
        let reservations = self.repos.reservations().find_all().await?;

        let mut newly_archived = 0;
        for reservation in &reservations {
            if !self.repos.history().exists_matching(reservation).await? {
                self.repos
                    .history()
                    .insert(HistoryRecord::from_reservation(reservation, now))
                    .await?;
                newly_archived += 1;
            }
        }

        Ok((reservations, newly_archived))
    }

    async fn archive_one(&self, reservation: &Reservation, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.repos.history().exists_matching(reservation).await? {
            self.repos
                .history()
                .insert(HistoryRecord::from_reservation(reservation, now))
                .await?;
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::memory::InMemoryRepositoryProvider;
    use crate::domain::slot::Slot;
    use chrono::Duration;

    fn service_with_slots(slots: Vec<Slot>) -> (LifecycleService, Arc<InMemoryRepositoryProvider>) {
        let repos = Arc::new(InMemoryRepositoryProvider::with_slots(slots));
        let service = LifecycleService::new(repos.clone());
        (service, repos)
    }

    async fn book_car(service: &LifecycleService, slot_number: i32) -> Reservation {
        service
            .book(
                "driver@example.com",
                "ABC-1234",
                Utc::now(),
                Utc::now() + Duration::hours(2),
                VehicleCategory::Car,
                50.0,
                slot_number,
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn booking_persists_a_reservation() {
        let (service, repos) = service_with_slots(vec![Slot::new(1, VehicleCategory::Car)]);
        let r = book_car(&service, 1).await;
        let stored = repos.reservations().find_by_id(&r.id).await.unwrap();
        assert_eq!(stored, Some(r));
    }

    #[tokio::test]
    async fn booking_an_occupied_slot_conflicts() {
        let (service, _repos) = service_with_slots(vec![Slot::new(1, VehicleCategory::Car)]);
        book_car(&service, 1).await;
        let err = service
            .book(
                "other@example.com",
                "XYZ-9999",
                Utc::now(),
                Utc::now() + Duration::hours(1),
                VehicleCategory::Car,
                30.0,
                1,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn booking_rejects_category_mismatch_and_unknown_slot() {
        let (service, _repos) = service_with_slots(vec![Slot::new(1, VehicleCategory::Motorcycle)]);

        let err = service
            .book(
                "driver@example.com",
                "ABC-1234",
                Utc::now(),
                Utc::now() + Duration::hours(1),
                VehicleCategory::Car,
                50.0,
                1,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = service
            .book(
                "driver@example.com",
                "ABC-1234",
                Utc::now(),
                Utc::now() + Duration::hours(1),
                VehicleCategory::Car,
                50.0,
                9,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn entry_gate_accepts_once_then_rejects() {
        let (service, _repos) = service_with_slots(vec![Slot::new(1, VehicleCategory::Car)]);
        let r = book_car(&service, 1).await;

        let validated = service.validate_entry(&r.id).await.unwrap();
        assert!(validated.arrived);

        let err = service.validate_entry(&r.id).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyUsed(_)));
    }

    #[tokio::test]
    async fn entry_gate_distinguishes_bad_format_from_unknown_id() {
        let (service, _repos) = service_with_slots(vec![]);

        let err = service.validate_entry("not-a-uuid").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let unknown = Uuid::new_v4().to_string();
        let err = service.validate_entry(&unknown).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn exit_gate_archives_then_deletes() {
        let (service, repos) = service_with_slots(vec![Slot::new(1, VehicleCategory::Car)]);
        let r = book_car(&service, 1).await;

        let closed = service.validate_exit(&r.exit_token).await.unwrap();
        assert_eq!(closed.id, r.id);

        assert!(repos.reservations().find_by_id(&r.id).await.unwrap().is_none());
        let history = repos.history().find_all().await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].matches_reservation(&r));
    }

    #[tokio::test]
    async fn exit_gate_does_not_require_prior_entry() {
        let (service, _repos) = service_with_slots(vec![Slot::new(1, VehicleCategory::Car)]);
        let r = book_car(&service, 1).await;
        // never entry-validated; walk-in exit is allowed
        let closed = service.validate_exit(&r.exit_token).await.unwrap();
        assert!(!closed.arrived);
    }

    #[tokio::test]
    async fn exit_gate_rejects_unknown_token() {
        let (service, _repos) = service_with_slots(vec![]);
        let err = service.validate_exit("no-such-token").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn sweep_removes_no_shows_only() {
        let (service, repos) =
            service_with_slots(vec![Slot::new(1, VehicleCategory::Car), Slot::new(2, VehicleCategory::Car)]);

        let mut no_show = book_car(&service, 1).await;
        let arrived = book_car(&service, 2).await;
        service.validate_entry(&arrived.id).await.unwrap();

        // push both windows into the past
        no_show.exit_time = Utc::now() - Duration::minutes(5);
        repos.reservations().update(no_show.clone()).await.unwrap();
        let mut overstayer = repos
            .reservations()
            .find_by_id(&arrived.id)
            .await
            .unwrap()
            .unwrap();
        overstayer.exit_time = Utc::now() - Duration::minutes(5);
        repos.reservations().update(overstayer).await.unwrap();

        let removed = service.sweep_expired(Utc::now()).await.unwrap();
        assert_eq!(removed, 1);

        assert!(repos.reservations().find_by_id(&no_show.id).await.unwrap().is_none());
        assert!(repos.reservations().find_by_id(&arrived.id).await.unwrap().is_some());

        // the no-show was an expired booking, not a visit; nothing archived
        assert!(repos.history().find_all().await.unwrap().is_empty());

        // a second sweep finds nothing to do
        assert_eq!(service.sweep_expired(Utc::now()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn archive_all_is_idempotent() {
        let (service, repos) =
            service_with_slots(vec![Slot::new(1, VehicleCategory::Car), Slot::new(2, VehicleCategory::Car)]);
        book_car(&service, 1).await;
        book_car(&service, 2).await;

        let (all, added) = service.archive_all(Utc::now()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(added, 2);

        let (_, added_again) = service.archive_all(Utc::now()).await.unwrap();
        assert_eq!(added_again, 0);
        assert_eq!(repos.history().find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn exit_after_archive_all_does_not_duplicate_history() {
        let (service, repos) = service_with_slots(vec![Slot::new(1, VehicleCategory::Car)]);
        let r = book_car(&service, 1).await;

        service.archive_all(Utc::now()).await.unwrap();
        service.validate_exit(&r.exit_token).await.unwrap();

        assert_eq!(repos.history().find_all().await.unwrap().len(), 1);
    }
}
