//! In-memory repositories for service tests.
//!
//! Same contracts as the SeaORM implementations, backed by `Mutex<Vec>`.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::history::{HistoryRecord, HistoryRepository};
use crate::domain::reservation::{Reservation, ReservationRepository};
use crate::domain::slot::{Slot, SlotRepository};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

#[derive(Default)]
pub(crate) struct InMemoryRepositoryProvider {
    slots: InMemorySlotRepository,
    reservations: InMemoryReservationRepository,
    history: InMemoryHistoryRepository,
}

impl InMemoryRepositoryProvider {
    pub(crate) fn with_slots(slots: Vec<Slot>) -> Self {
        let provider = Self::default();
        *provider.slots.rows.lock().unwrap() = slots;
        provider
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn slots(&self) -> &dyn SlotRepository {
        &self.slots
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn history(&self) -> &dyn HistoryRepository {
        &self.history
    }
}

#[derive(Default)]
pub(crate) struct InMemorySlotRepository {
    rows: Mutex<Vec<Slot>>,
}

#[async_trait]
impl SlotRepository for InMemorySlotRepository {
    async fn save_many(&self, slots: Vec<Slot>) -> DomainResult<()> {
        self.rows.lock().unwrap().extend(slots);
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Slot>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_number(&self, slot_number: i32) -> DomainResult<Option<Slot>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.slot_number == slot_number)
            .cloned())
    }

    async fn delete_by_number(&self, slot_number: i32) -> DomainResult<Option<Slot>> {
        let mut rows = self.rows.lock().unwrap();
        let position = rows.iter().position(|s| s.slot_number == slot_number);
        Ok(position.map(|i| rows.remove(i)))
    }
}

#[derive(Default)]
pub(crate) struct InMemoryReservationRepository {
    rows: Mutex<Vec<Reservation>>,
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn save(&self, reservation: Reservation) -> DomainResult<()> {
        self.rows.lock().unwrap().push(reservation);
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_by_exit_token(&self, exit_token: &str) -> DomainResult<Option<Reservation>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.exit_token == exit_token)
            .cloned())
    }

    async fn find_for_slot(&self, slot_number: i32) -> DomainResult<Option<Reservation>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.slot_number == slot_number)
            .cloned())
    }

    async fn update(&self, reservation: Reservation) -> DomainResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|r| r.id == reservation.id) else {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: reservation.id,
            });
        };
        *row = reservation;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.rows.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }

    async fn find_no_shows(&self, now: DateTime<Utc>) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.is_no_show(now))
            .cloned()
            .collect())
    }

    async fn count_pending(&self) -> DomainResult<u64> {
        Ok(self.rows.lock().unwrap().iter().filter(|r| !r.arrived).count() as u64)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryHistoryRepository {
    rows: Mutex<Vec<HistoryRecord>>,
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn insert(&self, record: HistoryRecord) -> DomainResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let next_id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        rows.push(HistoryRecord {
            id: next_id,
            ..record
        });
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<HistoryRecord>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn exists_matching(&self, reservation: &Reservation) -> DomainResult<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|record| record.matches_reservation(reservation)))
    }
}
