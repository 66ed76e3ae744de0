//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::history::HistoryRepository;
use crate::domain::reservation::ReservationRepository;
use crate::domain::slot::SlotRepository;
use crate::domain::RepositoryProvider;

use super::history_repository::SeaOrmHistoryRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::slot_repository::SeaOrmSlotRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository
/// accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let slots = repos.slots().find_all().await?;
/// let active = repos.reservations().find_for_slot(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    slots: SeaOrmSlotRepository,
    reservations: SeaOrmReservationRepository,
    history: SeaOrmHistoryRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            slots: SeaOrmSlotRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            history: SeaOrmHistoryRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
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
