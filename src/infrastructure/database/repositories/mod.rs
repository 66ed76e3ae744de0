//! SeaORM repository implementations

pub mod history_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod slot_repository;

pub use history_repository::SeaOrmHistoryRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use reservation_repository::SeaOrmReservationRepository;
pub use slot_repository::SeaOrmSlotRepository;

use crate::domain::slot::VehicleCategory;
use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// A stored category string that no longer parses is a data-integrity
/// fault surfaced as a storage error, not silently coerced.
pub(crate) fn parse_category(raw: &str) -> Result<VehicleCategory, DomainError> {
    VehicleCategory::parse(raw)
        .ok_or_else(|| DomainError::Storage(format!("Unknown vehicle category '{}'", raw)))
}
