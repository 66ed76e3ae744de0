//! History repository trait

use async_trait::async_trait;

use super::HistoryRecord;
use crate::domain::reservation::Reservation;
use crate::domain::DomainResult;

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Append a snapshot. The record's `id` is assigned by the store.
    async fn insert(&self, record: HistoryRecord) -> DomainResult<()>;

    async fn find_all(&self) -> DomainResult<Vec<HistoryRecord>>;

    /// Whether a record matching the reservation's natural key exists
    async fn exists_matching(&self, reservation: &Reservation) -> DomainResult<bool>;
}
