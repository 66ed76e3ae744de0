//! Slot repository trait

use async_trait::async_trait;

use super::Slot;
use crate::domain::DomainResult;

#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Persist a batch of freshly numbered slots
    async fn save_many(&self, slots: Vec<Slot>) -> DomainResult<()>;

    async fn find_all(&self) -> DomainResult<Vec<Slot>>;

    async fn find_by_number(&self, slot_number: i32) -> DomainResult<Option<Slot>>;

    /// Delete a slot, returning it if it existed
    async fn delete_by_number(&self, slot_number: i32) -> DomainResult<Option<Slot>>;
}
