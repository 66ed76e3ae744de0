//! Reservation repository trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::Reservation;
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn save(&self, reservation: Reservation) -> DomainResult<()>;

    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>>;

    async fn find_by_exit_token(&self, exit_token: &str) -> DomainResult<Option<Reservation>>;

    /// Active reservation currently holding a slot, if any
    async fn find_for_slot(&self, slot_number: i32) -> DomainResult<Option<Reservation>>;

    async fn update(&self, reservation: Reservation) -> DomainResult<()>;

    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// Reservations with `arrived == false` and `exit_time <= now`
    async fn find_no_shows(&self, now: DateTime<Utc>) -> DomainResult<Vec<Reservation>>;

    /// Count of reservations still waiting for arrival
    async fn count_pending(&self) -> DomainResult<u64>;
}
