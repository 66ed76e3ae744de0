//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to all per-aggregate
//! repositories. Consumers request only the repository they need:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) {
//!     let slots = repos.slots().find_all().await?;
//!     let active = repos.reservations().find_for_slot(1).await?;
//! }
//! ```

use super::history::HistoryRepository;
use super::reservation::ReservationRepository;
use super::slot::SlotRepository;

/// Provides access to all domain repositories
pub trait RepositoryProvider: Send + Sync {
    fn slots(&self) -> &dyn SlotRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn history(&self) -> &dyn HistoryRepository;
}
