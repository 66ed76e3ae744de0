//! Occupancy read-side service
//!
//! Fetches the two collections and applies the pure projections from
//! `domain::occupancy`. Read-only; recomputed on every call.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::occupancy::{
    availability_summary, occupied_per_category, project_occupancy, AvailabilitySummary,
    SlotStatus,
};
use crate::domain::slot::VehicleCategory;
use crate::domain::{DomainResult, RepositoryProvider};

pub struct OccupancyService {
    repos: Arc<dyn RepositoryProvider>,
}

impl OccupancyService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Per-slot occupancy view
    pub async fn slot_statuses(&self) -> DomainResult<Vec<SlotStatus>> {
        let slots = self.repos.slots().find_all().await?;
        let reservations = self.repos.reservations().find_all().await?;
        Ok(project_occupancy(&slots, &reservations))
    }

    /// Availability counts per category plus the total-available scalar
    pub async fn availability(&self) -> DomainResult<AvailabilitySummary> {
        let slots = self.repos.slots().find_all().await?;
        let reservations = self.repos.reservations().find_all().await?;
        Ok(availability_summary(&slots, &reservations))
    }

    /// Physically parked vehicles (arrived reservations) per category
    pub async fn occupied_counts(&self) -> DomainResult<HashMap<VehicleCategory, u64>> {
        let slots = self.repos.slots().find_all().await?;
        let reservations = self.repos.reservations().find_all().await?;
        Ok(occupied_per_category(&slots, &reservations))
    }
}
