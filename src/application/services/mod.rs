pub mod expiry_sweep;
pub mod lifecycle;
pub mod occupancy;
pub mod reporting;

pub use lifecycle::LifecycleService;
pub use occupancy::OccupancyService;
pub use reporting::ReportingService;

#[cfg(test)]
pub(crate) mod memory;
