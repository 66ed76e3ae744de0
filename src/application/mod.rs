//! Application layer: use cases built on the domain repositories.

pub mod services;

pub use services::{LifecycleService, OccupancyService, ReportingService};
