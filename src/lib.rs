//! # ParkPoint Central Backend
//!
//! Parking-lot reservation management backend for kiosk and dashboard
//! clients.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the occupancy projection and
//!   repository traits
//! - **application**: Business logic — reservation lifecycle, expiry
//!   sweep, reporting
//! - **infrastructure**: External concerns (database, migrations,
//!   password hashing)
//! - **api**: REST API with Swagger documentation
//! - **support**: Graceful shutdown plumbing

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;

// Re-export API router
pub use api::create_api_router;
