//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_admins;
mod m20250301_000002_create_users;
mod m20250301_000003_create_parking_slots;
mod m20250301_000004_create_reservations;
mod m20250301_000005_create_reservation_history;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_admins::Migration),
            Box::new(m20250301_000002_create_users::Migration),
            Box::new(m20250301_000003_create_parking_slots::Migration),
            Box::new(m20250301_000004_create_reservations::Migration),
            Box::new(m20250301_000005_create_reservation_history::Migration),
        ]
    }
}
