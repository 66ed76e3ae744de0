//! SeaORM entities

pub mod admin;
pub mod parking_slot;
pub mod reservation;
pub mod reservation_history;
pub mod user;
