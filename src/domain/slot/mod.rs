pub mod model;
pub mod repository;

pub use model::{next_slot_numbers, Slot, VehicleCategory};
pub use repository::SlotRepository;
