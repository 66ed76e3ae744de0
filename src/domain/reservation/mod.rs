pub mod model;
pub mod repository;

pub use model::{Reservation, ReservationState};
pub use repository::ReservationRepository;
