//! Shared API DTOs

pub mod common;
pub mod history;
pub mod reservation;
pub mod user;

pub use common::{ApiResponse, CountResponse};
pub use history::HistoryRecordDto;
pub use reservation::ReservationDto;
pub use user::{LicenseDto, UserDto};
