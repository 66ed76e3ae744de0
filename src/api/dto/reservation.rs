//! Reservation DTO

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::reservation::Reservation;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    /// Reservation id; doubles as the entry token
    pub id: String,
    /// Owning user's email
    pub owner_id: String,
    pub plate: String,
    /// RFC 3339 timestamp
    pub entry_time: String,
    /// RFC 3339 timestamp
    pub exit_time: String,
    pub vehicle_category: String,
    pub price: f64,
    pub slot_number: i32,
    pub arrived: bool,
    pub exit_token: String,
    pub created_at: String,
}

impl From<&Reservation> for ReservationDto {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id.clone(),
            owner_id: r.owner_id.clone(),
            plate: r.plate.clone(),
            entry_time: r.entry_time.to_rfc3339(),
            exit_time: r.exit_time.to_rfc3339(),
            vehicle_category: r.vehicle_category.as_str().to_string(),
            price: r.price,
            slot_number: r.slot_number,
            arrived: r.arrived,
            exit_token: r.exit_token.clone(),
            created_at: r.created_at.to_rfc3339(),
        }
    }
}
