//! Reservation history DTO

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::history::HistoryRecord;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryRecordDto {
    pub id: i32,
    pub owner_id: String,
    pub plate: String,
    /// RFC 3339 timestamp
    pub entry_time: String,
    /// RFC 3339 timestamp
    pub exit_time: String,
    pub vehicle_category: String,
    pub price: f64,
    pub slot_number: i32,
    pub archived_at: String,
}

impl From<&HistoryRecord> for HistoryRecordDto {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            id: record.id,
            owner_id: record.owner_id.clone(),
            plate: record.plate.clone(),
            entry_time: record.entry_time.to_rfc3339(),
            exit_time: record.exit_time.to_rfc3339(),
            vehicle_category: record.vehicle_category.as_str().to_string(),
            price: record.price,
            slot_number: record.slot_number,
            archived_at: record.archived_at.to_rfc3339(),
        }
    }
}
