//! Reservation history entity
//!
//! Append-only archive; deduplicated by the seven business columns, not
//! by a unique constraint.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservation_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub owner_id: String,
    pub plate: String,

    pub entry_time: DateTimeUtc,
    pub exit_time: DateTimeUtc,

    pub vehicle_category: String,
    pub price: f64,
    pub slot_number: i32,

    pub archived_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
