//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    /// Also serves as the entry token on the printed ticket
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning user's email
    pub owner_id: String,
    pub plate: String,

    pub entry_time: DateTimeUtc,
    pub exit_time: DateTimeUtc,

    /// Vehicle category: "motorcycle" or "car"
    pub vehicle_category: String,
    pub price: f64,
    pub slot_number: i32,

    pub arrived: bool,
    pub exit_token: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
