//! End-user account entity
//!
//! Users register through the separate driver app; this backend reads,
//! verifies and counts them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,

    pub name: String,
    pub contact: String,
    pub dob: DateTimeUtc,
    pub profile_image_url: String,

    #[sea_orm(nullable)]
    pub license_front_image_url: Option<String>,
    #[sea_orm(nullable)]
    pub license_back_image_url: Option<String>,

    /// Set by an admin after checking the license images
    pub verified: bool,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
