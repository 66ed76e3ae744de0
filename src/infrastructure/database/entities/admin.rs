//! Admin account entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub first_name: String,
    #[sea_orm(nullable)]
    pub middle_initial: Option<String>,
    pub last_name: String,
    #[sea_orm(nullable)]
    pub bio: Option<String>,

    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,

    #[sea_orm(nullable)]
    pub phone: Option<String>,
    #[sea_orm(nullable)]
    pub tin_id: Option<String>,
    #[sea_orm(nullable)]
    pub country: Option<String>,
    #[sea_orm(nullable)]
    pub zip_code: Option<String>,
    #[sea_orm(nullable)]
    pub address: Option<String>,

    #[sea_orm(unique)]
    pub username: String,

    /// Superadmins may list and stay exempt from deletion
    pub is_superadmin: bool,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
