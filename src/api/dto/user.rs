//! End-user DTOs
//!
//! Excludes the password hash and other private columns.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::infrastructure::database::entities::user;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LicenseDto {
    pub front_image_url: String,
    pub back_image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub name: String,
    pub email: String,
    pub profile_image_url: String,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<LicenseDto>,
}

impl From<user::Model> for UserDto {
    fn from(m: user::Model) -> Self {
        let license = match (m.license_front_image_url, m.license_back_image_url) {
            (Some(front), Some(back)) => Some(LicenseDto {
                front_image_url: front,
                back_image_url: back,
            }),
            _ => None,
        };
        Self {
            name: m.name,
            email: m.email,
            profile_image_url: m.profile_image_url,
            verified: m.verified,
            license,
        }
    }
}
