//! Admin account management handlers
//!
//! The caller identifies itself by a plain `username` parameter; the
//! superadmin check for listing re-fetches the caller's own record.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::dto::{ApiResponse, CountResponse};
use crate::infrastructure::database::entities::admin;

/// Admin handler state
#[derive(Clone)]
pub struct AdminHandlerState {
    pub db: sea_orm::DatabaseConnection,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct UsernameParams {
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminAddressDto {
    pub full_address: Option<String>,
    pub postal_code: Option<String>,
    pub tin_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminProfileDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: AdminAddressDto,
    pub location: String,
}

impl From<admin::Model> for AdminProfileDto {
    fn from(m: admin::Model) -> Self {
        Self {
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            phone: m.phone,
            address: AdminAddressDto {
                full_address: m.address,
                postal_code: m.zip_code,
                tin_id: m.tin_id,
            },
            location: m.country.unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminSummaryDto {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub username: String,
    pub first_name: String,
    pub middle_initial: Option<String>,
    pub last_name: String,
    pub bio: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub tin_id: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub address: Option<String>,
}

async fn find_by_username(
    db: &sea_orm::DatabaseConnection,
    username: &str,
) -> Result<Option<admin::Model>, sea_orm::DbErr> {
    admin::Entity::find()
        .filter(admin::Column::Username.eq(username))
        .one(db)
        .await
}

fn internal_error<T>(e: impl ToString) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(e.to_string())),
    )
}

#[utoipa::path(
    get,
    path = "/admin",
    tag = "Admin Accounts",
    params(UsernameParams),
    responses(
        (status = 200, description = "Admin profile", body = ApiResponse<AdminProfileDto>),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn get_admin_profile(
    State(state): State<AdminHandlerState>,
    Query(params): Query<UsernameParams>,
) -> Result<Json<ApiResponse<AdminProfileDto>>, (StatusCode, Json<ApiResponse<AdminProfileDto>>)> {
    let admin = match params.username {
        Some(ref username) => find_by_username(&state.db, username)
            .await
            .map_err(internal_error)?,
        None => None,
    };

    let Some(admin) = admin else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Admin not found")),
        ));
    };

    Ok(Json(ApiResponse::success(AdminProfileDto::from(admin))))
}

#[utoipa::path(
    get,
    path = "/admin-list",
    tag = "Admin Accounts",
    params(UsernameParams),
    responses(
        (status = 200, description = "Non-superadmin accounts", body = ApiResponse<Vec<AdminSummaryDto>>),
        (status = 403, description = "Caller is not a superadmin")
    )
)]
pub async fn list_admins(
    State(state): State<AdminHandlerState>,
    Query(params): Query<UsernameParams>,
) -> Result<
    Json<ApiResponse<Vec<AdminSummaryDto>>>,
    (StatusCode, Json<ApiResponse<Vec<AdminSummaryDto>>>),
> {
    let caller = match params.username {
        Some(ref username) => find_by_username(&state.db, username)
            .await
            .map_err(internal_error)?,
        None => None,
    };

    // the caller's own record decides; an unknown caller is not a superadmin
    if !caller.map(|a| a.is_superadmin).unwrap_or(false) {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error(
                "Access denied. Only superadmins can access the admin list",
            )),
        ));
    }

    let admins = admin::Entity::find()
        .filter(admin::Column::IsSuperadmin.eq(false))
        .all(&state.db)
        .await
        .map_err(internal_error)?;

    let summaries: Vec<AdminSummaryDto> = admins
        .into_iter()
        .map(|a| AdminSummaryDto {
            username: a.username,
            email: a.email,
        })
        .collect();

    Ok(Json(ApiResponse::success(summaries)))
}

#[utoipa::path(
    delete,
    path = "/delete-admin",
    tag = "Admin Accounts",
    params(UsernameParams),
    responses(
        (status = 200, description = "Admin deleted"),
        (status = 400, description = "Username missing"),
        (status = 403, description = "Target is a superadmin"),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn delete_admin(
    State(state): State<AdminHandlerState>,
    Query(params): Query<UsernameParams>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(username) = params.username else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Username is required")),
        ));
    };

    let admin = find_by_username(&state.db, &username)
        .await
        .map_err(internal_error)?;

    let Some(admin) = admin else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Admin not found")),
        ));
    };

    if admin.is_superadmin {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Cannot delete a superadmin")),
        ));
    }

    admin::Entity::delete_by_id(&admin.id)
        .exec(&state.db)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    get,
    path = "/admin-count",
    tag = "Admin Accounts",
    responses(
        (status = 200, description = "Count of non-superadmin accounts", body = ApiResponse<CountResponse>)
    )
)]
pub async fn admin_count(
    State(state): State<AdminHandlerState>,
) -> Result<Json<ApiResponse<CountResponse>>, (StatusCode, Json<ApiResponse<CountResponse>>)> {
    let count = admin::Entity::find()
        .filter(admin::Column::IsSuperadmin.eq(false))
        .count(&state.db)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(CountResponse { count })))
}

#[utoipa::path(
    put,
    path = "/edit-profile",
    tag = "Admin Accounts",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<AdminProfileDto>),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn edit_profile(
    State(state): State<AdminHandlerState>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<AdminProfileDto>>, (StatusCode, Json<ApiResponse<AdminProfileDto>>)> {
    let admin = find_by_username(&state.db, &request.username)
        .await
        .map_err(internal_error)?;

    let Some(admin) = admin else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Admin not found")),
        ));
    };

    let mut active: admin::ActiveModel = admin.into();
    active.first_name = Set(request.first_name);
    active.middle_initial = Set(request.middle_initial);
    active.last_name = Set(request.last_name);
    active.bio = Set(request.bio);
    active.email = Set(request.email);
    active.phone = Set(request.phone);
    active.tin_id = Set(request.tin_id);
    active.country = Set(request.country);
    active.zip_code = Set(request.zip_code);
    active.address = Set(request.address);

    let updated = active.update(&state.db).await.map_err(internal_error)?;

    Ok(Json(ApiResponse::success(AdminProfileDto::from(updated))))
}
