//! End-user query handlers
//!
//! Users register through the driver app; this side lists, verifies and
//! counts them.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::api::dto::{ApiResponse, CountResponse, UserDto};
use crate::infrastructure::database::entities::user;

/// User handler state
#[derive(Clone)]
pub struct UserHandlerState {
    pub db: sea_orm::DatabaseConnection,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersParams {
    /// Exact email match; takes precedence over `filter`
    pub email: Option<String>,
    /// "verified" or "not-verified"
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyUserRequest {
    pub email: String,
}

fn internal_error<T>(e: impl ToString) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(e.to_string())),
    )
}

#[utoipa::path(
    get,
    path = "/user-list",
    tag = "Users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "Matching users", body = ApiResponse<Vec<UserDto>>),
        (status = 404, description = "No users matched")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, (StatusCode, Json<ApiResponse<Vec<UserDto>>>)> {
    let mut query = user::Entity::find();

    if let Some(ref email) = params.email {
        query = query.filter(user::Column::Email.eq(email));
    } else {
        match params.filter.as_deref() {
            Some("verified") => query = query.filter(user::Column::Verified.eq(true)),
            Some("not-verified") => query = query.filter(user::Column::Verified.eq(false)),
            _ => {}
        }
    }

    let users = query.all(&state.db).await.map_err(internal_error)?;

    if users.is_empty() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("No users found")),
        ));
    }

    let dtos: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    put,
    path = "/verify-user",
    tag = "Users",
    request_body = VerifyUserRequest,
    responses(
        (status = 200, description = "User verified", body = ApiResponse<UserDto>),
        (status = 404, description = "User not found")
    )
)]
pub async fn verify_user(
    State(state): State<UserHandlerState>,
    Json(request): Json<VerifyUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<UserDto>>)> {
    let user = user::Entity::find()
        .filter(user::Column::Email.eq(&request.email))
        .one(&state.db)
        .await
        .map_err(internal_error)?;

    let Some(user) = user else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ));
    };

    let mut active: user::ActiveModel = user.into();
    active.verified = Set(true);
    let updated = active.update(&state.db).await.map_err(internal_error)?;

    Ok(Json(ApiResponse::success(UserDto::from(updated))))
}

#[utoipa::path(
    get,
    path = "/user-count",
    tag = "Users",
    responses(
        (status = 200, description = "Count of user accounts", body = ApiResponse<CountResponse>)
    )
)]
pub async fn user_count(
    State(state): State<UserHandlerState>,
) -> Result<Json<ApiResponse<CountResponse>>, (StatusCode, Json<ApiResponse<CountResponse>>)> {
    let count = user::Entity::find()
        .count(&state.db)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(CountResponse { count })))
}
