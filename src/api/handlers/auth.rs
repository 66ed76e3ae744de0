//! Admin registration and login handlers
//!
//! There is no session or token model: login verifies credentials and
//! returns the profile; subsequent calls identify themselves by plain
//! username parameters.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::validated_json::ValidatedJson;
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::infrastructure::database::entities::admin;

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub db: sea_orm::DatabaseConnection,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    pub first_name: String,
    pub middle_initial: Option<String>,
    pub last_name: String,
    pub bio: Option<String>,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
    pub phone: Option<String>,
    pub tin_id: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub address: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminInfo {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_superadmin: bool,
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "Admin Accounts",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Admin registered", body = ApiResponse<AdminInfo>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email or username already taken")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AdminInfo>>), (StatusCode, Json<ApiResponse<AdminInfo>>)>
{
    let existing = admin::Entity::find()
        .filter(
            admin::Column::Email
                .eq(&request.email)
                .or(admin::Column::Username.eq(&request.username)),
        )
        .one(&state.db)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    if existing.is_some() {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error(
                "Admin with this email or username already exists",
            )),
        ));
    }

    let password_hash = hash_password(&request.password).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let admin_id = uuid::Uuid::new_v4().to_string();

    let new_admin = admin::ActiveModel {
        id: Set(admin_id.clone()),
        first_name: Set(request.first_name),
        middle_initial: Set(request.middle_initial),
        last_name: Set(request.last_name),
        bio: Set(request.bio),
        email: Set(request.email.clone()),
        password_hash: Set(password_hash),
        phone: Set(request.phone),
        tin_id: Set(request.tin_id),
        country: Set(request.country),
        zip_code: Set(request.zip_code),
        address: Set(request.address),
        username: Set(request.username.clone()),
        is_superadmin: Set(false),
        created_at: Set(Utc::now()),
    };

    new_admin.insert(&state.db).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let response = AdminInfo {
        id: admin_id,
        username: request.username,
        email: request.email,
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Admin Accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<LoginResponse>>)> {
    let admin = admin::Entity::find()
        .filter(admin::Column::Username.eq(&request.username))
        .one(&state.db)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    // same message for unknown user and wrong password
    let Some(admin) = admin else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid username or password")),
        ));
    };

    let password_valid = verify_password(&request.password, &admin.password_hash).unwrap_or(false);
    if !password_valid {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid username or password")),
        ));
    }

    Ok(Json(ApiResponse::success(LoginResponse {
        first_name: admin.first_name,
        last_name: admin.last_name,
        email: admin.email,
        is_superadmin: admin.is_superadmin,
    })))
}
