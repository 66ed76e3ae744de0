//! Reservation handlers: booking, views and the parked-vehicles query.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::error_response;
use crate::api::dto::{ApiResponse, ReservationDto, UserDto};
use crate::api::validated_json::ValidatedJson;
use crate::application::services::LifecycleService;
use crate::domain::reservation::Reservation;
use crate::domain::slot::VehicleCategory;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::entities::user;

/// Reservation handler state
#[derive(Clone)]
pub struct ReservationAppState {
    pub db: sea_orm::DatabaseConnection,
    pub repos: Arc<dyn RepositoryProvider>,
    pub lifecycle: Arc<LifecycleService>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    /// Owning user's email
    #[validate(email)]
    pub owner_id: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub plate: String,
    /// RFC 3339 timestamp
    pub entry_time: String,
    /// RFC 3339 timestamp
    pub exit_time: String,
    /// "motorcycle" or "car"
    pub vehicle_category: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub slot_number: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SlotAssignmentDto {
    pub slot_number: i32,
    pub vehicle_category: String,
}

/// A user together with their reservations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserReservationsDto {
    pub user: UserDto,
    pub reservations: Vec<ReservationDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TotalReservationsResponse {
    pub total_reservations: u64,
}

fn parse_rfc3339<T>(
    raw: &str,
    field: &str,
) -> Result<DateTime<Utc>, (StatusCode, Json<ApiResponse<T>>)> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Invalid {}: {}", field, e))),
            )
        })
}

/// Join users with a set of reservations on owner email.
fn join_users(users: Vec<user::Model>, reservations: &[Reservation]) -> Vec<UserReservationsDto> {
    users
        .into_iter()
        .map(|u| {
            let owned: Vec<ReservationDto> = reservations
                .iter()
                .filter(|r| r.owner_id == u.email)
                .map(ReservationDto::from)
                .collect();
            UserReservationsDto {
                user: UserDto::from(u),
                reservations: owned,
            }
        })
        .collect()
}

#[utoipa::path(
    post,
    path = "/api/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation booked", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Slot not found"),
        (status = 409, description = "Slot already reserved")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<ReservationDto>>),
    (StatusCode, Json<ApiResponse<ReservationDto>>),
> {
    let entry_time = parse_rfc3339(&request.entry_time, "entry_time")?;
    let exit_time = parse_rfc3339(&request.exit_time, "exit_time")?;

    let Some(category) = VehicleCategory::parse(&request.vehicle_category) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Unknown vehicle category '{}'",
                request.vehicle_category
            ))),
        ));
    };

    let reservation = state
        .lifecycle
        .book(
            &request.owner_id,
            &request.plate,
            entry_time,
            exit_time,
            category,
            request.price,
            request.slot_number,
        )
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ReservationDto::from(&reservation))),
    ))
}

#[utoipa::path(
    get,
    path = "/reservations",
    tag = "Reservations",
    responses(
        (status = 200, description = "Slot assignments of active reservations", body = ApiResponse<Vec<SlotAssignmentDto>>)
    )
)]
pub async fn list_slot_assignments(
    State(state): State<ReservationAppState>,
) -> Result<
    Json<ApiResponse<Vec<SlotAssignmentDto>>>,
    (StatusCode, Json<ApiResponse<Vec<SlotAssignmentDto>>>),
> {
    let reservations = state
        .repos
        .reservations()
        .find_all()
        .await
        .map_err(error_response)?;

    let dtos: Vec<SlotAssignmentDto> = reservations
        .iter()
        .map(|r| SlotAssignmentDto {
            slot_number: r.slot_number,
            vehicle_category: r.vehicle_category.as_str().to_string(),
        })
        .collect();

    Ok(Json(ApiResponse::success(dtos)))
}

/// Users joined with their not-yet-arrived reservations.
#[utoipa::path(
    get,
    path = "/api/data",
    tag = "Reservations",
    responses(
        (status = 200, description = "Users with pending reservations", body = ApiResponse<Vec<UserReservationsDto>>)
    )
)]
pub async fn pending_with_users(
    State(state): State<ReservationAppState>,
) -> Result<
    Json<ApiResponse<Vec<UserReservationsDto>>>,
    (StatusCode, Json<ApiResponse<Vec<UserReservationsDto>>>),
> {
    let users = user::Entity::find().all(&state.db).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let pending: Vec<Reservation> = state
        .repos
        .reservations()
        .find_all()
        .await
        .map_err(error_response)?
        .into_iter()
        .filter(|r| !r.arrived)
        .collect();

    Ok(Json(ApiResponse::success(join_users(users, &pending))))
}

/// Parked-vehicles view. Runs the no-show sweep first, then joins users
/// with the remaining reservations, so an expired booking is gone by
/// the next call even with the background sweep task disabled.
#[utoipa::path(
    get,
    path = "/api/parked",
    tag = "Reservations",
    responses(
        (status = 200, description = "Users with active reservations after the sweep", body = ApiResponse<Vec<UserReservationsDto>>)
    )
)]
pub async fn parked(
    State(state): State<ReservationAppState>,
) -> Result<
    Json<ApiResponse<Vec<UserReservationsDto>>>,
    (StatusCode, Json<ApiResponse<Vec<UserReservationsDto>>>),
> {
    state
        .lifecycle
        .sweep_expired(Utc::now())
        .await
        .map_err(error_response)?;

    let users = user::Entity::find().all(&state.db).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let remaining = state
        .repos
        .reservations()
        .find_all()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(join_users(users, &remaining))))
}

#[utoipa::path(
    get,
    path = "/api/reservation-count",
    tag = "Reservations",
    responses(
        (status = 200, description = "Count of not-yet-arrived reservations", body = ApiResponse<TotalReservationsResponse>)
    )
)]
pub async fn reservation_count(
    State(state): State<ReservationAppState>,
) -> Result<
    Json<ApiResponse<TotalReservationsResponse>>,
    (StatusCode, Json<ApiResponse<TotalReservationsResponse>>),
> {
    let total_reservations = state
        .repos
        .reservations()
        .count_pending()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(TotalReservationsResponse {
        total_reservations,
    })))
}
