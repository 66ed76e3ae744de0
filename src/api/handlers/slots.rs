//! Parking slot and occupancy handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::error_response;
use crate::api::dto::ApiResponse;
use crate::api::validated_json::ValidatedJson;
use crate::application::services::OccupancyService;
use crate::domain::occupancy::SlotStatus;
use crate::domain::slot::{next_slot_numbers, Slot, VehicleCategory};
use crate::domain::RepositoryProvider;

/// Slot handler state
#[derive(Clone)]
pub struct SlotAppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub occupancy: Arc<OccupancyService>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddSlotsRequest {
    /// How many slots to add
    #[validate(range(min = 1, max = 500))]
    pub count: u32,
    /// "motorcycle" or "car"
    pub vehicle_category: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddSlotsResponse {
    pub message: String,
    pub slot_numbers: Vec<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SlotDto {
    pub slot_number: i32,
    pub vehicle_category: String,
    pub is_available: bool,
}

impl From<&Slot> for SlotDto {
    fn from(s: &Slot) -> Self {
        Self {
            slot_number: s.slot_number,
            vehicle_category: s.vehicle_category.as_str().to_string(),
            is_available: s.is_available,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DeleteSlotParams {
    pub slot_number: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SlotStatusDto {
    pub slot_number: i32,
    /// "occupied" or "available"
    pub status: String,
    pub vehicle_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrived: Option<bool>,
}

impl From<SlotStatus> for SlotStatusDto {
    fn from(s: SlotStatus) -> Self {
        Self {
            slot_number: s.slot_number,
            status: s.status.as_str().to_string(),
            vehicle_category: s.vehicle_category.as_str().to_string(),
            reservation_id: s.reservation_id,
            arrived: s.arrived,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailableCountResponse {
    pub available_motorcycle_slots: u32,
    pub available_car_slots: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TotalAvailableResponse {
    pub total_available_slots: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OccupiedCountResponse {
    /// Vehicle category → number of physically parked vehicles
    pub occupied_slots: BTreeMap<String, u64>,
}

#[utoipa::path(
    post,
    path = "/add-slot",
    tag = "Parking Slots",
    request_body = AddSlotsRequest,
    responses(
        (status = 201, description = "Slots created", body = ApiResponse<AddSlotsResponse>),
        (status = 400, description = "Unknown vehicle category or bad count")
    )
)]
pub async fn add_slots(
    State(state): State<SlotAppState>,
    ValidatedJson(request): ValidatedJson<AddSlotsRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<AddSlotsResponse>>),
    (StatusCode, Json<ApiResponse<AddSlotsResponse>>),
> {
    let Some(category) = VehicleCategory::parse(&request.vehicle_category) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Unknown vehicle category '{}'",
                request.vehicle_category
            ))),
        ));
    };

    let existing: Vec<i32> = state
        .repos
        .slots()
        .find_all()
        .await
        .map_err(error_response)?
        .iter()
        .map(|s| s.slot_number)
        .collect();

    let numbers = next_slot_numbers(&existing, request.count);
    let slots: Vec<Slot> = numbers.iter().map(|n| Slot::new(*n, category)).collect();

    state
        .repos
        .slots()
        .save_many(slots)
        .await
        .map_err(error_response)?;

    let message = format!(
        "{} {} parking slot(s) added starting from slot {}",
        request.count,
        category,
        numbers.first().copied().unwrap_or(0)
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AddSlotsResponse {
            message,
            slot_numbers: numbers,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/get-parking-slots",
    tag = "Parking Slots",
    responses(
        (status = 200, description = "All parking slots", body = ApiResponse<Vec<SlotDto>>)
    )
)]
pub async fn list_slots(
    State(state): State<SlotAppState>,
) -> Result<Json<ApiResponse<Vec<SlotDto>>>, (StatusCode, Json<ApiResponse<Vec<SlotDto>>>)> {
    let slots = state
        .repos
        .slots()
        .find_all()
        .await
        .map_err(error_response)?;

    let dtos: Vec<SlotDto> = slots.iter().map(SlotDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    delete,
    path = "/delete-parking-slot",
    tag = "Parking Slots",
    params(DeleteSlotParams),
    responses(
        (status = 200, description = "Slot deleted"),
        (status = 400, description = "Slot number missing"),
        (status = 404, description = "Slot not found")
    )
)]
pub async fn delete_slot(
    State(state): State<SlotAppState>,
    Query(params): Query<DeleteSlotParams>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(slot_number) = params.slot_number else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Slot number is required")),
        ));
    };

    let deleted = state
        .repos
        .slots()
        .delete_by_number(slot_number)
        .await
        .map_err(error_response)?;

    if deleted.is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Parking slot not found")),
        ));
    }

    Ok(Json(ApiResponse::success(())))
}

/// Occupancy view; also served on the `/api/parkingslot` alias.
#[utoipa::path(
    get,
    path = "/parking-slots-info",
    tag = "Parking Slots",
    responses(
        (status = 200, description = "Per-slot occupancy view", body = ApiResponse<Vec<SlotStatusDto>>)
    )
)]
pub async fn slot_statuses(
    State(state): State<SlotAppState>,
) -> Result<
    Json<ApiResponse<Vec<SlotStatusDto>>>,
    (StatusCode, Json<ApiResponse<Vec<SlotStatusDto>>>),
> {
    let statuses = state
        .occupancy
        .slot_statuses()
        .await
        .map_err(error_response)?;

    let dtos: Vec<SlotStatusDto> = statuses.into_iter().map(SlotStatusDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/available-parking-slots-count",
    tag = "Parking Slots",
    responses(
        (status = 200, description = "Available slots per category", body = ApiResponse<AvailableCountResponse>)
    )
)]
pub async fn available_count(
    State(state): State<SlotAppState>,
) -> Result<
    Json<ApiResponse<AvailableCountResponse>>,
    (StatusCode, Json<ApiResponse<AvailableCountResponse>>),
> {
    let summary = state
        .occupancy
        .availability()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(AvailableCountResponse {
        available_motorcycle_slots: summary.available_motorcycle_slots,
        available_car_slots: summary.available_car_slots,
    })))
}

#[utoipa::path(
    get,
    path = "/available-parking-slots-total",
    tag = "Parking Slots",
    responses(
        (status = 200, description = "Total available slots", body = ApiResponse<TotalAvailableResponse>)
    )
)]
pub async fn available_total(
    State(state): State<SlotAppState>,
) -> Result<
    Json<ApiResponse<TotalAvailableResponse>>,
    (StatusCode, Json<ApiResponse<TotalAvailableResponse>>),
> {
    let summary = state
        .occupancy
        .availability()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(TotalAvailableResponse {
        total_available_slots: summary.total_available_slots,
    })))
}

#[utoipa::path(
    get,
    path = "/occupied-slots-count",
    tag = "Parking Slots",
    responses(
        (status = 200, description = "Parked vehicles per category", body = ApiResponse<OccupiedCountResponse>)
    )
)]
pub async fn occupied_count(
    State(state): State<SlotAppState>,
) -> Result<
    Json<ApiResponse<OccupiedCountResponse>>,
    (StatusCode, Json<ApiResponse<OccupiedCountResponse>>),
> {
    let counts = state
        .occupancy
        .occupied_counts()
        .await
        .map_err(error_response)?;

    let occupied_slots: BTreeMap<String, u64> = counts
        .into_iter()
        .map(|(category, count)| (category.as_str().to_string(), count))
        .collect();

    Ok(Json(ApiResponse::success(OccupiedCountResponse {
        occupied_slots,
    })))
}
