//! Lifecycle gate handlers
//!
//! Entry and exit validation for the physical gates. Failure messages
//! are distinct so a kiosk can tell a reused ticket ("already been
//! used", 400) from an invalid one ("not found", 404).

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::error_response;
use crate::api::dto::{ApiResponse, ReservationDto};
use crate::application::services::LifecycleService;

/// Gate handler state
#[derive(Clone)]
pub struct GateAppState {
    pub lifecycle: Arc<LifecycleService>,
}

#[utoipa::path(
    get,
    path = "/api/validate-id/{id}",
    tag = "Lifecycle Gate",
    params(("id" = String, Path, description = "Reservation id (entry token)")),
    responses(
        (status = 200, description = "Ticket accepted, arrival recorded", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Malformed id, or ticket already used"),
        (status = 404, description = "No such reservation")
    )
)]
pub async fn validate_entry(
    State(state): State<GateAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .lifecycle
        .validate_entry(&id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(ReservationDto::from(&reservation))))
}

#[utoipa::path(
    get,
    path = "/api/validate-exit-id/{exit_id}",
    tag = "Lifecycle Gate",
    params(("exit_id" = String, Path, description = "Exit token")),
    responses(
        (status = 200, description = "Exit accepted; returns the closed reservation", body = ApiResponse<ReservationDto>),
        (status = 404, description = "No reservation with this exit token")
    )
)]
pub async fn validate_exit(
    State(state): State<GateAppState>,
    Path(exit_id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .lifecycle
        .validate_exit(&exit_id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(ReservationDto::from(&reservation))))
}
