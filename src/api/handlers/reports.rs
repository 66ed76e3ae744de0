//! Reporting handlers: archival, history views, revenue and statistics.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Local, Utc};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::error_response;
use crate::api::dto::{ApiResponse, HistoryRecordDto, ReservationDto, UserDto};
use crate::application::services::reporting::WindowStats;
use crate::application::services::{LifecycleService, ReportingService};
use crate::domain::slot::VehicleCategory;
use crate::infrastructure::database::entities::user;

/// Report handler state
#[derive(Clone)]
pub struct ReportAppState {
    pub db: sea_orm::DatabaseConnection,
    pub lifecycle: Arc<LifecycleService>,
    pub reporting: Arc<ReportingService>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArchiveResponse {
    pub message: String,
    pub reservations: Vec<ReservationDto>,
}

/// A user together with their history records
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserHistoryDto {
    pub user: UserDto,
    pub reservations: Vec<HistoryRecordDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TotalRevenueResponse {
    pub total_revenue: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MonthlyCountDto {
    /// Calendar month 1–12, pooled across years
    pub month: u32,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MonthlyPriceDto {
    pub month: u32,
    pub total_price: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChartsResponse {
    pub reservation_count: Vec<MonthlyCountDto>,
    pub total_reservation_price: Vec<MonthlyPriceDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WindowDto {
    pub count: u64,
    pub revenue: f64,
}

impl From<WindowStats> for WindowDto {
    fn from(w: WindowStats) -> Self {
        Self {
            count: w.count,
            revenue: w.revenue,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatisticsResponse {
    pub daily: WindowDto,
    pub weekly: WindowDto,
    pub monthly: WindowDto,
    pub yearly: WindowDto,
    pub total: WindowDto,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StatisticsChartParams {
    /// Restrict to one category; omit for all
    pub vehicle_category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryBreakdownDto {
    pub vehicle_category: String,
    pub total_price: f64,
    pub reservations: Vec<HistoryRecordDto>,
}

/// Snapshot every active reservation into history (idempotent by
/// natural-key match) and return the active set.
#[utoipa::path(
    get,
    path = "/reservation/history",
    tag = "Reports",
    responses(
        (status = 200, description = "Active reservations; new ones archived", body = ApiResponse<ArchiveResponse>),
        (status = 404, description = "No reservations to archive")
    )
)]
pub async fn archive_history(
    State(state): State<ReportAppState>,
) -> Result<Json<ApiResponse<ArchiveResponse>>, (StatusCode, Json<ApiResponse<ArchiveResponse>>)> {
    let (reservations, newly_archived) = state
        .lifecycle
        .archive_all(Utc::now())
        .await
        .map_err(error_response)?;

    if reservations.is_empty() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("No reservations to archive")),
        ));
    }

    let dtos: Vec<ReservationDto> = reservations.iter().map(ReservationDto::from).collect();

    Ok(Json(ApiResponse::success(ArchiveResponse {
        message: format!("{} new reservation(s) saved to history", newly_archived),
        reservations: dtos,
    })))
}

/// Users joined with their archived reservations.
#[utoipa::path(
    get,
    path = "/api/reservation-history",
    tag = "Reports",
    responses(
        (status = 200, description = "Users with history records", body = ApiResponse<Vec<UserHistoryDto>>)
    )
)]
pub async fn history_with_users(
    State(state): State<ReportAppState>,
) -> Result<
    Json<ApiResponse<Vec<UserHistoryDto>>>,
    (StatusCode, Json<ApiResponse<Vec<UserHistoryDto>>>),
> {
    let users = user::Entity::find().all(&state.db).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let records = state
        .reporting
        .all_records()
        .await
        .map_err(error_response)?;

    let joined: Vec<UserHistoryDto> = users
        .into_iter()
        .map(|u| {
            let owned: Vec<HistoryRecordDto> = records
                .iter()
                .filter(|r| r.owner_id == u.email)
                .map(HistoryRecordDto::from)
                .collect();
            UserHistoryDto {
                user: UserDto::from(u),
                reservations: owned,
            }
        })
        .collect();

    Ok(Json(ApiResponse::success(joined)))
}

#[utoipa::path(
    get,
    path = "/api/reservations/total-revenue",
    tag = "Reports",
    responses(
        (status = 200, description = "All-time revenue", body = ApiResponse<TotalRevenueResponse>),
        (status = 404, description = "No revenue data")
    )
)]
pub async fn total_revenue(
    State(state): State<ReportAppState>,
) -> Result<
    Json<ApiResponse<TotalRevenueResponse>>,
    (StatusCode, Json<ApiResponse<TotalRevenueResponse>>),
> {
    let revenue = state
        .reporting
        .total_revenue()
        .await
        .map_err(error_response)?;

    let Some(total_revenue) = revenue else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("No revenue data found")),
        ));
    };

    Ok(Json(ApiResponse::success(TotalRevenueResponse {
        total_revenue,
    })))
}

/// Monthly reservation counts and revenue for the dashboard charts.
#[utoipa::path(
    get,
    path = "/api/charts",
    tag = "Reports",
    responses(
        (status = 200, description = "Monthly buckets", body = ApiResponse<ChartsResponse>)
    )
)]
pub async fn charts(
    State(state): State<ReportAppState>,
) -> Result<Json<ApiResponse<ChartsResponse>>, (StatusCode, Json<ApiResponse<ChartsResponse>>)> {
    let buckets = state
        .reporting
        .monthly_buckets()
        .await
        .map_err(error_response)?;

    let reservation_count = buckets
        .iter()
        .map(|b| MonthlyCountDto {
            month: b.month,
            count: b.count,
        })
        .collect();
    let total_reservation_price = buckets
        .iter()
        .map(|b| MonthlyPriceDto {
            month: b.month,
            total_price: b.total_price,
        })
        .collect();

    Ok(Json(ApiResponse::success(ChartsResponse {
        reservation_count,
        total_reservation_price,
    })))
}

/// Windowed statistics in the server's local calendar (week starts
/// Sunday).
#[utoipa::path(
    get,
    path = "/api/statistics",
    tag = "Reports",
    responses(
        (status = 200, description = "Day/week/month/year/total statistics", body = ApiResponse<StatisticsResponse>)
    )
)]
pub async fn statistics(
    State(state): State<ReportAppState>,
) -> Result<
    Json<ApiResponse<StatisticsResponse>>,
    (StatusCode, Json<ApiResponse<StatisticsResponse>>),
> {
    let report = state
        .reporting
        .statistics(Local::now())
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(StatisticsResponse {
        daily: report.daily.into(),
        weekly: report.weekly.into(),
        monthly: report.monthly.into(),
        yearly: report.yearly.into(),
        total: report.total.into(),
    })))
}

#[utoipa::path(
    get,
    path = "/api/statistics-chart",
    tag = "Reports",
    params(StatisticsChartParams),
    responses(
        (status = 200, description = "Per-category revenue breakdown", body = ApiResponse<Vec<CategoryBreakdownDto>>),
        (status = 400, description = "Unknown vehicle category")
    )
)]
pub async fn statistics_chart(
    State(state): State<ReportAppState>,
    Query(params): Query<StatisticsChartParams>,
) -> Result<
    Json<ApiResponse<Vec<CategoryBreakdownDto>>>,
    (StatusCode, Json<ApiResponse<Vec<CategoryBreakdownDto>>>),
> {
    let filter = match params.vehicle_category {
        Some(ref raw) => match VehicleCategory::parse(raw) {
            Some(category) => Some(category),
            None => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(format!(
                        "Unknown vehicle category '{}'",
                        raw
                    ))),
                ));
            }
        },
        None => None,
    };

    let groups = state
        .reporting
        .category_breakdown(filter)
        .await
        .map_err(error_response)?;

    let dtos: Vec<CategoryBreakdownDto> = groups
        .into_iter()
        .map(|g| CategoryBreakdownDto {
            vehicle_category: g.vehicle_category.as_str().to_string(),
            total_price: g.total_price,
            reservations: g.records.iter().map(HistoryRecordDto::from).collect(),
        })
        .collect();

    Ok(Json(ApiResponse::success(dtos)))
}
