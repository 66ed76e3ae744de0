//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::{
    ApiResponse, CountResponse, HistoryRecordDto, LicenseDto, ReservationDto, UserDto,
};
use crate::api::handlers::{admins, auth, gate, health, reports, reservations, slots, users};
use crate::api::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use crate::application::services::{LifecycleService, OccupancyService, ReportingService};
use crate::domain::RepositoryProvider;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Admin accounts
        auth::login,
        auth::register,
        admins::get_admin_profile,
        admins::list_admins,
        admins::delete_admin,
        admins::admin_count,
        admins::edit_profile,
        // Users
        users::list_users,
        users::verify_user,
        users::user_count,
        // Parking slots & occupancy
        slots::add_slots,
        slots::list_slots,
        slots::delete_slot,
        slots::slot_statuses,
        slots::available_count,
        slots::available_total,
        slots::occupied_count,
        // Reservations
        reservations::create_reservation,
        reservations::list_slot_assignments,
        reservations::pending_with_users,
        reservations::parked,
        reservations::reservation_count,
        // Lifecycle gate
        gate::validate_entry,
        gate::validate_exit,
        // Reports
        reports::archive_history,
        reports::history_with_users,
        reports::total_revenue,
        reports::charts,
        reports::statistics,
        reports::statistics_chart,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            CountResponse,
            ReservationDto,
            HistoryRecordDto,
            UserDto,
            LicenseDto,
            // Health
            health::HealthResponse,
            // Admin accounts
            auth::RegisterRequest,
            auth::AdminInfo,
            auth::LoginRequest,
            auth::LoginResponse,
            admins::AdminProfileDto,
            admins::AdminAddressDto,
            admins::AdminSummaryDto,
            admins::UpdateProfileRequest,
            // Users
            users::VerifyUserRequest,
            // Parking slots
            slots::AddSlotsRequest,
            slots::AddSlotsResponse,
            slots::SlotDto,
            slots::SlotStatusDto,
            slots::AvailableCountResponse,
            slots::TotalAvailableResponse,
            slots::OccupiedCountResponse,
            // Reservations
            reservations::CreateReservationRequest,
            reservations::SlotAssignmentDto,
            reservations::UserReservationsDto,
            reservations::TotalReservationsResponse,
            // Reports
            reports::ArchiveResponse,
            reports::UserHistoryDto,
            reports::TotalRevenueResponse,
            reports::MonthlyCountDto,
            reports::MonthlyPriceDto,
            reports::ChartsResponse,
            reports::WindowDto,
            reports::StatisticsResponse,
            reports::CategoryBreakdownDto,
        )
    ),
    tags(
        (name = "Health", description = "Liveness probe for uptime monitoring."),
        (name = "Admin Accounts", description = "Back-office accounts: registration, login (bcrypt), profile CRUD. No token model — callers identify themselves by plain username parameters; superadmin checks re-fetch the caller's own record."),
        (name = "Users", description = "Driver accounts registered via the client app: listing with verified filter, license verification, counts."),
        (name = "Parking Slots", description = "Slot CRUD and the derived occupancy view. Occupancy is recomputed per request by joining slots with active reservations; the stored availability flag is not consulted."),
        (name = "Reservations", description = "Booking and reservation views. The parked-vehicles query sweeps expired no-shows before responding."),
        (name = "Lifecycle Gate", description = "Entry and exit token validation driving the reservation state machine. A reused entry ticket and an unknown one fail with distinct messages."),
        (name = "Reports", description = "History archival and read-side aggregations: monthly buckets, day/week/month/year windows (server-local calendar, week starts Sunday), per-category revenue."),
    ),
    info(
        title = "ParkPoint API",
        version = "1.0.0",
        description = "REST API for parking-lot reservation management: slots, reservations, \
occupancy and revenue statistics.

## Response format

Every endpoint wraps its payload in a standard envelope:
```json
{\"success\": true, \"data\": {...}}
```

On failure:
```json
{\"success\": false, \"error\": \"description\"}
```
",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    db: DatabaseConnection,
    lifecycle: Arc<LifecycleService>,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let occupancy = Arc::new(OccupancyService::new(repos.clone()));
    let reporting = Arc::new(ReportingService::new(repos.clone()));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Admin account routes
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .with_state(auth::AuthHandlerState { db: db.clone() });

    let admin_routes = Router::new()
        .route("/admin", get(admins::get_admin_profile))
        .route("/admin-list", get(admins::list_admins))
        .route("/delete-admin", delete(admins::delete_admin))
        .route("/admin-count", get(admins::admin_count))
        .route("/edit-profile", put(admins::edit_profile))
        .with_state(admins::AdminHandlerState { db: db.clone() });

    // User routes
    let user_routes = Router::new()
        .route("/user-list", get(users::list_users))
        .route("/verify-user", put(users::verify_user))
        .route("/user-count", get(users::user_count))
        .with_state(users::UserHandlerState { db: db.clone() });

    // Slot & occupancy routes
    let slot_routes = Router::new()
        .route("/add-slot", post(slots::add_slots))
        .route("/get-parking-slots", get(slots::list_slots))
        .route("/delete-parking-slot", delete(slots::delete_slot))
        .route("/parking-slots-info", get(slots::slot_statuses))
        // legacy alias used by the kiosk frontend
        .route("/api/parkingslot", get(slots::slot_statuses))
        .route("/available-parking-slots-count", get(slots::available_count))
        .route("/available-parking-slots-total", get(slots::available_total))
        .route("/occupied-slots-count", get(slots::occupied_count))
        .with_state(slots::SlotAppState {
            repos: repos.clone(),
            occupancy,
        });

    // Reservation routes
    let reservation_routes = Router::new()
        .route("/api/reservations", post(reservations::create_reservation))
        .route("/reservations", get(reservations::list_slot_assignments))
        .route("/api/data", get(reservations::pending_with_users))
        .route("/api/parked", get(reservations::parked))
        .route("/api/reservation-count", get(reservations::reservation_count))
        .with_state(reservations::ReservationAppState {
            db: db.clone(),
            repos: repos.clone(),
            lifecycle: lifecycle.clone(),
        });

    // Lifecycle gate routes
    let gate_routes = Router::new()
        .route("/api/validate-id/{id}", get(gate::validate_entry))
        .route("/api/validate-exit-id/{exit_id}", get(gate::validate_exit))
        .with_state(gate::GateAppState {
            lifecycle: lifecycle.clone(),
        });

    // Report routes
    let report_routes = Router::new()
        .route("/reservation/history", get(reports::archive_history))
        .route("/api/reservation-history", get(reports::history_with_users))
        .route("/api/reservations/total-revenue", get(reports::total_revenue))
        .route("/api/charts", get(reports::charts))
        .route("/api/statistics", get(reports::statistics))
        .route("/api/statistics-chart", get(reports::statistics_chart))
        .with_state(reports::ReportAppState {
            db,
            lifecycle,
            reporting,
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: prometheus_handle,
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .merge(auth_routes)
        .merge(admin_routes)
        .merge(user_routes)
        .merge(slot_routes)
        .merge(reservation_routes)
        .merge(gate_routes)
        .merge(report_routes)
        .merge(metrics_routes)
        // Middleware
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
