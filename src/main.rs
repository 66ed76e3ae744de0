//!
//! ParkPoint central backend: REST API for parking-lot reservation
//! management. Reads configuration from a TOML file
//! (~/.config/parkpoint/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use parkpoint::application::services::expiry_sweep::start_expiry_sweep_task;
use parkpoint::application::services::LifecycleService;
use parkpoint::config::AppConfig;
use parkpoint::infrastructure::database::migrator::Migrator;
use parkpoint::support::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use parkpoint::{
    create_api_router, default_config_path, init_database, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("PARKPOINT_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting ParkPoint central backend...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("📊 Prometheus metrics recorder installed");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Create default superadmin if no admin exists
    create_default_admin(&db, &app_cfg).await;

    // ── Repositories & services ────────────────────────────────
    let repos: Arc<dyn parkpoint::domain::RepositoryProvider> =
        Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let lifecycle = Arc::new(LifecycleService::new(repos.clone()));

    // ── Shutdown coordination ──────────────────────────────────
    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    // ── Background no-show sweep ───────────────────────────────
    if app_cfg.lifecycle.background_sweep {
        start_expiry_sweep_task(
            lifecycle.clone(),
            shutdown.clone(),
            app_cfg.lifecycle.sweep_interval_secs,
        );
    } else {
        warn!("Background no-show sweep disabled; expired bookings are only removed by the parked-vehicles query");
    }

    // ── REST API server ────────────────────────────────────────
    let api_router = create_api_router(repos, db.clone(), lifecycle, prometheus_handle);

    let api_addr = format!("{}:{}", app_cfg.server.api_host, app_cfg.server.api_port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    let api_shutdown = shutdown.clone();
    axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        })
        .await?;

    // Perform final cleanup
    info!("🧹 Performing final cleanup...");

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("✅ Database connection closed");
    }

    info!("👋 ParkPoint shutdown complete");
    Ok(())
}

/// Create default superadmin if no admin account exists
async fn create_default_admin(db: &sea_orm::DatabaseConnection, app_cfg: &AppConfig) {
    use parkpoint::infrastructure::crypto::password::hash_password;
    use parkpoint::infrastructure::database::entities::admin;
    use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

    let admin_count = admin::Entity::find().count(db).await.unwrap_or(0);

    if admin_count == 0 {
        info!("Creating default superadmin...");

        let password_hash = match hash_password(&app_cfg.admin.password) {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to hash admin password: {}", e);
                return;
            }
        };

        let superadmin = admin::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            first_name: Set(app_cfg.admin.first_name.clone()),
            middle_initial: Set(None),
            last_name: Set(app_cfg.admin.last_name.clone()),
            bio: Set(None),
            email: Set(app_cfg.admin.email.clone()),
            password_hash: Set(password_hash),
            phone: Set(None),
            tin_id: Set(None),
            country: Set(None),
            zip_code: Set(None),
            address: Set(None),
            username: Set(app_cfg.admin.username.clone()),
            is_superadmin: Set(true),
            created_at: Set(chrono::Utc::now()),
        };

        match superadmin.insert(db).await {
            Ok(_) => {
                info!("Default superadmin created: {}", app_cfg.admin.email);
                info!("⚠️  Please change the admin password immediately!");
            }
            Err(e) => {
                error!("Failed to create superadmin: {}", e);
            }
        }
    }
}
