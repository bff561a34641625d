use std::{future::Future, sync::Arc};

use configs::{AppConfig, LogFormat, StorageBackend};
use migration::MigratorTrait;
use service::banner::{
    repo::{InMemoryBannerRepository, SeaOrmBannerRepository},
    BannerRepository,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::{errors::StartupError, routes, state::ServerState};

pub fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => common::utils::logging::init_logging_default(),
        LogFormat::Json => common::utils::logging::init_logging_json(),
    }
}

fn build_cors() -> CorsLayer {
    // the storefront is served from other origins
    CorsLayer::very_permissive()
}

pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Pick the banner repository for the configured backend. The database
/// backend is migrated before it is handed out.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let repo: Arc<dyn BannerRepository> = match cfg.storage.backend {
        StorageBackend::Memory => {
            warn!("banner storage is in-memory; all banners are lost on restart");
            Arc::new(InMemoryBannerRepository::new())
        }
        StorageBackend::Database => {
            common::env::ensure_database_dir(&cfg.database.url).await?;
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Database(e.to_string()))?;
            migration::Migrator::up(&db, None)
                .await
                .map_err(|e| StartupError::Database(format!("migrations failed: {e}")))?;
            info!("migrations applied");
            Arc::new(SeaOrmBannerRepository::new(db))
        }
    };
    let state = ServerState::new(repo);
    info!(backend = state.banners.backend_name(), "banner storage ready");
    Ok(state)
}

/// Resolves on Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, draining connections");
}

/// Build the app for `cfg` and serve until `shutdown` resolves.
pub async fn serve<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = build_state(&cfg).await?;
    let app = routes::build_router(state, build_cors());

    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "checkout banners listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}
