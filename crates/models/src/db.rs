use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sea_orm::sqlx::ConnectOptions as _;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, SqlxSqliteConnector};
use tracing::info;

/// Connect using pool settings from `[database]`.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    if cfg.url.contains(":memory:") {
        return connect_sqlite_in_memory(cfg).await;
    }
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    info!(max_connections = cfg.max_connections, "database pool ready");
    Ok(db)
}

/// An in-memory SQLite database lives exactly as long as its one connection,
/// so the pool holds a single connection that is never reaped or recycled.
/// The configured idle timeout and max lifetime do not apply here.
async fn connect_sqlite_in_memory(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts: SqliteConnectOptions = cfg.url.parse()?;
    if !cfg.sqlx_logging {
        opts = opts.disable_statement_logging();
    }
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(opts)
        .await?;
    info!("in-memory sqlite ready, single pinned connection");
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// Fresh migrated in-memory SQLite database, one per call.
pub async fn connect_sqlite_memory() -> anyhow::Result<DatabaseConnection> {
    use migration::MigratorTrait;

    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), min_connections: 1, ..DatabaseConfig::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
