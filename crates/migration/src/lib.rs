//! Migrator for the banner schema.
//! Indexes are applied after the table they cover.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_banner;
mod m20240601_000002_add_banner_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_banner::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000002_add_banner_indexes::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

    async fn memory_db() -> Result<DatabaseConnection, DbErr> {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        Database::connect(opts).await
    }

    fn insert_banner(id: &str, status: &str) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO banner (id, title, image, link, status, created_at, updated_at) \
             VALUES (?, 'T', 'i.png', '/l', ?, '2024-06-01T00:00:00+00:00', '2024-06-01T00:00:00+00:00')",
            [id.into(), status.into()],
        )
    }

    #[tokio::test]
    async fn up_and_down_on_sqlite() -> Result<(), DbErr> {
        let db = memory_db().await?;
        Migrator::up(&db, None).await?;
        assert_eq!(Migrator::get_applied_migrations(&db).await?.len(), 2);

        Migrator::down(&db, None).await?;
        assert!(Migrator::get_applied_migrations(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn second_active_row_is_rejected() -> Result<(), DbErr> {
        let db = memory_db().await?;
        Migrator::up(&db, None).await?;

        db.execute(insert_banner("a", "Active")).await?;
        db.execute(insert_banner("b", "Draft")).await?;
        db.execute(insert_banner("c", "Draft")).await?;
        assert!(db.execute(insert_banner("d", "Active")).await.is_err());
        Ok(())
    }
}
