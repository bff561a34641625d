use sea_orm_migration::prelude::*;

/// Partial unique index: the database refuses a second `Active` row even if
/// two promotions race past the service layer.
const SINGLE_ACTIVE_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS uniq_banner_single_active ON banner (status) WHERE status = 'Active'";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Banner: lookups by status (active banner read path)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_banner_status")
                    .table(Banner::Table)
                    .col(Banner::Status)
                    .to_owned(),
            )
            .await?;

        // Banner: stable listing order
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_banner_created_at")
                    .table(Banner::Table)
                    .col(Banner::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Postgres and SQLite share the partial index syntax.
        manager
            .get_connection()
            .execute_unprepared(SINGLE_ACTIVE_INDEX)
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        for index in ["uniq_banner_single_active", "idx_banner_created_at", "idx_banner_status"] {
            conn.execute_unprepared(&format!("DROP INDEX IF EXISTS {index}")).await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Banner { Table, Status, CreatedAt }
