use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::debug;
use uuid::Uuid;

use models::banner;

use crate::banner::domain::{Banner, BannerPatch, NewBanner};
use crate::banner::repository::{BannerRepository, WriteOutcome};
use crate::errors::ServiceError;

/// SeaORM-backed repository. Demotion and the target write share one transaction;
/// the `uniq_banner_single_active` index rejects whichever of two racing
/// promotions commits second.
pub struct SeaOrmBannerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmBannerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl BannerRepository for SeaOrmBannerRepository {
    async fn list(&self) -> Result<Vec<Banner>, ServiceError> {
        let rows = banner::list(&self.db).await?;
        Ok(rows.into_iter().map(Banner::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Banner>, ServiceError> {
        Ok(banner::find_by_id(&self.db, id).await?.map(Banner::from))
    }

    async fn find_active(&self) -> Result<Option<Banner>, ServiceError> {
        Ok(banner::find_active(&self.db).await?.map(Banner::from))
    }

    async fn insert(&self, input: NewBanner) -> Result<WriteOutcome, ServiceError> {
        let status = input.resolved_status();
        let txn = self.db.begin().await?;
        let demoted = if status.is_active() { banner::demote_active(&txn, None).await? } else { 0 };
        let created = banner::create(&txn, &input.title, &input.image, &input.link, status).await?;
        txn.commit().await?;
        debug!(banner_id = %created.id, demoted, "banner row inserted");
        Ok(WriteOutcome { banner: created.into(), demoted })
    }

    async fn update(&self, id: Uuid, patch: BannerPatch) -> Result<Option<WriteOutcome>, ServiceError> {
        let txn = self.db.begin().await?;
        // Dropping `txn` on the early return rolls it back.
        let Some(existing) = banner::find_by_id(&txn, id).await? else {
            return Ok(None);
        };
        let demoted = if patch.promotes() { banner::demote_active(&txn, Some(id)).await? } else { 0 };
        let updated = banner::update_fields(
            &txn,
            existing,
            patch.title.as_deref(),
            patch.image.as_deref(),
            patch.link.as_deref(),
            patch.status,
        )
        .await?;
        txn.commit().await?;
        debug!(banner_id = %id, demoted, "banner row updated");
        Ok(Some(WriteOutcome { banner: updated.into(), demoted }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(banner::delete(&self.db, id).await?)
    }

    fn backend_name(&self) -> &'static str { "database" }
}
