use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::domain::{Banner, BannerPatch, NewBanner};
use super::repository::BannerRepository;
use crate::errors::ServiceError;

/// Application service for banners.
///
/// Validates input and maps repository answers onto `NotFound`; the
/// repository performs demotion and the target write atomically, so at most
/// one banner is `Active` after every call returns.
pub struct BannerService<R: BannerRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: BannerRepository + ?Sized> BannerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub fn backend_name(&self) -> &'static str { self.repo.backend_name() }

    /// Create a banner; `status` defaults to `Draft`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::banner::{BannerService, BannerStatus, NewBanner, repo::InMemoryBannerRepository};
    /// let svc = BannerService::new(Arc::new(InMemoryBannerRepository::new()));
    /// let banner = tokio_test::block_on(svc.create(NewBanner::new("Summer", "s.png", "/summer"))).unwrap();
    /// assert_eq!(banner.status, BannerStatus::Draft);
    /// ```
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: NewBanner) -> Result<Banner, ServiceError> {
        let input = input.normalized()?;
        let out = self.repo.insert(input).await?;
        info!(
            banner_id = %out.banner.id,
            status = out.banner.status.as_str(),
            demoted = out.demoted,
            "banner_created"
        );
        Ok(out.banner)
    }

    pub async fn list(&self) -> Result<Vec<Banner>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Banner, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("banner"))
    }

    /// Apply a partial update. Promoting to `Active` demotes every other active banner.
    #[instrument(skip(self, patch), fields(banner_id = %id))]
    pub async fn update(&self, id: Uuid, patch: BannerPatch) -> Result<Banner, ServiceError> {
        let patch = patch.normalized()?;
        if patch.is_empty() {
            debug!("empty patch, returning current banner");
            return self.get(id).await;
        }
        let Some(out) = self.repo.update(id, patch).await? else {
            warn!("update for unknown banner");
            return Err(ServiceError::not_found("banner"));
        };
        info!(
            status = out.banner.status.as_str(),
            demoted = out.demoted,
            "banner_updated"
        );
        Ok(out.banner)
    }

    /// Hard delete. Deleting the active banner leaves no banner active.
    #[instrument(skip(self), fields(banner_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("banner"));
        }
        info!("banner_deleted");
        Ok(())
    }

    /// The active banner, if any. Absence is not an error.
    pub async fn find_active(&self) -> Result<Option<Banner>, ServiceError> {
        self.repo.find_active().await
    }
}
