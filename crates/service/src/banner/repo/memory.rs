use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::banner::domain::{Banner, BannerPatch, BannerStatus, NewBanner};
use crate::banner::repository::{BannerRepository, WriteOutcome};
use crate::errors::ServiceError;

/// Process-local repository. A single write lock covers demotion and the
/// target write, and the `Vec` keeps insertion order for `list`.
#[derive(Default)]
pub struct InMemoryBannerRepository {
    banners: RwLock<Vec<Banner>>,
}

impl InMemoryBannerRepository {
    pub fn new() -> Self { Self::default() }
}

fn demote_others(banners: &mut [Banner], except: Option<Uuid>) -> u64 {
    let now = Utc::now();
    let mut demoted = 0;
    for b in banners.iter_mut().filter(|b| b.status.is_active() && Some(b.id) != except) {
        b.status = BannerStatus::Draft;
        b.updated_at = now;
        demoted += 1;
    }
    demoted
}

#[async_trait]
impl BannerRepository for InMemoryBannerRepository {
    async fn list(&self) -> Result<Vec<Banner>, ServiceError> {
        Ok(self.banners.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Banner>, ServiceError> {
        Ok(self.banners.read().await.iter().find(|b| b.id == id).cloned())
    }

    async fn find_active(&self) -> Result<Option<Banner>, ServiceError> {
        Ok(self.banners.read().await.iter().find(|b| b.status.is_active()).cloned())
    }

    async fn insert(&self, input: NewBanner) -> Result<WriteOutcome, ServiceError> {
        let status = input.resolved_status();
        let now = Utc::now();
        let banner = Banner {
            id: Uuid::new_v4(),
            title: input.title,
            image: input.image,
            link: input.link,
            status,
            created_at: now,
            updated_at: now,
        };
        let mut banners = self.banners.write().await;
        let demoted = if status.is_active() { demote_others(&mut banners, None) } else { 0 };
        banners.push(banner.clone());
        Ok(WriteOutcome { banner, demoted })
    }

    async fn update(&self, id: Uuid, patch: BannerPatch) -> Result<Option<WriteOutcome>, ServiceError> {
        let mut banners = self.banners.write().await;
        if !banners.iter().any(|b| b.id == id) {
            return Ok(None);
        }
        let demoted = if patch.promotes() { demote_others(&mut banners, Some(id)) } else { 0 };
        let Some(target) = banners.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title { target.title = title; }
        if let Some(image) = patch.image { target.image = image; }
        if let Some(link) = patch.link { target.link = link; }
        if let Some(status) = patch.status { target.status = status; }
        target.updated_at = Utc::now();
        Ok(Some(WriteOutcome { banner: target.clone(), demoted }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut banners = self.banners.write().await;
        let before = banners.len();
        banners.retain(|b| b.id != id);
        Ok(banners.len() != before)
    }

    fn backend_name(&self) -> &'static str { "memory" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn list_keeps_insertion_order() -> anyhow::Result<()> {
        let repo = InMemoryBannerRepository::new();
        let ids: Vec<Uuid> = {
            let mut ids = Vec::new();
            for name in ["A", "B", "C"] {
                ids.push(repo.insert(NewBanner::new(name, "x.png", "/x")).await?.banner.id);
            }
            ids
        };
        let listed: Vec<Uuid> = repo.list().await?.into_iter().map(|b| b.id).collect();
        assert_eq!(listed, ids);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_promotions_leave_one_active() -> anyhow::Result<()> {
        let repo = Arc::new(InMemoryBannerRepository::new());
        let mut ids = Vec::new();
        for i in 0..16 {
            ids.push(repo.insert(NewBanner::new(format!("B{i}"), "x.png", "/x")).await?.banner.id);
        }

        let handles: Vec<_> = ids
            .iter()
            .map(|&id| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.update(id, BannerPatch::status(BannerStatus::Active)).await })
            })
            .collect();
        for h in handles {
            h.await??;
        }

        let active = repo.list().await?.into_iter().filter(|b| b.status.is_active()).count();
        assert_eq!(active, 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_none() -> anyhow::Result<()> {
        let repo = InMemoryBannerRepository::new();
        let a = repo.insert(NewBanner::new("A", "a.png", "/a").with_status(BannerStatus::Active)).await?.banner;
        assert!(repo.update(Uuid::new_v4(), BannerPatch::status(BannerStatus::Active)).await?.is_none());
        assert_eq!(repo.find_active().await?.map(|b| b.id), Some(a.id));
        Ok(())
    }
}
