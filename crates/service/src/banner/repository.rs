use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Banner, BannerPatch, NewBanner};
use crate::errors::ServiceError;

/// Result of a write, with how many other banners were demoted to make room.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOutcome {
    pub banner: Banner,
    pub demoted: u64,
}

/// Storage port for banners.
///
/// Writes that leave a banner `Active` must demote every other `Active`
/// banner within the same atomic unit as the write itself, so no reader can
/// observe two active banners once the call has returned.
#[async_trait]
pub trait BannerRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Banner>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Banner>, ServiceError>;
    async fn find_active(&self) -> Result<Option<Banner>, ServiceError>;
    /// `input` is already normalized by the service.
    async fn insert(&self, input: NewBanner) -> Result<WriteOutcome, ServiceError>;
    /// `Ok(None)` when `id` does not exist; nothing is demoted in that case.
    async fn update(&self, id: Uuid, patch: BannerPatch) -> Result<Option<WriteOutcome>, ServiceError>;
    /// Hard delete; returns whether a row existed.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;

    fn backend_name(&self) -> &'static str;
}

/// Test doubles.
pub mod mock {
    use super::*;

    /// Repository whose backing store is down: every call fails with `Db`.
    #[derive(Debug, Default, Clone)]
    pub struct UnavailableBannerRepository;

    fn unavailable() -> ServiceError {
        ServiceError::Db("connection refused: banner storage unavailable".into())
    }

    #[async_trait]
    impl BannerRepository for UnavailableBannerRepository {
        async fn list(&self) -> Result<Vec<Banner>, ServiceError> { Err(unavailable()) }
        async fn get(&self, _id: Uuid) -> Result<Option<Banner>, ServiceError> { Err(unavailable()) }
        async fn find_active(&self) -> Result<Option<Banner>, ServiceError> { Err(unavailable()) }
        async fn insert(&self, _input: NewBanner) -> Result<WriteOutcome, ServiceError> { Err(unavailable()) }
        async fn update(&self, _id: Uuid, _patch: BannerPatch) -> Result<Option<WriteOutcome>, ServiceError> { Err(unavailable()) }
        async fn delete(&self, _id: Uuid) -> Result<bool, ServiceError> { Err(unavailable()) }

        fn backend_name(&self) -> &'static str { "unavailable" }
    }
}
