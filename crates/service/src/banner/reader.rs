use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::Banner;
use super::repository::BannerRepository;
use super::service::BannerService;
use crate::errors::ServiceError;

/// Body of the public active-banner endpoint: `{"activeBanner": <banner|null>}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveBannerResponse {
    #[serde(rename = "activeBanner")]
    pub active_banner: Option<Banner>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    Hit,
    Empty,
    /// Storage failed and the response was degraded to "no banner".
    Degraded,
}

impl ReadOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadOutcome::Hit => "hit",
            ReadOutcome::Empty => "empty",
            ReadOutcome::Degraded => "degraded",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveBannerRead {
    pub response: ActiveBannerResponse,
    pub outcome: ReadOutcome,
}

/// Storefront-facing read. Never fails: checkout must render even when
/// banner storage is down.
pub struct ActiveBannerReader<R: BannerRepository + ?Sized> {
    service: Arc<BannerService<R>>,
}

impl<R: BannerRepository + ?Sized> Clone for ActiveBannerReader<R> {
    fn clone(&self) -> Self { Self { service: Arc::clone(&self.service) } }
}

impl<R: BannerRepository + ?Sized> ActiveBannerReader<R> {
    pub fn new(service: Arc<BannerService<R>>) -> Self { Self { service } }

    pub async fn get_active_banner(&self) -> ActiveBannerResponse {
        self.read().await.response
    }

    /// Like `get_active_banner`, also reporting how the answer was obtained.
    pub async fn read(&self) -> ActiveBannerRead {
        Self::degrade(self.service.find_active().await)
    }

    pub fn degrade(found: Result<Option<Banner>, ServiceError>) -> ActiveBannerRead {
        match found {
            Ok(Some(banner)) => ActiveBannerRead {
                response: ActiveBannerResponse { active_banner: Some(banner) },
                outcome: ReadOutcome::Hit,
            },
            Ok(None) => ActiveBannerRead { response: ActiveBannerResponse::default(), outcome: ReadOutcome::Empty },
            Err(e) => {
                warn!(error = %e, code = e.code(), "active banner lookup failed, serving none");
                ActiveBannerRead { response: ActiveBannerResponse::default(), outcome: ReadOutcome::Degraded }
            }
        }
    }
}
