use std::sync::Arc;

use service::banner::{ActiveBannerReader, BannerRepository, BannerService};

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub banners: Arc<BannerService<dyn BannerRepository>>,
    pub active: ActiveBannerReader<dyn BannerRepository>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn BannerRepository>) -> Self {
        let banners = Arc::new(BannerService::new(repo));
        let active = ActiveBannerReader::new(Arc::clone(&banners));
        Self { banners, active }
    }
}
