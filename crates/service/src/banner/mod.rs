//! Banner module: domain, repository port with its adapters, service and the
//! public read facade.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;
pub mod reader;

pub use domain::{Banner, BannerPatch, BannerStatus, NewBanner};
pub use reader::{ActiveBannerRead, ActiveBannerReader, ActiveBannerResponse, ReadOutcome};
pub use repository::{BannerRepository, WriteOutcome};
pub use service::BannerService;
