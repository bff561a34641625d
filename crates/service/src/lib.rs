//! Service layer for checkout banners.
//! - Owns the single-active rule and input validation.
//! - Talks to storage only through `banner::repository::BannerRepository`.
//! - Exposes the public, never-failing active banner read as a separate unit.

pub mod errors;
pub mod banner;

pub use banner::{ActiveBannerReader, BannerService};
