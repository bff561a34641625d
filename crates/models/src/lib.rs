//! Persistence models for checkout banners (sea-orm entities plus the small
//! set of queries the service layer composes into transactions).

pub mod errors;
pub mod db;
pub mod banner;

pub use banner::BannerStatus;
