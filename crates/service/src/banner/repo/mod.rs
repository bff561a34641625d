pub mod memory;
pub mod seaorm;

pub use memory::InMemoryBannerRepository;
pub use seaorm::SeaOrmBannerRepository;
