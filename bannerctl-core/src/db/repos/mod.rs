//! Repository implementations of `BannerStore`
//!
//! - `PgBannerRepo`: PostgreSQL via sqlx, `RETURNING` on every mutation
//! - `MemoryBannerRepo`: in-process map for tests and dry runs

pub mod banners;
pub mod memory;

pub use banners::PgBannerRepo;
pub use memory::MemoryBannerRepo;
