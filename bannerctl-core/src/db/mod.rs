//! Record store - connection pool, predicates and repositories
//!
//! # Design Principles
//!
//! - One trait (`BannerStore`) for every backend; the engine never sees SQL
//! - Connection pool with explicit limits - no Arc<Mutex<Connection>>
//! - Mutations return the affected row (`RETURNING`) - no read-after-write

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{Banner, BannerPatch, NewBanner};

pub mod pool;
pub mod query;
pub mod repos;

pub use pool::create_pool_lazy;
pub use query::{BannerOrder, BannerQuery};
pub use repos::{MemoryBannerRepo, PgBannerRepo};

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Query executor over the banners table.
///
/// Implementations hold no business policy; they run the predicates and
/// mutations the engine hands them and round-trip full `Banner` rows.
#[async_trait]
pub trait BannerStore: Send + Sync {
    /// Filtered, ordered, windowed select.
    async fn select(&self, query: &BannerQuery) -> Result<Vec<Banner>, StoreError>;

    /// Insert a banner stamped with `now`, returning the stored row.
    async fn insert(&self, banner: &NewBanner, now: DateTime<Utc>) -> Result<Banner, StoreError>;

    /// Write only the supplied patch fields plus `updated_at = now`.
    ///
    /// Returns `None` if no row has this id.
    async fn update(
        &self,
        id: i64,
        patch: &BannerPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Banner>, StoreError>;

    /// Delete a row, returning it if it existed.
    async fn delete(&self, id: i64) -> Result<Option<Banner>, StoreError>;

    /// Total number of stored banners.
    async fn count(&self) -> Result<i64, StoreError>;
}
