//! In-memory banner repository
//!
//! Evaluates the same `BannerQuery` predicates as the Postgres repo.
//! Ids come from a sequence starting at 1 and are never reused.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::db::{BannerQuery, BannerStore, StoreError};
use crate::models::{Banner, BannerPatch, NewBanner};

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<i64, Banner>,
    last_id: i64,
}

/// Banner repository held in process memory
#[derive(Debug, Default)]
pub struct MemoryBannerRepo {
    state: RwLock<MemoryState>,
}

impl MemoryBannerRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fully formed record as-is, keeping its id and timestamps.
    ///
    /// Replaces any row with the same id.
    pub async fn seed(&self, banner: Banner) {
        let mut state = self.state.write().await;
        state.last_id = state.last_id.max(banner.id);
        state.rows.insert(banner.id, banner);
    }
}

#[async_trait]
impl BannerStore for MemoryBannerRepo {
    async fn select(&self, query: &BannerQuery) -> Result<Vec<Banner>, StoreError> {
        let state = self.state.read().await;
        let mut rows: Vec<Banner> = state
            .rows
            .values()
            .filter(|b| query.matches(b))
            .cloned()
            .collect();
        rows.sort_by(|a, b| query.order.compare(a, b));

        let limit = query.limit.map_or(usize::MAX, |l| l as usize);
        Ok(rows
            .into_iter()
            .skip(query.offset as usize)
            .take(limit)
            .collect())
    }

    async fn insert(&self, banner: &NewBanner, now: DateTime<Utc>) -> Result<Banner, StoreError> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let row = Banner {
            id: state.last_id,
            tag_ids: banner.tag_ids.as_slice().to_vec(),
            feature_id: banner.feature_id,
            content: banner.content.clone(),
            is_active: banner.is_active,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        patch: &BannerPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Banner>, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.rows.get_mut(&id).map(|row| {
            patch.apply(row, now);
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<Option<Banner>, StoreError> {
        Ok(self.state.write().await.rows.remove(&id))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.state.read().await.rows.len() as i64)
    }
}
