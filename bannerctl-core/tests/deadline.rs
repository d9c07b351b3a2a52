//! Deadline handling and backend failure propagation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bannerctl_core::db::BannerQuery;
use bannerctl_core::{
    Actions, Banner, BannerError, BannerPatch, BannerStore, NewBanner, StoreError,
};
use chrono::{DateTime, Utc};

/// Store whose selects never finish before `delay`
struct SlowStore {
    delay: Duration,
    finished: AtomicBool,
}

#[async_trait]
impl BannerStore for SlowStore {
    async fn select(&self, _query: &BannerQuery) -> Result<Vec<Banner>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.finished.store(true, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn insert(&self, _banner: &NewBanner, _now: DateTime<Utc>) -> Result<Banner, StoreError> {
        tokio::time::sleep(self.delay).await;
        Err(StoreError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn update(
        &self,
        _id: i64,
        _patch: &BannerPatch,
        _now: DateTime<Utc>,
    ) -> Result<Option<Banner>, StoreError> {
        Ok(None)
    }

    async fn delete(&self, _id: i64) -> Result<Option<Banner>, StoreError> {
        Ok(None)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(0)
    }
}

/// Store that fails every call
struct BrokenStore;

fn refused() -> StoreError {
    StoreError::Sqlx(sqlx::Error::PoolClosed)
}

#[async_trait]
impl BannerStore for BrokenStore {
    async fn select(&self, _query: &BannerQuery) -> Result<Vec<Banner>, StoreError> {
        Err(refused())
    }

    async fn insert(&self, _banner: &NewBanner, _now: DateTime<Utc>) -> Result<Banner, StoreError> {
        Err(refused())
    }

    async fn update(
        &self,
        _id: i64,
        _patch: &BannerPatch,
        _now: DateTime<Utc>,
    ) -> Result<Option<Banner>, StoreError> {
        Err(refused())
    }

    async fn delete(&self, _id: i64) -> Result<Option<Banner>, StoreError> {
        Err(refused())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Err(refused())
    }
}

#[tokio::test(start_paused = true)]
async fn deadline_aborts_in_flight_query() {
    let store = Arc::new(SlowStore {
        delay: Duration::from_secs(10),
        finished: AtomicBool::new(false),
    });
    let actions = Actions::new(store.clone()).with_deadline(Duration::from_millis(100));

    let err = actions.resolve_banner(1, 1, true).await.unwrap_err();
    assert!(matches!(
        err,
        BannerError::DeadlineExceeded { timeout } if timeout == Duration::from_millis(100)
    ));

    // Let the full delay pass; the dropped query must not complete
    tokio::time::sleep(Duration::from_secs(20)).await;
    assert!(!store.finished.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn operations_within_deadline_complete() {
    let store = Arc::new(SlowStore {
        delay: Duration::from_millis(10),
        finished: AtomicBool::new(false),
    });
    let actions = Actions::new(store.clone()).with_deadline(Duration::from_secs(1));

    let banners = actions.list_banners(1, 1, None, None).await.unwrap();
    assert!(banners.is_empty());
    assert!(store.finished.load(Ordering::SeqCst));
}

#[tokio::test]
async fn backend_failures_propagate() {
    let actions = Actions::new(Arc::new(BrokenStore));

    let err = actions.resolve_banner(1, 1, false).await.unwrap_err();
    assert!(matches!(
        err,
        BannerError::Backend(StoreError::Sqlx(sqlx::Error::PoolClosed))
    ));

    let new = NewBanner::new(vec![1], 1, "c", true).unwrap();
    assert!(matches!(
        actions.create_banner(new).await.unwrap_err(),
        BannerError::Backend(_)
    ));
}

#[tokio::test]
async fn empty_patch_rejected_before_store_access() {
    let actions = Actions::new(Arc::new(BrokenStore));
    let err = actions
        .update_banner(1, BannerPatch::default())
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());
}
