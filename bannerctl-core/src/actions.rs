//! Action façade - one method per use case
//!
//! Composes the engine with an explicitly passed store handle and applies
//! the caller's deadline. On expiry the in-flight query future is dropped,
//! which aborts it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::config::BannerConfig;
use crate::db::{create_pool_lazy, BannerStore, PgBannerRepo};
use crate::engine;
use crate::error::{BannerError, BannerResult};
use crate::models::{Banner, BannerPatch, ListWindow, NewBanner};

/// Entry point for the outer layer (CLI)
#[derive(Clone)]
pub struct Actions {
    store: Arc<dyn BannerStore>,
    deadline: Option<Duration>,
}

impl Actions {
    pub fn new(store: Arc<dyn BannerStore>) -> Self {
        Self {
            store,
            deadline: None,
        }
    }

    /// Abort any operation that runs longer than `deadline`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Build a façade over PostgreSQL from configuration.
    ///
    /// The pool connects on first query.
    pub fn connect(config: &BannerConfig) -> anyhow::Result<Self> {
        let pool = create_pool_lazy(
            config.database_url()?,
            config.database.max_connections,
            config.acquire_timeout(),
        )?;

        let actions = Self::new(Arc::new(PgBannerRepo::new(pool)));
        Ok(match config.deadline() {
            Some(deadline) => actions.with_deadline(deadline),
            None => actions,
        })
    }

    pub fn store(&self) -> &dyn BannerStore {
        self.store.as_ref()
    }

    async fn run<T, F>(&self, operation: F) -> BannerResult<T>
    where
        F: Future<Output = BannerResult<T>>,
    {
        match self.deadline {
            Some(timeout) => tokio::time::timeout(timeout, operation)
                .await
                .map_err(|_| BannerError::DeadlineExceeded { timeout })?,
            None => operation.await,
        }
    }

    /// User-facing lookup. `Ok(None)` when no active banner qualifies.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_banner(
        &self,
        tag_id: i64,
        feature_id: i64,
        use_last_version: bool,
    ) -> BannerResult<Option<Banner>> {
        self.run(engine::resolve_banner(
            self.store(),
            tag_id,
            feature_id,
            use_last_version,
            Utc::now(),
        ))
        .await
    }

    /// Admin listing; limit defaults to 1 and offset to 0.
    #[tracing::instrument(skip(self))]
    pub async fn list_banners(
        &self,
        tag_id: i64,
        feature_id: i64,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> BannerResult<Vec<Banner>> {
        let window = ListWindow::new(limit, offset);
        self.run(engine::list_banners(self.store(), tag_id, feature_id, window))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_banner(&self, id: i64) -> BannerResult<Option<Banner>> {
        self.run(engine::get_banner(self.store(), id)).await
    }

    #[tracing::instrument(skip(self, banner), fields(feature_id = banner.feature_id))]
    pub async fn create_banner(&self, banner: NewBanner) -> BannerResult<Banner> {
        self.run(engine::create_banner(self.store(), &banner, Utc::now()))
            .await
    }

    #[tracing::instrument(skip(self, patch), fields(fields = ?patch.fields()))]
    pub async fn update_banner(&self, id: i64, patch: BannerPatch) -> BannerResult<Option<Banner>> {
        self.run(engine::update_banner(self.store(), id, &patch, Utc::now()))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_banner(&self, id: i64) -> BannerResult<Option<Banner>> {
        self.run(engine::delete_banner(self.store(), id)).await
    }
}
