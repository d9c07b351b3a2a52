//! Banner repository on PostgreSQL
//!
//! Expected schema lives in `db/schema.sql`. `tag_ids` is a single
//! `BIGINT[]` column; tag membership is `$1 = ANY(tag_ids)`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::db::{BannerQuery, BannerStore, StoreError};
use crate::models::{Banner, BannerPatch, NewBanner};

const COLUMNS: &str = "id, tag_ids, feature_id, content, is_active, created_at, updated_at";

/// Banner repository backed by a shared pool
#[derive(Debug, Clone)]
pub struct PgBannerRepo {
    pool: PgPool,
}

impl PgBannerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the SELECT for a predicate.
fn select_sql(query: &BannerQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM banners WHERE TRUE"));

    if let Some(id) = query.id {
        builder.push(" AND id = ").push_bind(id);
    }
    if let Some(tag_id) = query.tag_id {
        builder.push(" AND ").push_bind(tag_id).push(" = ANY(tag_ids)");
    }
    if let Some(feature_id) = query.feature_id {
        builder.push(" AND feature_id = ").push_bind(feature_id);
    }
    if query.active_only {
        builder.push(" AND is_active");
    }
    if let Some(since) = query.updated_since {
        builder.push(" AND updated_at >= ").push_bind(since);
    }

    builder.push(query.order.as_sql());

    if let Some(limit) = query.limit {
        builder.push(" LIMIT ").push_bind(i64::from(limit));
    }
    if query.offset > 0 {
        builder.push(" OFFSET ").push_bind(i64::from(query.offset));
    }
    builder
}

/// Build the UPDATE for a patch: only supplied columns appear in SET.
fn update_sql(id: i64, patch: &BannerPatch, now: DateTime<Utc>) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE banners SET updated_at = ");
    builder.push_bind(now);

    if let Some(tags) = &patch.tag_ids {
        builder.push(", tag_ids = ").push_bind(tags.as_slice().to_vec());
    }
    if let Some(feature_id) = patch.feature_id {
        builder.push(", feature_id = ").push_bind(feature_id);
    }
    if let Some(content) = &patch.content {
        builder.push(", content = ").push_bind(content.clone());
    }
    if let Some(is_active) = patch.is_active {
        builder.push(", is_active = ").push_bind(is_active);
    }

    builder.push(" WHERE id = ").push_bind(id);
    builder.push(format!(" RETURNING {COLUMNS}"));
    builder
}

#[async_trait]
impl BannerStore for PgBannerRepo {
    async fn select(&self, query: &BannerQuery) -> Result<Vec<Banner>, StoreError> {
        let mut builder = select_sql(query);
        let rows = builder
            .build_query_as::<Banner>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, banner: &NewBanner, now: DateTime<Utc>) -> Result<Banner, StoreError> {
        let row: Banner = sqlx::query_as(&format!(
            r#"
            INSERT INTO banners (tag_ids, feature_id, content, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(banner.tag_ids.as_slice())
        .bind(banner.feature_id)
        .bind(&banner.content)
        .bind(banner.is_active)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        patch: &BannerPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Banner>, StoreError> {
        let mut builder = update_sql(id, patch, now);
        let row = builder
            .build_query_as::<Banner>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<Option<Banner>, StoreError> {
        let row: Option<Banner> = sqlx::query_as(&format!(
            "DELETE FROM banners WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM banners")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
