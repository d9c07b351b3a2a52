//! Structured banner predicate
//!
//! The engine describes what it wants as a `BannerQuery`; each store
//! translates it (SQL for Postgres, a filter for the memory store).

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::models::Banner;

/// Row ordering for a select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BannerOrder {
    /// Lowest id first
    #[default]
    IdAsc,
    /// Most recently updated first, ties by highest id
    UpdatedDesc,
}

impl BannerOrder {
    pub fn compare(&self, a: &Banner, b: &Banner) -> Ordering {
        match self {
            Self::IdAsc => a.id.cmp(&b.id),
            Self::UpdatedDesc => b
                .updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.id.cmp(&a.id)),
        }
    }

    pub(crate) fn as_sql(&self) -> &'static str {
        match self {
            Self::IdAsc => " ORDER BY id ASC",
            Self::UpdatedDesc => " ORDER BY updated_at DESC, id DESC",
        }
    }
}

/// Filtered, ordered, windowed select over the banners table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BannerQuery {
    pub id: Option<i64>,
    pub tag_id: Option<i64>,
    pub feature_id: Option<i64>,
    pub active_only: bool,
    /// Inclusive lower bound on `updated_at`
    pub updated_since: Option<DateTime<Utc>>,
    pub order: BannerOrder,
    pub limit: Option<u32>,
    pub offset: u32,
}

impl BannerQuery {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            limit: Some(1),
            ..Default::default()
        }
    }

    pub fn by_tag_and_feature(tag_id: i64, feature_id: i64) -> Self {
        Self {
            tag_id: Some(tag_id),
            feature_id: Some(feature_id),
            ..Default::default()
        }
    }

    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }

    pub fn updated_since(mut self, since: DateTime<Utc>) -> Self {
        self.updated_since = Some(since);
        self
    }

    pub fn order_by(mut self, order: BannerOrder) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Evaluate the filter part of the query against one record.
    pub fn matches(&self, banner: &Banner) -> bool {
        if self.id.is_some_and(|id| banner.id != id) {
            return false;
        }
        if self.tag_id.is_some_and(|tag| !banner.has_tag(tag)) {
            return false;
        }
        if self.feature_id.is_some_and(|f| banner.feature_id != f) {
            return false;
        }
        if self.active_only && !banner.is_active {
            return false;
        }
        if self.updated_since.is_some_and(|since| banner.updated_at < since) {
            return false;
        }
        true
    }
}
