//! Banner resolution and listing
//!
//! Two consistency modes for the user-facing lookup:
//! - relaxed: any active match, lowest id first
//! - last version: only rows updated within the freshness window,
//!   newest first. Stale rows never qualify.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::db::{BannerOrder, BannerQuery, BannerStore};
use crate::error::BannerResult;
use crate::models::{banner_id, Banner, ListWindow};

/// Width of the freshness window for last-version lookups (5 minutes)
pub const FRESHNESS_WINDOW_SECS: i64 = 300;

pub fn freshness_window() -> Duration {
    Duration::seconds(FRESHNESS_WINDOW_SECS)
}

/// Predicate for the user-facing lookup.
pub fn resolution_query(
    tag_id: i64,
    feature_id: i64,
    use_last_version: bool,
    now: DateTime<Utc>,
) -> BannerQuery {
    let query = BannerQuery::by_tag_and_feature(tag_id, feature_id)
        .active_only()
        .limit(1);

    if use_last_version {
        query
            .updated_since(now - freshness_window())
            .order_by(BannerOrder::UpdatedDesc)
    } else {
        query.order_by(BannerOrder::IdAsc)
    }
}

/// Resolve the single active banner for a tag/feature pair.
pub async fn resolve_banner(
    store: &dyn BannerStore,
    tag_id: i64,
    feature_id: i64,
    use_last_version: bool,
    now: DateTime<Utc>,
) -> BannerResult<Option<Banner>> {
    let query = resolution_query(tag_id, feature_id, use_last_version, now);
    let banner = store.select(&query).await?.into_iter().next();

    if banner.is_none() {
        debug!(tag_id, feature_id, use_last_version, "no active banner matched");
    }
    Ok(banner)
}

/// Predicate for the admin listing. Inactive banners are included.
pub fn list_query(tag_id: i64, feature_id: i64, window: ListWindow) -> BannerQuery {
    BannerQuery::by_tag_and_feature(tag_id, feature_id)
        .order_by(BannerOrder::IdAsc)
        .limit(window.limit)
        .offset(window.offset)
}

/// List banners for a tag/feature pair. Empty when nothing matches.
pub async fn list_banners(
    store: &dyn BannerStore,
    tag_id: i64,
    feature_id: i64,
    window: ListWindow,
) -> BannerResult<Vec<Banner>> {
    let banners = store.select(&list_query(tag_id, feature_id, window)).await?;
    debug!(tag_id, feature_id, count = banners.len(), "listed banners");
    Ok(banners)
}

/// Fetch a banner by id regardless of its state.
pub async fn get_banner(store: &dyn BannerStore, id: i64) -> BannerResult<Option<Banner>> {
    let id = banner_id(id)?;
    Ok(store.select(&BannerQuery::by_id(id)).await?.into_iter().next())
}
