//! Create, partial update and delete

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::db::{BannerQuery, BannerStore};
use crate::error::BannerResult;
use crate::models::{banner_id, Banner, BannerPatch, NewBanner, ValidationError};

/// Insert a banner; the store assigns the id.
pub async fn create_banner(
    store: &dyn BannerStore,
    banner: &NewBanner,
    now: DateTime<Utc>,
) -> BannerResult<Banner> {
    let created = store.insert(banner, now).await?;
    info!(banner_id = created.id, feature_id = created.feature_id, "banner created");
    Ok(created)
}

/// Apply a sparse patch to an existing banner.
///
/// An empty patch is rejected before the store is touched. A missing id
/// yields `Ok(None)` without issuing a mutation.
pub async fn update_banner(
    store: &dyn BannerStore,
    id: i64,
    patch: &BannerPatch,
    now: DateTime<Utc>,
) -> BannerResult<Option<Banner>> {
    let id = banner_id(id)?;
    if patch.is_empty() {
        return Err(ValidationError::EmptyPatch.into());
    }

    if !exists(store, id).await? {
        debug!(banner_id = id, "update target not found");
        return Ok(None);
    }

    // Row can vanish between the check and the write
    let updated = store.update(id, patch, now).await?;
    match &updated {
        Some(_) => info!(banner_id = id, fields = ?patch.fields(), "banner updated"),
        None => debug!(banner_id = id, "update target deleted concurrently"),
    }
    Ok(updated)
}

/// Delete a banner, returning its last state.
pub async fn delete_banner(store: &dyn BannerStore, id: i64) -> BannerResult<Option<Banner>> {
    let id = banner_id(id)?;

    if !exists(store, id).await? {
        debug!(banner_id = id, "delete target not found");
        return Ok(None);
    }

    let deleted = store.delete(id).await?;
    if deleted.is_some() {
        info!(banner_id = id, "banner deleted");
    }
    Ok(deleted)
}

async fn exists(store: &dyn BannerStore, id: i64) -> BannerResult<bool> {
    Ok(!store.select(&BannerQuery::by_id(id)).await?.is_empty())
}
