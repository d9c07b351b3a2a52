//! Banner record, creation fields and sparse patches

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Banner record as stored and returned by every read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Banner {
    #[serde(rename = "banner_id")]
    pub id: i64,
    pub tag_ids: Vec<i64>,
    pub feature_id: i64,
    pub content: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Banner {
    /// Check whether the banner is associated with a tag.
    pub fn has_tag(&self, tag_id: i64) -> bool {
        self.tag_ids.contains(&tag_id)
    }
}

/// Validate a banner id supplied by a caller.
pub fn banner_id(id: i64) -> Result<i64, ValidationError> {
    if id <= 0 {
        return Err(ValidationError::NotPositive {
            field: "banner_id",
            value: id,
        });
    }
    Ok(id)
}

/// Validated, non-empty set of tag ids.
///
/// Duplicates are dropped; first occurrence order is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct TagIds(Vec<i64>);

impl TagIds {
    /// Create a tag set, rejecting an empty list.
    ///
    /// # Example
    /// ```
    /// use bannerctl_core::models::TagIds;
    ///
    /// assert_eq!(TagIds::new(vec![2, 1, 2]).unwrap().as_slice(), &[2, 1]);
    /// assert!(TagIds::new(vec![]).is_err());
    /// ```
    pub fn new(ids: Vec<i64>) -> Result<Self, ValidationError> {
        if ids.is_empty() {
            return Err(ValidationError::Empty { field: "tag_ids" });
        }

        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Ok(Self(unique))
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }
}

impl TryFrom<Vec<i64>> for TagIds {
    type Error = ValidationError;

    fn try_from(ids: Vec<i64>) -> Result<Self, Self::Error> {
        Self::new(ids)
    }
}

impl From<TagIds> for Vec<i64> {
    fn from(tags: TagIds) -> Self {
        tags.0
    }
}

/// Fields of a banner to be created. All are required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewBanner {
    pub tag_ids: TagIds,
    pub feature_id: i64,
    pub content: String,
    pub is_active: bool,
}

impl NewBanner {
    pub fn new(
        tag_ids: Vec<i64>,
        feature_id: i64,
        content: impl Into<String>,
        is_active: bool,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            tag_ids: TagIds::new(tag_ids)?,
            feature_id,
            content: content.into(),
            is_active,
        })
    }
}

/// Sparse update of a banner.
///
/// `None` leaves the stored value untouched; `Some` overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BannerPatch {
    #[serde(default)]
    pub tag_ids: Option<TagIds>,
    #[serde(default)]
    pub feature_id: Option<i64>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl BannerPatch {
    /// True when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Names of the supplied fields, in column order.
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.tag_ids.is_some() {
            fields.push("tag_ids");
        }
        if self.feature_id.is_some() {
            fields.push("feature_id");
        }
        if self.content.is_some() {
            fields.push("content");
        }
        if self.is_active.is_some() {
            fields.push("is_active");
        }
        fields
    }

    /// Apply the supplied fields to a record and stamp `updated_at`.
    pub fn apply(&self, banner: &mut Banner, now: DateTime<Utc>) {
        if let Some(tags) = &self.tag_ids {
            banner.tag_ids = tags.as_slice().to_vec();
        }
        if let Some(feature_id) = self.feature_id {
            banner.feature_id = feature_id;
        }
        if let Some(content) = &self.content {
            banner.content = content.clone();
        }
        if let Some(is_active) = self.is_active {
            banner.is_active = is_active;
        }
        banner.updated_at = now;
    }
}
