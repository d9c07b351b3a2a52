//! Resolution & partial-update engine
//!
//! Stateless functions over a `BannerStore`. The resolution instant is
//! passed in so the freshness window can be checked against a fixed `now`.

pub mod resolve;
pub mod update;

pub use resolve::{
    freshness_window, get_banner, list_banners, list_query, resolution_query, resolve_banner,
    FRESHNESS_WINDOW_SECS,
};
pub use update::{create_banner, delete_banner, update_banner};
