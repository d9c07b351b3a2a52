//! bannerctl-core: banner resolution and partial-update engine
//!
//! Resolves the active banner for a tag/feature pair under two consistency
//! modes and applies sparse updates that leave omitted fields untouched.
//! Storage is behind the `BannerStore` trait (PostgreSQL or in-memory).

pub mod actions;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;

pub use actions::Actions;
pub use config::BannerConfig;
pub use db::{BannerStore, MemoryBannerRepo, PgBannerRepo, StoreError};
pub use error::{BannerError, BannerResult};
pub use models::{Banner, BannerPatch, NewBanner, TagIds};
