//! Banner commands: resolve, list, show, create, update, delete
//!
//! Each command parses its arguments, calls one façade method and prints
//! JSON. A missing banner is reported as an error so the exit code is
//! non-zero.

use anyhow::{bail, Result};
use bannerctl_core::models::{TagIds, ValidationError};
use bannerctl_core::{BannerPatch, NewBanner};
use clap::{ArgAction, Parser};
use serde_json::json;
use tracing::debug;

use super::{print_json, GlobalArgs};

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Tag the banner must carry
    #[arg(long)]
    pub tag_id: i64,

    /// Feature the banner belongs to
    #[arg(long)]
    pub feature_id: i64,

    /// Only accept banners updated in the last 5 minutes, newest first
    #[arg(long)]
    pub use_last_version: bool,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    #[arg(long)]
    pub tag_id: i64,

    #[arg(long)]
    pub feature_id: i64,

    /// Maximum banners to return (default: 1, max: 100)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Banners to skip (default: 0)
    #[arg(long)]
    pub offset: Option<u32>,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Banner id
    pub id: i64,
}

/// Arguments for the create command
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Tag ids, comma-separated (e.g. 1,2,3)
    #[arg(long, value_delimiter = ',', required = true)]
    pub tag_ids: Vec<i64>,

    #[arg(long)]
    pub feature_id: i64,

    /// Banner payload, stored verbatim
    #[arg(long)]
    pub content: String,

    /// Whether the banner is served to users (true/false)
    #[arg(long, action = ArgAction::Set, required = true)]
    pub active: bool,
}

/// Arguments for the update command. Omitted flags leave fields unchanged.
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Banner id
    pub id: i64,

    /// Replace tag ids, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub tag_ids: Option<Vec<i64>>,

    #[arg(long)]
    pub feature_id: Option<i64>,

    #[arg(long)]
    pub content: Option<String>,

    /// Set active state (true/false)
    #[arg(long)]
    pub active: Option<bool>,
}

impl UpdateArgs {
    fn into_patch(self) -> Result<(i64, BannerPatch), ValidationError> {
        let tag_ids = self.tag_ids.map(TagIds::new).transpose()?;
        let patch = BannerPatch {
            tag_ids,
            feature_id: self.feature_id,
            content: self.content,
            is_active: self.active,
        };
        Ok((self.id, patch))
    }
}

/// Arguments for the delete command
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Banner id
    pub id: i64,
}

pub async fn run_resolve(args: ResolveArgs, global: &GlobalArgs) -> Result<()> {
    let actions = global.connect()?;
    let banner = actions
        .resolve_banner(args.tag_id, args.feature_id, args.use_last_version)
        .await?;

    match banner {
        Some(banner) => print_json(&json!({ "content": banner.content })),
        None => bail!(
            "no active banner for tag {} and feature {}",
            args.tag_id,
            args.feature_id
        ),
    }
}

pub async fn run_list(args: ListArgs, global: &GlobalArgs) -> Result<()> {
    let actions = global.connect()?;
    let banners = actions
        .list_banners(args.tag_id, args.feature_id, args.limit, args.offset)
        .await?;

    debug!(count = banners.len(), "listing complete");
    print_json(&banners)
}

pub async fn run_show(args: ShowArgs, global: &GlobalArgs) -> Result<()> {
    let actions = global.connect()?;
    match actions.get_banner(args.id).await? {
        Some(banner) => print_json(&banner),
        None => bail!("banner {} not found", args.id),
    }
}

pub async fn run_create(args: CreateArgs, global: &GlobalArgs) -> Result<()> {
    let new = NewBanner::new(args.tag_ids, args.feature_id, args.content, args.active)?;
    let actions = global.connect()?;
    let banner = actions.create_banner(new).await?;
    print_json(&json!({ "banner_id": banner.id }))
}

pub async fn run_update(args: UpdateArgs, global: &GlobalArgs) -> Result<()> {
    let (id, patch) = args.into_patch()?;
    let actions = global.connect()?;
    match actions.update_banner(id, patch).await? {
        Some(banner) => print_json(&banner),
        None => bail!("banner {} not found", id),
    }
}

pub async fn run_delete(args: DeleteArgs, global: &GlobalArgs) -> Result<()> {
    let actions = global.connect()?;
    match actions.delete_banner(args.id).await? {
        Some(banner) => print_json(&banner),
        None => bail!("banner {} not found", args.id),
    }
}
