//! Domain models with validation at construction
//!
//! Caller input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod banner;
pub mod pagination;

pub use validation::ValidationError;
pub use banner::{banner_id, Banner, BannerPatch, NewBanner, TagIds};
pub use pagination::ListWindow;
