//! Limit/offset window for admin banner listings

/// Maximum banners returned by a single listing
pub const MAX_LIMIT: u32 = 100;

/// Banners returned when the caller gives no limit
pub const DEFAULT_LIMIT: u32 = 1;

/// Listing window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    /// Rows to return (1..=100)
    pub limit: u32,
    /// Rows to skip
    pub offset: u32,
}

impl ListWindow {
    /// Build a window from optional caller values.
    ///
    /// - Missing limit defaults to 1, missing offset to 0
    /// - Limit is clamped to 1..=100
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for ListWindow {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}
