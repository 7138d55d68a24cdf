//! Camera capture resolutions

use serde::{Deserialize, Serialize};

/// A single capture resolution reported by a camera, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaptureResolution {
    pub width: u32,
    pub height: u32,
}

impl CaptureResolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel area, used for ordering.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl std::fmt::Display for CaptureResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Sort resolutions from highest to lowest pixel count and drop duplicates.
/// Ties between distinct resolutions of equal area keep their relative order.
pub fn sort_resolutions(resolutions: &mut Vec<CaptureResolution>) {
    resolutions.sort_by_key(|r| std::cmp::Reverse(r.pixel_count()));
    resolutions.dedup();
}
