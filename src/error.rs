//! Configuration errors.

use thiserror::Error;

/// Rejected [`EditorConfig`](crate::editor::EditorConfig) values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Width or height of the filled map is zero.
    #[error("map extent must be at least 1x1, got {width}x{height}")]
    ZeroExtent {
        /// Requested width in cells.
        width: u32,
        /// Requested height in cells.
        height: u32,
    },
    /// The filled map would exceed [`MAX_MAP_CELLS`](crate::editor::MAX_MAP_CELLS).
    #[error("map extent {width}x{height} exceeds the {max} cell limit")]
    ExtentTooLarge {
        /// Requested width in cells.
        width: u32,
        /// Requested height in cells.
        height: u32,
        /// Largest accepted cell count.
        max: u64,
    },
    /// A cell dimension is zero, negative or not finite.
    #[error("cell size must be positive, got ({width}, {height})")]
    InvalidCellSize {
        /// Cell width in world units.
        width: f32,
        /// Cell height in world units.
        height: f32,
    },
    /// Preview opacity outside the unit range.
    #[error("preview alpha must lie in [0, 1], got {0}")]
    PreviewAlpha(f32),
    /// The border sample would land inside the base cell itself.
    #[error("border sample factor must be greater than 1, got {0}")]
    SampleFactor(f32),
    /// A stroke width is zero or negative.
    #[error("{which} line width must be positive, got {width}")]
    LineWidth {
        /// Which stroke was rejected ("outline" or "border").
        which: &'static str,
        /// Rejected width.
        width: f32,
    },
}
