//! Crop geometry planning.
//!
//! Pure arithmetic over dimensions: given a source size and a cropping
//! policy, produce the centered crop rectangle that realizes the requested
//! aspect ratio. No pixel data is touched here; [`crate::transform::crop`]
//! executes the plan.
//!
//! A crop plan never scales. The planned rectangle's dimensions are also the
//! output dimensions, so a `Free` policy always yields the identity plan.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for crop planning.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The aspect policy has a zero component and describes no ratio.
    #[error("Invalid crop policy: aspect ratio {w}:{h} has a zero component")]
    InvalidPolicy { w: u32, h: u32 },

    /// The source has a zero dimension; no geometry can be planned for it.
    #[error("Degenerate source dimensions: {width}x{height}")]
    DegenerateSource { width: u32, height: u32 },

    /// The preset string is neither `free` nor a `W:H` ratio.
    #[error("Unrecognized crop preset: {0:?}")]
    UnknownPreset(String),
}

/// How the converter frames the source before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CropPolicy {
    /// Keep the source dimensions unchanged.
    #[default]
    Free,
    /// Center-crop to exactly the ratio `w:h`.
    Aspect { w: u32, h: u32 },
}

impl CropPolicy {
    /// Square preset (`1:1`).
    pub const SQUARE: CropPolicy = CropPolicy::Aspect { w: 1, h: 1 };
    /// Classic photo preset (`4:3`).
    pub const CLASSIC: CropPolicy = CropPolicy::Aspect { w: 4, h: 3 };
    /// Widescreen preset (`16:9`).
    pub const WIDESCREEN: CropPolicy = CropPolicy::Aspect { w: 16, h: 9 };
}

impl FromStr for CropPolicy {
    type Err = LayoutError;

    /// Parse a UI preset: `"free"` or a `"W:H"` ratio such as `"16:9"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("free") {
            return Ok(CropPolicy::Free);
        }

        let (w, h) = trimmed
            .split_once(':')
            .ok_or_else(|| LayoutError::UnknownPreset(trimmed.to_string()))?;
        let w = w
            .trim()
            .parse::<u32>()
            .map_err(|_| LayoutError::UnknownPreset(trimmed.to_string()))?;
        let h = h
            .trim()
            .parse::<u32>()
            .map_err(|_| LayoutError::UnknownPreset(trimmed.to_string()))?;

        if w == 0 || h == 0 {
            return Err(LayoutError::InvalidPolicy { w, h });
        }
        Ok(CropPolicy::Aspect { w, h })
    }
}

/// A centered crop rectangle in source pixel coordinates.
///
/// `(src_x, src_y)` is the top-left corner; `width`/`height` are both the
/// rectangle size and the output dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropPlan {
    /// Horizontal offset of the rectangle in the source.
    pub src_x: u32,
    /// Vertical offset of the rectangle in the source.
    pub src_y: u32,
    /// Rectangle (and output) width in pixels.
    pub width: u32,
    /// Rectangle (and output) height in pixels.
    pub height: u32,
}

impl CropPlan {
    /// True when the plan covers the whole source and removes no pixels.
    pub fn covers(&self, source_width: u32, source_height: u32) -> bool {
        self.src_x == 0
            && self.src_y == 0
            && self.width == source_width
            && self.height == source_height
    }
}

/// Plan a centered crop of `source_width x source_height` under `policy`.
///
/// For an `Aspect { w, h }` policy the source is trimmed on one axis only:
/// a source wider than the target ratio keeps its full height and loses
/// width; a taller (or exactly matching) source keeps its full width. The
/// kept axis fixes the other via the ratio, rounded to the nearest pixel,
/// and the rectangle is centered with integer offsets.
///
/// # Errors
///
/// Returns `LayoutError::DegenerateSource` if either source dimension is
/// zero, and `LayoutError::InvalidPolicy` if the aspect ratio has a zero
/// component.
pub fn plan(
    source_width: u32,
    source_height: u32,
    policy: CropPolicy,
) -> Result<CropPlan, LayoutError> {
    if source_width == 0 || source_height == 0 {
        return Err(LayoutError::DegenerateSource {
            width: source_width,
            height: source_height,
        });
    }

    let (w, h) = match policy {
        CropPolicy::Free => {
            return Ok(CropPlan {
                src_x: 0,
                src_y: 0,
                width: source_width,
                height: source_height,
            });
        }
        CropPolicy::Aspect { w, h } => (w, h),
    };

    if w == 0 || h == 0 {
        return Err(LayoutError::InvalidPolicy { w, h });
    }

    let target_ratio = w as f64 / h as f64;
    let current_ratio = source_width as f64 / source_height as f64;

    let (dest_width, dest_height) = if current_ratio > target_ratio {
        // Source is relatively wider: keep full height, trim width.
        let dest_width = (source_height as f64 * target_ratio).round() as u32;
        (dest_width.clamp(1, source_width), source_height)
    } else {
        // Source is relatively taller or already matching: keep full width.
        let dest_height = (source_width as f64 / target_ratio).round() as u32;
        (source_width, dest_height.clamp(1, source_height))
    };

    Ok(CropPlan {
        src_x: (source_width - dest_width) / 2,
        src_y: (source_height - dest_height) / 2,
        width: dest_width,
        height: dest_height,
    })
}

/// Height that keeps `aspect` (source width over height) at `width`.
///
/// This is the resizer's aspect-lock arithmetic: plain nearest rounding, no
/// clamping. A zero result means the requested width was itself degenerate.
pub fn height_for_width(width: u32, aspect: f64) -> u32 {
    (width as f64 / aspect).round() as u32
}

/// Width that keeps `aspect` (source width over height) at `height`.
pub fn width_for_height(height: u32, aspect: f64) -> u32 {
    (height as f64 * aspect).round() as u32
}
