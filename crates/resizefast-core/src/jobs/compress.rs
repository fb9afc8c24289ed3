//! The precision compressor: hit a kilobyte target, JPEG output.
//!
//! Two stages. First a resolution check: if the budget spreads too thin
//! over the source pixels, quality alone would crumble into block
//! artifacts, so the bitmap is downscaled toward a healthier byte-per-pixel
//! density. Then the shared quality search encodes whatever bitmap came out
//! of stage one.

use serde::{Deserialize, Serialize};

use super::JobError;
use crate::decode::{resize, Bitmap, FilterType};
use crate::encode::{
    encode_to_budget, EncodedImage, ImageMime, SearchOptions, DEFAULT_FIXED_QUALITY,
};

/// When and how far the compressor trades resolution for quality.
///
/// The two constants are empirical: below `sharpness_floor` bytes per pixel
/// the quality knob alone produces visibly blocky output, and downscaled
/// images are sized so the budget lands near `target_density` bytes per
/// pixel, leaving the search room to pick a decent quality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DownscalePolicy {
    /// Bytes-per-pixel ratio below which resolution is sacrificed.
    pub sharpness_floor: f64,
    /// Bytes-per-pixel density the downscaled image is sized for.
    pub target_density: f64,
}

impl Default for DownscalePolicy {
    fn default() -> Self {
        Self {
            sharpness_floor: 0.1,
            target_density: 0.2,
        }
    }
}

impl DownscalePolicy {
    /// Dimensions to resample to before encoding under `budget` bytes.
    ///
    /// Returns `None` when the source should keep its resolution: the
    /// budget is already dense enough, or the computed scale would not
    /// shrink the image.
    pub fn scaled_dimensions(&self, width: u32, height: u32, budget: u64) -> Option<(u32, u32)> {
        let pixel_area = width as f64 * height as f64;
        if pixel_area <= 0.0 {
            return None;
        }

        let bytes_per_pixel = budget as f64 / pixel_area;
        if bytes_per_pixel >= self.sharpness_floor {
            return None;
        }

        let scale = (budget as f64 / (pixel_area * self.target_density)).sqrt();
        if scale >= 1.0 {
            return None;
        }

        let scaled_width = ((width as f64 * scale).round() as u32).max(1);
        let scaled_height = ((height as f64 * scale).round() as u32).max(1);
        Some((scaled_width, scaled_height))
    }
}

/// Pre-fill for the target-size field based on the upload's byte length.
///
/// Large files get a flat 200 KB suggestion; smaller files are offered
/// half their current size, never below 1 KB.
pub fn suggested_target_kb(file_len: u64) -> u64 {
    if file_len > 1024 * 1024 {
        200
    } else {
        (((file_len as f64) / 1024.0 * 0.5).round() as u64).max(1)
    }
}

/// One compressor conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressJob {
    /// Target output size in kilobytes (clamped to at least 1).
    pub target_kb: u64,
    /// Downscale heuristic knobs.
    pub policy: DownscalePolicy,
}

impl CompressJob {
    pub fn new(target_kb: u64) -> Self {
        Self {
            target_kb: target_kb.max(1),
            policy: DownscalePolicy::default(),
        }
    }

    /// The byte budget handed to the quality search.
    pub fn target_bytes(&self) -> u64 {
        self.target_kb * 1024
    }

    /// Downscale if the heuristic says so, then search-encode as JPEG.
    ///
    /// Never fails for being unable to reach the target; the floor-quality
    /// encode is returned as a best effort in that case.
    pub fn run(&self, source: &Bitmap) -> Result<EncodedImage, JobError> {
        let budget = self.target_bytes();

        let staged;
        let input = match self
            .policy
            .scaled_dimensions(source.width, source.height, budget)
        {
            Some((width, height)) => {
                staged = resize(source, width, height, FilterType::Lanczos3)?;
                &staged
            }
            None => source,
        };

        let options = SearchOptions::budgeted(budget, DEFAULT_FIXED_QUALITY);
        Ok(encode_to_budget(input, ImageMime::Jpeg, &options)?)
    }

    /// Download name recording the target, e.g. `compressed-200kb-photo.jpg`.
    pub fn output_name(&self, original_name: &str) -> String {
        format!("compressed-{}kb-{}", self.target_kb, original_name)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
