//! The resolution scaler: exact target dimensions, any output format,
//! optional byte budget.

use serde::{Deserialize, Serialize};

use super::JobError;
use crate::decode::{resize, Bitmap, FilterType};
use crate::encode::{encode_to_budget, EncodedImage, ImageMime, SearchOptions};

/// Quality for unbudgeted resizer encodes, matching the tool's slider
/// default.
pub const DEFAULT_RESIZE_QUALITY: f32 = 0.92;

/// One resizer conversion.
///
/// The aspect ratio is whatever `width x height` says; the aspect-lock
/// behavior lives in the UI via [`crate::layout::height_for_width`] and
/// friends, so by the time a job exists the dimensions are final.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeJob {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// Output format.
    pub mime: ImageMime,
    /// Quality for the single encode when no budget is set.
    pub quality: f32,
    /// Optional output byte budget; engages the quality search.
    pub target_bytes: Option<u64>,
}

impl ResizeJob {
    pub fn new(width: u32, height: u32, mime: ImageMime) -> Self {
        Self {
            width,
            height,
            mime,
            quality: DEFAULT_RESIZE_QUALITY,
            target_bytes: None,
        }
    }

    /// Set the byte budget from the tool's target-KB field.
    ///
    /// Zero means the field was left empty and no budget applies.
    pub fn with_target_kb(mut self, kb: u64) -> Self {
        self.target_bytes = (kb > 0).then_some(kb * 1024);
        self
    }

    /// Resample `source` to the target dimensions and encode.
    pub fn run(&self, source: &Bitmap) -> Result<EncodedImage, JobError> {
        let scaled = resize(source, self.width, self.height, FilterType::Lanczos3)?;

        let options = SearchOptions {
            byte_budget: self.target_bytes,
            fixed_quality: self.quality,
            ..SearchOptions::default()
        };
        Ok(encode_to_budget(&scaled, self.mime, &options)?)
    }

    /// Download name advertising the new dimensions.
    pub fn output_name(&self) -> String {
        format!(
            "scaled-{}x{}.{}",
            self.width,
            self.height,
            self.mime.extension()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width.max(1)) as u8);
                pixels.push((y * 255 / height.max(1)) as u8);
                pixels.push(128);
                pixels.push(255);
            }
        }
        Bitmap::new(width, height, pixels)
    }

    #[test]
    fn test_resize_job_changes_dimensions() {
        let source = gradient(100, 80);
        let job = ResizeJob::new(50, 40, ImageMime::Png);

        let result = job.run(&source).unwrap();

        let decoded = crate::decode::decode_bitmap(&result.bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (50, 40));
        assert_eq!(result.quality, DEFAULT_RESIZE_QUALITY);
    }

    #[test]
    fn test_resize_job_with_budget_fits() {
        let source = gradient(256, 256);
        let budget_kb = 4;
        let job = ResizeJob::new(128, 128, ImageMime::Jpeg).with_target_kb(budget_kb);

        let result = job.run(&source).unwrap();

        assert!(result.byte_len() <= budget_kb * 1024);
    }

    #[test]
    fn test_resize_job_zero_kb_means_unbudgeted() {
        let job = ResizeJob::new(10, 10, ImageMime::Jpeg).with_target_kb(0);
        assert_eq!(job.target_bytes, None);
    }

    #[test]
    fn test_resize_job_rejects_zero_dimensions() {
        let source = gradient(10, 10);
        let job = ResizeJob::new(0, 10, ImageMime::Png);

        assert!(matches!(job.run(&source), Err(JobError::Decode(_))));
    }

    #[test]
    fn test_resize_job_output_name() {
        let job = ResizeJob::new(800, 600, ImageMime::WebP);
        assert_eq!(job.output_name(), "scaled-800x600.webp");
    }

    #[test]
    fn test_resize_job_quality_override() {
        let source = gradient(64, 64);
        let mut job = ResizeJob::new(64, 64, ImageMime::Jpeg);
        job.quality = 0.5;

        let result = job.run(&source).unwrap();
        assert_eq!(result.quality, 0.5);
    }
}
