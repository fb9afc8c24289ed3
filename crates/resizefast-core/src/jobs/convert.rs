//! The format converter: optional center-crop framing, any output format,
//! optional byte budget.

use serde::{Deserialize, Serialize};

use super::{file_stem, JobError};
use crate::decode::Bitmap;
use crate::encode::{encode_to_budget, EncodedImage, ImageMime, SearchOptions};
use crate::layout::{plan, CropPolicy};
use crate::transform::crop;

/// Quality for unbudgeted converter encodes, matching the tool's default.
pub const DEFAULT_CONVERT_QUALITY: f32 = 0.95;

/// One converter conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertJob {
    /// Output format.
    pub mime: ImageMime,
    /// Aspect framing applied before encoding.
    pub policy: CropPolicy,
    /// Quality for the single encode when no budget is set.
    pub quality: f32,
    /// Optional output byte budget; engages the quality search.
    pub target_bytes: Option<u64>,
}

impl ConvertJob {
    pub fn new(mime: ImageMime) -> Self {
        Self {
            mime,
            policy: CropPolicy::Free,
            quality: DEFAULT_CONVERT_QUALITY,
            target_bytes: None,
        }
    }

    /// Frame to an aspect preset instead of keeping the source shape.
    pub fn with_policy(mut self, policy: CropPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the byte budget from the tool's target-KB field.
    ///
    /// Zero means the field was left empty and no budget applies.
    pub fn with_target_kb(mut self, kb: u64) -> Self {
        self.target_bytes = (kb > 0).then_some(kb * 1024);
        self
    }

    /// Plan the framing, crop if the plan removes anything, and encode.
    pub fn run(&self, source: &Bitmap) -> Result<EncodedImage, JobError> {
        let plan = plan(source.width, source.height, self.policy)?;

        let framed;
        let input = if plan.covers(source.width, source.height) {
            source
        } else {
            framed = crop(source, &plan);
            &framed
        };

        let options = SearchOptions {
            byte_budget: self.target_bytes,
            fixed_quality: self.quality,
            ..SearchOptions::default()
        };
        Ok(encode_to_budget(input, self.mime, &options)?)
    }

    /// Download name preserving the uploaded stem, with the new extension.
    pub fn output_name(&self, original_name: Option<&str>) -> String {
        format!("{}.{}", file_stem(original_name), self.mime.extension())
    }
}
