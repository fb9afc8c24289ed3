//! PDF page export: encode externally rendered pages as JPEGs.
//!
//! Page rasterization happens outside this crate (a PDF renderer draws the
//! page into an RGBA buffer); the job only sees the rendered pixels. A
//! whole-document export is one job per page, each page searched against
//! the same byte budget independently.

use serde::{Deserialize, Serialize};

use super::JobError;
use crate::decode::Bitmap;
use crate::encode::{
    encode_to_budget, EncodedImage, ImageMime, SearchOptions, PAGE_SEARCH_ITERATIONS,
};

/// Quality for unbudgeted page encodes.
pub const DEFAULT_PAGE_QUALITY: f32 = 0.95;

/// Rendering resolution presets offered for page export.
///
/// The renderer multiplies the page's natural (72 DPI) viewport by the
/// preset's factor before rasterizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderScale {
    /// 72 DPI, the page's natural size. Fastest.
    Screen,
    /// 150 DPI. The default for readable exports.
    #[default]
    Standard,
    /// 300 DPI, print-oriented. Slowest and largest.
    High,
}

impl RenderScale {
    /// Viewport multiplier over the natural 72 DPI size.
    pub fn multiplier(self) -> f32 {
        match self {
            RenderScale::Screen => 1.0,
            RenderScale::Standard => 2.0,
            RenderScale::High => 4.0,
        }
    }

    /// Nominal DPI label shown in the UI.
    pub fn dpi(self) -> u32 {
        match self {
            RenderScale::Screen => 72,
            RenderScale::Standard => 150,
            RenderScale::High => 300,
        }
    }

    /// Resolve a DPI label back to a preset; unknown values fall back to
    /// the default.
    pub fn from_dpi(dpi: u32) -> Self {
        match dpi {
            72 => RenderScale::Screen,
            150 => RenderScale::Standard,
            300 => RenderScale::High,
            _ => RenderScale::default(),
        }
    }
}

/// Export of one rendered PDF page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageExportJob {
    /// One-based page number, used only for the download name.
    pub page_number: u32,
    /// Quality for the single encode when no budget is set.
    pub quality: f32,
    /// Optional per-page byte budget; engages the quality search.
    pub target_bytes: Option<u64>,
}

impl PageExportJob {
    pub fn new(page_number: u32) -> Self {
        Self {
            page_number,
            quality: DEFAULT_PAGE_QUALITY,
            target_bytes: None,
        }
    }

    /// Set the per-page byte budget from the tool's target-KB field.
    ///
    /// Zero means the field was left empty and no budget applies.
    pub fn with_target_kb(mut self, kb: u64) -> Self {
        self.target_bytes = (kb > 0).then_some(kb * 1024);
        self
    }

    /// Encode the rendered page as a JPEG.
    ///
    /// Budgeted exports use the shorter page iteration count; re-encoding
    /// a full page render six times already pins quality well below a
    /// visible step.
    pub fn run(&self, page: &Bitmap) -> Result<EncodedImage, JobError> {
        let options = SearchOptions {
            byte_budget: self.target_bytes,
            fixed_quality: self.quality,
            ..SearchOptions::default()
        }
        .iterations(PAGE_SEARCH_ITERATIONS);

        Ok(encode_to_budget(page, ImageMime::Jpeg, &options)?)
    }

    /// Download name for this page, e.g. `page-3.jpg`.
    pub fn output_name(&self) -> String {
        format!("page-{}.jpg", self.page_number)
    }
}
