//! Per-upload conversion jobs for the four file tools.
//!
//! Each job is a self-contained value: build it from the tool's settings,
//! hand it one bitmap, take the encoded file. Jobs share the same building
//! blocks (layout planning, cropping, resampling, budgeted encoding) so
//! every tool that accepts a target size gets identical search semantics.
//!
//! Nothing persists between conversions: a job borrows its input, returns
//! an owned result, and is dropped. Batch behavior (the PDF exporter's
//! all-pages loop) is just one job per page.

use std::path::Path;

use thiserror::Error;

mod compress;
mod convert;
mod page;
mod resize;

pub use compress::{suggested_target_kb, CompressJob, DownscalePolicy};
pub use convert::{ConvertJob, DEFAULT_CONVERT_QUALITY};
pub use page::{PageExportJob, RenderScale, DEFAULT_PAGE_QUALITY};
pub use resize::{ResizeJob, DEFAULT_RESIZE_QUALITY};

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::layout::LayoutError;

/// Any failure a conversion job can surface.
#[derive(Debug, Error)]
pub enum JobError {
    /// Geometry planning rejected the source or the policy.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Resampling rejected the requested dimensions.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Encoding or the budget search failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Derive a safe download stem from an uploaded file name.
///
/// Directory segments are flattened so the browser download stays tidy; an
/// empty or missing name falls back to `"converted"`.
pub(crate) fn file_stem(original: Option<&str>) -> String {
    let stem = original
        .map(Path::new)
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("converted");

    stem.chars()
        .map(|ch| if ch == '/' || ch == '\\' { '_' } else { ch })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_strips_extension() {
        assert_eq!(file_stem(Some("holiday.jpg")), "holiday");
        assert_eq!(file_stem(Some("archive.tar.gz")), "archive.tar");
    }

    #[test]
    fn test_file_stem_flattens_directories() {
        assert_eq!(file_stem(Some("a/b/photo.png")), "photo");
    }

    #[test]
    fn test_file_stem_fallback() {
        assert_eq!(file_stem(None), "converted");
        assert_eq!(file_stem(Some("")), "converted");
        assert_eq!(file_stem(Some("   ")), "converted");
    }
}
