//! Image resizer WASM bindings.
//!
//! One call resamples a decoded bitmap to exact target dimensions and
//! encodes it, optionally under a byte budget. The aspect-lock helpers
//! back the linked width/height fields in the tool's form.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize_image, height_for_width } from '@resizefast/wasm';
//!
//! const bitmap = decode_image(bytes);
//! const height = height_for_width(800, bitmap.width, bitmap.height);
//! const file = resize_image(bitmap, {
//!   width: 800,
//!   height,
//!   format: 'image/jpeg',
//!   target_kb: 150,
//! });
//! ```

use crate::types::{JsBitmap, JsEncodedFile};
use resizefast_core::encode::ImageMime;
use resizefast_core::jobs::ResizeJob;
use resizefast_core::layout;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Resizer settings passed from TypeScript as a JSON object via
/// serde_wasm_bindgen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsResizeOptions {
    /// Target width in pixels
    pub width: u32,
    /// Target height in pixels
    pub height: u32,
    /// Output format: a MIME string like `"image/jpeg"` or a bare
    /// extension like `"png"`
    pub format: String,
    /// Quality in (0, 1] for the single encode when no budget is set;
    /// defaults to the tool's slider default
    #[serde(default)]
    pub quality: Option<f32>,
    /// Target output size in kilobytes; 0 or missing disables the search
    #[serde(default)]
    pub target_kb: Option<u32>,
}

/// Resample a bitmap to exact dimensions and encode it.
///
/// The bitmap is resampled with a Lanczos3 filter to precisely
/// `width x height`, then encoded in the requested format. When
/// `target_kb` is set and the format is lossy, a quality search fits the
/// output under the budget; lossless formats encode once and may
/// overshoot it.
///
/// # Arguments
///
/// * `image` - The decoded source bitmap
/// * `options` - A `JsResizeOptions` object
///
/// # Returns
///
/// A `JsEncodedFile` whose suggested name advertises the new dimensions,
/// e.g. `scaled-800x600.jpg`.
///
/// # Errors
///
/// Returns an error if:
/// - The options object is malformed or names an unsupported format
/// - Width or height is zero
/// - The encoder rejects the bitmap
///
/// # Example
///
/// ```typescript
/// const file = resize_image(bitmap, { width: 800, height: 600, format: 'webp' });
/// ```
#[wasm_bindgen]
pub fn resize_image(image: &JsBitmap, options: JsValue) -> Result<JsEncodedFile, JsValue> {
    let opts: JsResizeOptions = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid resize options: {}", e)))?;

    let mime = opts
        .format
        .parse::<ImageMime>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let mut job = ResizeJob::new(opts.width, opts.height, mime)
        .with_target_kb(u64::from(opts.target_kb.unwrap_or(0)));
    if let Some(quality) = opts.quality {
        job.quality = quality;
    }

    let result = job
        .run(&image.to_bitmap())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let name = job.output_name();
    Ok(JsEncodedFile::from_encoded(result, mime, name))
}

/// Height that keeps the source aspect ratio at the given width.
///
/// Backs the aspect-lock checkbox: when the user edits the width field,
/// the height field is refilled with this value. Plain nearest rounding,
/// matching what the dimension inputs display.
///
/// # Arguments
///
/// * `width` - The edited target width
/// * `source_width` - Decoded source width
/// * `source_height` - Decoded source height
///
/// # Returns
///
/// The locked height, or 0 when the source has a zero dimension.
#[wasm_bindgen]
pub fn height_for_width(width: u32, source_width: u32, source_height: u32) -> u32 {
    if source_width == 0 || source_height == 0 {
        return 0;
    }
    layout::height_for_width(width, f64::from(source_width) / f64::from(source_height))
}

/// Width that keeps the source aspect ratio at the given height.
///
/// The counterpart of [`height_for_width`] for edits to the height field.
#[wasm_bindgen]
pub fn width_for_height(height: u32, source_width: u32, source_height: u32) -> u32 {
    if source_width == 0 || source_height == 0 {
        return 0;
    }
    layout::width_for_height(height, f64::from(source_width) / f64::from(source_height))
}

/// Tests for the aspect-lock helpers, which return plain numbers and work
/// on all targets. The resize path itself returns `Result<T, JsValue>` and
/// is covered in `wasm_tests`.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_for_width_locks_ratio() {
        assert_eq!(height_for_width(800, 1600, 900), 450);
        assert_eq!(width_for_height(450, 1600, 900), 800);
    }

    #[test]
    fn test_lock_rounds_to_nearest() {
        // 1000 / (1600/900) = 562.5, rounds up.
        assert_eq!(height_for_width(1000, 1600, 900), 563);
    }

    #[test]
    fn test_lock_degenerate_source_yields_zero() {
        assert_eq!(height_for_width(800, 0, 900), 0);
        assert_eq!(height_for_width(800, 1600, 0), 0);
        assert_eq!(width_for_height(600, 0, 0), 0);
    }
}
