//! Format converter WASM bindings.
//!
//! One call re-containers a decoded bitmap: optional center-crop to an
//! aspect preset, then encode in the chosen format, optionally under a
//! byte budget.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, convert_image } from '@resizefast/wasm';
//!
//! const bitmap = decode_image(bytes);
//! const file = convert_image(bitmap, {
//!   format: 'image/webp',
//!   aspect: '16:9',
//!   file_name: upload.name,
//! });
//! ```

use crate::types::{JsBitmap, JsEncodedFile};
use resizefast_core::encode::ImageMime;
use resizefast_core::jobs::ConvertJob;
use resizefast_core::layout::CropPolicy;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Converter settings passed from TypeScript as a JSON object via
/// serde_wasm_bindgen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsConvertOptions {
    /// Output format: a MIME string like `"image/png"` or a bare
    /// extension like `"webp"`
    pub format: String,
    /// Aspect preset: `"free"` (keep the source shape) or a `"W:H"`
    /// ratio such as `"1:1"`; missing means free
    #[serde(default)]
    pub aspect: Option<String>,
    /// Quality in (0, 1] for the single encode when no budget is set
    #[serde(default)]
    pub quality: Option<f32>,
    /// Target output size in kilobytes; 0 or missing disables the search
    #[serde(default)]
    pub target_kb: Option<u32>,
    /// Original upload name; its stem is kept for the download name
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Convert a bitmap to another format, optionally reframed to an aspect
/// preset.
///
/// An aspect preset center-crops the source on one axis before encoding;
/// `"free"` keeps the source dimensions. When `target_kb` is set and the
/// format is lossy, a quality search fits the output under the budget.
///
/// # Arguments
///
/// * `image` - The decoded source bitmap
/// * `options` - A `JsConvertOptions` object
///
/// # Returns
///
/// A `JsEncodedFile` that keeps the upload's name stem with the new
/// extension, e.g. `holiday.webp`.
///
/// # Errors
///
/// Returns an error if:
/// - The options object is malformed
/// - The format or aspect preset is not recognized
/// - The encoder rejects the bitmap
///
/// # Example
///
/// ```typescript
/// const file = convert_image(bitmap, { format: 'png', aspect: '1:1' });
/// ```
#[wasm_bindgen]
pub fn convert_image(image: &JsBitmap, options: JsValue) -> Result<JsEncodedFile, JsValue> {
    let opts: JsConvertOptions = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid convert options: {}", e)))?;

    let mime = opts
        .format
        .parse::<ImageMime>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let policy = match opts.aspect.as_deref() {
        Some(preset) => preset
            .parse::<CropPolicy>()
            .map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => CropPolicy::Free,
    };

    let mut job = ConvertJob::new(mime)
        .with_policy(policy)
        .with_target_kb(u64::from(opts.target_kb.unwrap_or(0)));
    if let Some(quality) = opts.quality {
        job.quality = quality;
    }

    let result = job
        .run(&image.to_bitmap())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let name = job.output_name(opts.file_name.as_deref());
    Ok(JsEncodedFile::from_encoded(result, mime, name))
}
