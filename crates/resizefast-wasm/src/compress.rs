//! Image compressor WASM bindings.
//!
//! The compressor takes a decoded bitmap and a kilobyte target and returns
//! a JPEG that fits it, trading resolution first when the target is far
//! too small for the source, then quality.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, compress_to_target, suggested_target_kb } from '@resizefast/wasm';
//!
//! const bitmap = decode_image(bytes);
//! const target = suggested_target_kb(file.size);
//! const out = compress_to_target(bitmap, target, file.name);
//! console.log(`${out.name}: ${out.byte_length} bytes at q=${out.quality}`);
//! ```

use crate::types::{JsBitmap, JsEncodedFile};
use resizefast_core::encode::ImageMime;
use resizefast_core::jobs::{self, CompressJob};
use wasm_bindgen::prelude::*;

/// Compress a bitmap to fit a kilobyte target, as JPEG.
///
/// When the target spreads too thin over the source pixels, the bitmap is
/// first downscaled so quality has room to work; then a quality search
/// fits the encode under the target. An unreachable target is not an
/// error: the lowest-quality encode comes back as a best effort.
///
/// # Arguments
///
/// * `image` - The decoded source bitmap
/// * `target_kb` - Target output size in kilobytes (clamped to at least 1)
/// * `file_name` - Original upload name, woven into the download name;
///   optional
///
/// # Returns
///
/// A `JsEncodedFile` named like `compressed-200kb-photo.jpg`.
///
/// # Errors
///
/// Returns an error only if encoding itself fails; missing the target
/// does not.
///
/// # Example
///
/// ```typescript
/// const out = compress_to_target(bitmap, 200, 'photo.jpg');
/// ```
#[wasm_bindgen]
pub fn compress_to_target(
    image: &JsBitmap,
    target_kb: u32,
    file_name: Option<String>,
) -> Result<JsEncodedFile, JsValue> {
    let job = CompressJob::new(u64::from(target_kb));

    let result = job
        .run(&image.to_bitmap())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let name = job.output_name(file_name.as_deref().unwrap_or("image.jpg"));
    Ok(JsEncodedFile::from_encoded(result, ImageMime::Jpeg, name))
}

/// Pre-fill for the target-size field based on the upload's byte length.
///
/// Large files (over 1 MiB) get a flat 200 KB suggestion; smaller files
/// are offered half their current size, never below 1 KB.
///
/// # Arguments
///
/// * `file_size` - The upload's size in bytes (`File.size`)
#[wasm_bindgen]
pub fn suggested_target_kb(file_size: f64) -> u32 {
    jobs::suggested_target_kb(file_size.max(0.0) as u64) as u32
}
