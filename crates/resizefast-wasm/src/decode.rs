//! Image decoding WASM bindings.
//!
//! This module exposes the resizefast-core decoding entry point to
//! JavaScript: uploaded file bytes in, an RGBA [`JsBitmap`] out.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@resizefast/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const bitmap = decode_image(bytes);
//! console.log(`Decoded ${bitmap.width}x${bitmap.height}`);
//! ```

use crate::types::JsBitmap;
use resizefast_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an uploaded image file into an RGBA bitmap.
///
/// The container format (JPEG, PNG, WebP, BMP) is sniffed from the bytes;
/// the upload's file extension is never consulted. EXIF orientation is
/// baked into the pixels, so a phone photo shot sideways comes back
/// upright.
///
/// # Arguments
///
/// * `bytes` - The raw file bytes as a `Uint8Array`
///
/// # Returns
///
/// A `JsBitmap` containing the decoded RGBA pixel data, or an error if
/// decoding fails.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are empty
/// - The bytes are not a supported raster format
/// - The file is corrupted or truncated
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const bitmap = decode_image(bytes);
/// const imageData = new ImageData(
///   new Uint8ClampedArray(bitmap.pixels()),
///   bitmap.width,
///   bitmap.height,
/// );
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    decode::decode_bitmap(bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
