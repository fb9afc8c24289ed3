//! WASM-compatible wrapper types for bitmaps and encoded files.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! ResizeFast types, handling the conversion between Rust and JavaScript
//! data representations.

use resizefast_core::decode::Bitmap;
use resizefast_core::encode::{EncodedImage, ImageMime};
use wasm_bindgen::prelude::*;

/// A decoded bitmap wrapper for JavaScript.
///
/// Pixels are RGBA, row-major, 4 bytes per pixel - the same layout as a
/// canvas `ImageData` buffer, so rendered canvases (including PDF pages
/// drawn by pdf.js) can be wrapped without conversion.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a
/// copy is made to JavaScript memory as a `Uint8Array`. The `free()` method
/// can be called to explicitly release WASM memory, but this is optional as
/// wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a new JsBitmap from dimensions and RGBA pixel data.
    ///
    /// # Arguments
    /// * `width` - Bitmap width in pixels
    /// * `height` - Bitmap height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsBitmap {
        JsBitmap {
            width,
            height,
            pixels,
        }
    }

    /// Get the bitmap width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the bitmap height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data, sized for a direct
    /// `new ImageData(new Uint8ClampedArray(pixels), width, height)` call.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup
    /// automatically. Call this to immediately release a large bitmap.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsBitmap {
    /// Create a JsBitmap from a core Bitmap.
    pub(crate) fn from_bitmap(bitmap: Bitmap) -> Self {
        Self {
            width: bitmap.width,
            height: bitmap.height,
            pixels: bitmap.pixels,
        }
    }

    /// Convert back to a core Bitmap for processing.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_bitmap(&self) -> Bitmap {
        Bitmap {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// An encoded output file ready for download.
///
/// Wraps the bytes a conversion produced together with the metadata the
/// shell needs to offer them: the MIME type for the Blob, a suggested
/// download name, and the quality the encoder settled on.
///
/// ```typescript
/// const file = compress_to_target(bitmap, 200, upload.name);
/// const blob = new Blob([file.bytes()], { type: file.mime });
/// link.download = file.name;
/// link.href = URL.createObjectURL(blob);
/// file.free();
/// ```
#[wasm_bindgen]
pub struct JsEncodedFile {
    bytes: Vec<u8>,
    mime: &'static str,
    name: String,
    quality: f32,
}

#[wasm_bindgen]
impl JsEncodedFile {
    /// MIME type string for the download Blob, e.g. `"image/jpeg"`.
    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.mime.to_string()
    }

    /// Suggested download file name, e.g. `"compressed-200kb-photo.jpg"`.
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// The quality scalar the encode settled on, in `(0, 1]`.
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// Encoded size in bytes.
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the encoded file bytes as Uint8Array.
    ///
    /// Note: This creates a copy of the byte data.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup
    /// automatically. Call this when a result is superseded by a new
    /// conversion.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsEncodedFile {
    /// Wrap a core encode result for JavaScript.
    pub(crate) fn from_encoded(result: EncodedImage, mime: ImageMime, name: String) -> Self {
        Self {
            bytes: result.bytes,
            mime: mime.mime(),
            name,
            quality: result.quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_bitmap_creation() {
        let bitmap = JsBitmap::new(100, 50, vec![0u8; 100 * 50 * 4]);
        assert_eq!(bitmap.width(), 100);
        assert_eq!(bitmap.height(), 50);
        assert_eq!(bitmap.byte_length(), 20000);
    }

    #[test]
    fn test_js_bitmap_pixels_copy() {
        let pixels = vec![255u8, 128, 64, 255, 32, 16, 8, 255]; // 2 RGBA pixels
        let bitmap = JsBitmap::new(2, 1, pixels.clone());
        assert_eq!(bitmap.pixels(), pixels);
    }

    #[test]
    fn test_js_bitmap_round_trip() {
        let core = Bitmap::new(4, 2, vec![10u8; 4 * 2 * 4]);
        let js = JsBitmap::from_bitmap(core.clone());
        assert_eq!(js.to_bitmap(), core);
    }

    #[test]
    fn test_js_encoded_file_wraps_result() {
        let result = EncodedImage {
            bytes: vec![0xFF, 0xD8, 0xFF, 0xD9],
            quality: 0.72,
        };
        let file =
            JsEncodedFile::from_encoded(result, ImageMime::Jpeg, "page-1.jpg".to_string());

        assert_eq!(file.mime(), "image/jpeg");
        assert_eq!(file.name(), "page-1.jpg");
        assert_eq!(file.quality(), 0.72);
        assert_eq!(file.byte_length(), 4);
        assert_eq!(file.bytes(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
    }
}
