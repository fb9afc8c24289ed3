//! PDF page export WASM bindings.
//!
//! Page rasterization stays in JavaScript: pdf.js renders each page into
//! a canvas, and the canvas's `ImageData` buffer comes across as raw RGBA
//! pixels. This module encodes one rendered page per call; exporting a
//! whole document is a loop on the JS side.
//!
//! # Example
//!
//! ```typescript
//! import { export_pdf_page, render_scale_multiplier } from '@resizefast/wasm';
//!
//! const viewport = page.getViewport({ scale: render_scale_multiplier(150) });
//! // ... render the page into a canvas at that viewport ...
//! const data = ctx.getImageData(0, 0, canvas.width, canvas.height);
//! const file = export_pdf_page(data.data, canvas.width, canvas.height, pageNumber, 100);
//! ```

use crate::types::JsEncodedFile;
use resizefast_core::decode::Bitmap;
use resizefast_core::encode::ImageMime;
use resizefast_core::jobs::{PageExportJob, RenderScale};
use wasm_bindgen::prelude::*;

/// Encode one rendered PDF page as a JPEG.
///
/// Takes the page's canvas pixels directly rather than a
/// [`JsBitmap`](crate::types::JsBitmap), so
/// the render loop can hand over each `ImageData` buffer without an extra
/// wrapper allocation. When `target_kb` is non-zero, a quality search fits
/// the page under the budget; each page of a document is searched
/// independently.
///
/// # Arguments
///
/// * `pixels` - RGBA canvas pixels (`ImageData.data`), row-major
/// * `width` - Rendered page width in pixels
/// * `height` - Rendered page height in pixels
/// * `page_number` - One-based page number, used for the download name
/// * `target_kb` - Per-page target size in kilobytes; 0 disables the search
///
/// # Returns
///
/// A `JsEncodedFile` named `page-<n>.jpg`.
///
/// # Errors
///
/// Returns an error if:
/// - The pixel buffer length does not match `width * height * 4`
/// - The encoder rejects the page
///
/// # Example
///
/// ```typescript
/// const file = export_pdf_page(data.data, 1224, 1584, 3, 0);
/// // file.name === 'page-3.jpg'
/// ```
#[wasm_bindgen]
pub fn export_pdf_page(
    pixels: &[u8],
    width: u32,
    height: u32,
    page_number: u32,
    target_kb: u32,
) -> Result<JsEncodedFile, JsValue> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(JsValue::from_str(&format!(
            "Pixel buffer length {} does not match {}x{} RGBA ({} bytes)",
            pixels.len(),
            width,
            height,
            expected
        )));
    }

    let page = Bitmap::new(width, height, pixels.to_vec());
    let job = PageExportJob::new(page_number).with_target_kb(u64::from(target_kb));

    let result = job
        .run(&page)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let name = job.output_name();
    Ok(JsEncodedFile::from_encoded(result, ImageMime::Jpeg, name))
}

/// Viewport multiplier for a DPI preset.
///
/// The page renderer works in the PDF's natural 72 DPI coordinates; the
/// resolution dropdown offers 72, 150 and 300 DPI, which map to viewport
/// scales of 1, 2 and 4. Unknown values fall back to the 150 DPI default.
///
/// # Arguments
///
/// * `dpi` - The selected DPI label
#[wasm_bindgen]
pub fn render_scale_multiplier(dpi: u32) -> f32 {
    RenderScale::from_dpi(dpi).multiplier()
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn rendered_page(width: u32, height: u32) -> Vec<u8> {
        // White page with a dark band, the shape a renderer produces.
        let mut pixels = vec![255u8; (width * height * 4) as usize];
        for y in (height / 4)..(height / 3) {
            for x in 0..width {
                let idx = ((y * width + x) * 4) as usize;
                pixels[idx] = 30;
                pixels[idx + 1] = 30;
                pixels[idx + 2] = 30;
            }
        }
        pixels
    }

    #[wasm_bindgen_test]
    fn test_export_page_names_by_number() {
        let pixels = rendered_page(120, 160);
        let file = export_pdf_page(&pixels, 120, 160, 3, 0).unwrap();

        assert_eq!(file.name(), "page-3.jpg");
        assert_eq!(file.mime(), "image/jpeg");
    }

    #[wasm_bindgen_test]
    fn test_export_page_respects_budget() {
        let pixels = rendered_page(400, 600);
        let file = export_pdf_page(&pixels, 400, 600, 1, 12).unwrap();
        assert!(file.byte_length() <= 12 * 1024);
    }

    #[wasm_bindgen_test]
    fn test_export_page_rejects_short_buffer() {
        let pixels = vec![255u8; 10];
        let result = export_pdf_page(&pixels, 120, 160, 1, 0);
        assert!(result.is_err());
    }
}
