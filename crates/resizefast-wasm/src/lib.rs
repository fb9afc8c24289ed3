//! ResizeFast WASM - WebAssembly bindings for ResizeFast
//!
//! This crate provides WASM bindings to expose the resizefast-core
//! functionality to JavaScript/TypeScript applications. Every tool call is
//! synchronous and stateless: bytes or a bitmap in, an encoded file or a
//! string out.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types ([`JsBitmap`], [`JsEncodedFile`])
//! - `decode` - Image decoding bindings (format sniffing, EXIF orientation)
//! - `compress` - Size-targeted JPEG compression bindings
//! - `resize` - Exact-dimension resizing bindings with aspect-lock helpers
//! - `convert` - Format conversion bindings with aspect-preset cropping
//! - `page` - PDF page export bindings (encode externally rendered pages)
//! - `text` - Text tool bindings (Base64, case transforms, JSON formatting)
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, compress_to_target } from '@resizefast/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! // Compress an upload to 200 KB
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const bitmap = decode_image(bytes);
//! const out = compress_to_target(bitmap, 200, file.name);
//! const blob = new Blob([out.bytes()], { type: out.mime });
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod convert;
mod decode;
mod page;
mod resize;
mod text;
mod types;

// Re-export public types
pub use compress::{compress_to_target, suggested_target_kb};
pub use convert::convert_image;
pub use decode::decode_image;
pub use page::{export_pdf_page, render_scale_multiplier};
pub use resize::{height_for_width, resize_image, width_for_height};
pub use text::{
    base64_decode, base64_encode, base64_from_data_url, convert_case, count_text, format_json,
};
pub use types::{JsBitmap, JsEncodedFile};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Route panics to the browser console instead of `unreachable executed`
    console_error_panic_hook::set_once();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
