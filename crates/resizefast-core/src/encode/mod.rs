//! Bitmap encoding pipeline for ResizeFast.
//!
//! This module provides functionality for:
//! - Encoding RGBA bitmaps to JPEG, PNG, WebP, or BMP
//! - Binary-searching the quality knob to fit an output byte budget
//!
//! # Architecture
//!
//! The encoding pipeline is designed to be used from the browser via WASM
//! bindings. All operations are synchronous and single-threaded within WASM;
//! a budgeted encode simply re-encodes the same bitmap a bounded number of
//! times at different qualities.
//!
//! # Examples
//!
//! ```ignore
//! use resizefast_core::decode::decode_bitmap;
//! use resizefast_core::encode::{encode_to_budget, ImageMime, SearchOptions};
//!
//! let bitmap = decode_bitmap(&upload)?;
//! let options = SearchOptions::budgeted(200 * 1024, 0.92);
//! let result = encode_to_budget(&bitmap, ImageMime::Jpeg, &options)?;
//! println!("Encoded {} bytes at quality {:.2}", result.byte_len(), result.quality);
//! ```

use thiserror::Error;

mod codec;
mod search;

pub use codec::{encode_bitmap, Encoder, ImageMime, MimeEncoder};
pub use search::{
    encode_to_budget, search_encode, EncodedImage, SearchOptions, DEFAULT_FIXED_QUALITY,
    DEFAULT_SEARCH_ITERATIONS, FLOOR_QUALITY, PAGE_SEARCH_ITERATIONS,
};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The format identifier is not one the codecs can produce.
    #[error("Unsupported output format: {0:?}")]
    UnsupportedFormat(String),

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The underlying codec rejected the encode
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Search options are malformed
    #[error("Invalid search options: {0}")]
    InvalidOptions(String),
}
