//! Bitmap decoding pipeline for ResizeFast.
//!
//! This module provides functionality for:
//! - Decoding uploaded image files (JPEG, PNG, WebP, BMP) into RGBA bitmaps
//! - Baking EXIF orientation into the pixels
//! - Resampling bitmaps to exact target dimensions
//!
//! # Architecture
//!
//! The decoding pipeline is designed to be used from the browser main thread
//! via WASM bindings. All operations are synchronous and single-threaded
//! within WASM; each tool invocation decodes, processes, and encodes one file
//! with no state carried between invocations.
//!
//! # Examples
//!
//! ```ignore
//! use resizefast_core::decode::{decode_bitmap, Bitmap};
//!
//! let upload = std::fs::read("photo.jpg").unwrap();
//! let bitmap = decode_bitmap(&upload).unwrap();
//! println!("Decoded {}x{} bitmap", bitmap.width, bitmap.height);
//! ```

mod reader;
mod resize;
mod types;

pub use reader::decode_bitmap;
pub use resize::resize;
pub use types::{Bitmap, DecodeError, FilterType, Orientation};
