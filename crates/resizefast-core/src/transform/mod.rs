//! Bitmap transformation operations.
//!
//! This module executes geometry decided elsewhere: cropping runs the plans
//! produced by [`crate::layout`]. Transforms are non-destructive; each
//! returns a new bitmap.
//!
//! # Pipeline Order
//!
//! When a tool processes an upload, operations are applied in this order:
//! 1. Crop (converter framing)
//! 2. Resample (resizer dimensions or compressor downscale)
//! 3. Encode (with or without a byte budget)

mod crop;

pub use crop::crop;
