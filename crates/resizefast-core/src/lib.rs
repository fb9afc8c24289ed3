//! ResizeFast Core - File processing library
//!
//! This crate provides the processing core for the ResizeFast in-browser
//! tools: image decoding, crop geometry planning, resampling, byte-budget
//! constrained encoding, and the text utilities (Base64, case transforms,
//! JSON reformatting).
//!
//! The centerpiece is the size-constrained encoder: a bounded binary search
//! over a codec's quality knob that finds the highest quality whose output
//! fits a byte budget, falling back to a floor-quality encode when the
//! budget is out of reach. Every tool that accepts a size target routes
//! through the same search, so their results never drift apart.
//!
//! # Pipeline
//!
//! A conversion walks one bitmap through up to four stages:
//!
//! 1. [`decode::decode_bitmap`] - upload bytes to an RGBA [`Bitmap`]
//! 2. [`layout::plan`] - crop geometry for the chosen aspect policy
//! 3. [`transform::crop`] / [`decode::resize`] - pixels at target geometry
//! 4. [`encode::encode_to_budget`] - compressed bytes, searched or fixed
//!
//! The per-tool compositions of these stages live in [`jobs`].

pub mod decode;
pub mod encode;
pub mod jobs;
pub mod layout;
pub mod text;
pub mod transform;

pub use decode::{decode_bitmap, Bitmap};
pub use encode::{encode_to_budget, EncodedImage, ImageMime, SearchOptions};
pub use layout::{plan, CropPlan, CropPolicy};
pub use transform::crop;
