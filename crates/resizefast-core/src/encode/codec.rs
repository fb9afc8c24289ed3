//! Format dispatch and single-shot bitmap encoding.
//!
//! This module turns an RGBA [`Bitmap`] into compressed bytes in one of the
//! supported output formats. JPEG is the only lossy codec in this stack; its
//! quality knob is the scalar the size-constrained search drives. PNG, WebP
//! and BMP are written losslessly and ignore the quality value.

use std::io::Cursor;
use std::str::FromStr;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use serde::{Deserialize, Serialize};

use super::EncodeError;
use crate::decode::Bitmap;

/// The output formats the tools can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMime {
    /// `image/jpeg`: lossy, no alpha; transparency is flattened onto white.
    #[default]
    Jpeg,
    /// `image/png`: lossless with alpha.
    Png,
    /// `image/webp`: written losslessly with alpha by this encoder.
    WebP,
    /// `image/bmp`: uncompressed with alpha.
    Bmp,
}

impl ImageMime {
    /// The MIME string as used by `<select>` values and download Blobs.
    pub fn mime(self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
            ImageMime::WebP => "image/webp",
            ImageMime::Bmp => "image/bmp",
        }
    }

    /// File extension for download names (no dot).
    pub fn extension(self) -> &'static str {
        match self {
            ImageMime::Jpeg => "jpg",
            ImageMime::Png => "png",
            ImageMime::WebP => "webp",
            ImageMime::Bmp => "bmp",
        }
    }

    /// Whether the encoded size responds to the quality knob.
    ///
    /// Only JPEG is lossy here; a byte-budget search against a lossless
    /// format degenerates to a single encode.
    pub fn is_lossy(self) -> bool {
        matches!(self, ImageMime::Jpeg)
    }
}

impl FromStr for ImageMime {
    type Err = EncodeError;

    /// Parse a MIME string or bare extension, case-insensitively.
    ///
    /// Accepts `"image/jpeg"`, `"jpeg"`, `"jpg"` and the analogous
    /// spellings for the other formats.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "jpeg" | "jpg" => Ok(ImageMime::Jpeg),
            "image/png" | "png" => Ok(ImageMime::Png),
            "image/webp" | "webp" => Ok(ImageMime::WebP),
            "image/bmp" | "bmp" => Ok(ImageMime::Bmp),
            other => Err(EncodeError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// A codec capability: compress one bitmap at one quality.
///
/// Production encodes go through [`MimeEncoder`]; the trait seam exists so
/// the byte-budget search can be driven with synthetic codecs whose size
/// curves are known exactly.
pub trait Encoder {
    /// Encode `bitmap` at `quality` in `(0.0, 1.0]`.
    ///
    /// Lossless codecs may ignore `quality` entirely; they should report
    /// that via [`is_lossy`](Encoder::is_lossy) so searches skip redundant
    /// re-encodes.
    fn encode(&self, bitmap: &Bitmap, quality: f32) -> Result<Vec<u8>, EncodeError>;

    /// Whether the encoded size responds to the quality knob.
    fn is_lossy(&self) -> bool;
}

/// The production [`Encoder`]: dispatches to the image crate's codecs.
#[derive(Debug, Clone, Copy)]
pub struct MimeEncoder {
    mime: ImageMime,
}

impl MimeEncoder {
    pub fn new(mime: ImageMime) -> Self {
        Self { mime }
    }
}

impl Encoder for MimeEncoder {
    fn encode(&self, bitmap: &Bitmap, quality: f32) -> Result<Vec<u8>, EncodeError> {
        encode_bitmap(bitmap, self.mime, quality)
    }

    fn is_lossy(&self) -> bool {
        self.mime.is_lossy()
    }
}

/// Map the canvas-style quality scalar in `(0.0, 1.0]` to the JPEG
/// encoder's 1-100 knob.
fn jpeg_quality(quality: f32) -> u8 {
    if !quality.is_finite() {
        return 1;
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode a bitmap to compressed bytes in the given format.
///
/// # Arguments
///
/// * `bitmap` - RGBA source pixels
/// * `mime` - Output format
/// * `quality` - Quality scalar in `(0.0, 1.0]`; ignored by lossless formats
///
/// # Returns
///
/// The encoded file bytes on success.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for a zero-sized bitmap,
/// `EncodeError::InvalidPixelData` when the buffer length doesn't match the
/// dimensions, and `EncodeError::EncodingFailed` when the codec itself
/// rejects the data.
pub fn encode_bitmap(
    bitmap: &Bitmap,
    mime: ImageMime,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    // Validate dimensions
    if bitmap.width == 0 || bitmap.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: bitmap.width,
            height: bitmap.height,
        });
    }

    // Validate pixel data length
    let expected_len = bitmap.width as usize * bitmap.height as usize * 4;
    if bitmap.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: bitmap.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());

    match mime {
        ImageMime::Jpeg => {
            // JPEG has no alpha channel; flatten like a canvas over a white page
            let rgb = bitmap.to_rgb_on_white();
            let encoder = JpegEncoder::new_with_quality(&mut buffer, jpeg_quality(quality));
            encoder
                .write_image(&rgb, bitmap.width, bitmap.height, ExtendedColorType::Rgb8)
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
        ImageMime::Png => {
            let encoder =
                PngEncoder::new_with_quality(&mut buffer, CompressionType::Default, PngFilter::Adaptive);
            encoder
                .write_image(
                    &bitmap.pixels,
                    bitmap.width,
                    bitmap.height,
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
        ImageMime::WebP => {
            let encoder = WebPEncoder::new_lossless(&mut buffer);
            encoder
                .encode(
                    &bitmap.pixels,
                    bitmap.width,
                    bitmap.height,
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
        ImageMime::Bmp => {
            let mut encoder = BmpEncoder::new(&mut buffer);
            encoder
                .encode(
                    &bitmap.pixels,
                    bitmap.width,
                    bitmap.height,
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
    }

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating bitmap dimensions (keep small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=32, 1u32..=32)
    }

    fn mime_strategy() -> impl Strategy<Value = ImageMime> {
        prop_oneof![
            Just(ImageMime::Jpeg),
            Just(ImageMime::Png),
            Just(ImageMime::WebP),
            Just(ImageMime::Bmp),
        ]
    }

    fn bitmap_for(width: u32, height: u32, seed: u8) -> Bitmap {
        let size = width as usize * height as usize * 4;
        let pixels = (0..size)
            .map(|i| ((i as u32 * 37 + seed as u32) % 256) as u8)
            .collect();
        Bitmap::new(width, height, pixels)
    }

    proptest! {
        /// Property: Valid input encodes successfully in every format.
        #[test]
        fn prop_valid_input_encodes(
            (width, height) in dimensions_strategy(),
            mime in mime_strategy(),
            seed in any::<u8>(),
        ) {
            let bitmap = bitmap_for(width, height, seed);
            let result = encode_bitmap(&bitmap, mime, 0.9);

            prop_assert!(result.is_ok(), "{:?} failed: {:?}", mime, result);
            prop_assert!(!result.unwrap().is_empty());
        }

        /// Property: Encoding is deterministic.
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=16, 1u32..=16),
            mime in mime_strategy(),
            quality in 0.01f32..=1.0,
        ) {
            let bitmap = bitmap_for(width, height, 7);

            let first = encode_bitmap(&bitmap, mime, quality);
            let second = encode_bitmap(&bitmap, mime, quality);

            prop_assert!(first.is_ok() && second.is_ok());
            prop_assert_eq!(first.unwrap(), second.unwrap());
        }

        /// Property: The full canvas quality range maps into the codec's knob.
        #[test]
        fn prop_all_quality_values_work(quality in 0.0f32..=1.0) {
            let bitmap = bitmap_for(8, 8, 3);
            let result = encode_bitmap(&bitmap, ImageMime::Jpeg, quality);

            prop_assert!(result.is_ok(), "quality {} should work after clamping", quality);
        }

        /// Property: Lossless formats round-trip pixel data exactly.
        #[test]
        fn prop_lossless_round_trip(
            (width, height) in (1u32..=16, 1u32..=16),
            seed in any::<u8>(),
        ) {
            let bitmap = bitmap_for(width, height, seed);

            for mime in [ImageMime::Png, ImageMime::WebP] {
                let encoded = encode_bitmap(&bitmap, mime, 1.0).unwrap();
                let decoded = crate::decode::decode_bitmap(&encoded).unwrap();
                prop_assert_eq!(&decoded, &bitmap, "{:?} altered pixels", mime);
            }
        }
    }
}
