//! Bitmap resampling.
//!
//! Provides exact-dimension resizing using the `image` crate's algorithms.
//! Returns new `Bitmap` instances without modifying the input.

use super::{Bitmap, DecodeError, FilterType};

/// Resize a bitmap to exact dimensions.
///
/// Both upscaling and downscaling are allowed; aspect ratio is whatever the
/// target dimensions say it is. Callers that want to preserve the source
/// ratio compute the target with [`crate::layout::height_for_width`] or
/// [`crate::layout::width_for_height`] first.
///
/// # Arguments
///
/// * `bitmap` - The source bitmap to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero.
pub fn resize(
    bitmap: &Bitmap,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Bitmap, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if bitmap.width == width && bitmap.height == height {
        return Ok(bitmap.clone());
    }

    let rgba_image = bitmap
        .to_rgba_image()
        .ok_or_else(|| DecodeError::DecodeFailed("Pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&rgba_image, width, height, filter.to_image_filter());

    Ok(Bitmap::from_rgba_image(resized))
}
