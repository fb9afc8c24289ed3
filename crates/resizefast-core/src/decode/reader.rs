//! Bitmap decoding from raw upload bytes, with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::{Bitmap, DecodeError, Orientation};

/// Decode an uploaded image file into an RGBA bitmap.
///
/// The container format is sniffed from the bytes (JPEG, PNG, WebP, BMP and
/// anything else the enabled codecs understand), and EXIF orientation is
/// baked into the pixels so downstream geometry sees the image the way a
/// browser would display it.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes as uploaded
///
/// # Returns
///
/// A `Bitmap` with RGBA pixel data and correct orientation applied.
///
/// # Errors
///
/// Returns `DecodeError::EmptyInput` for a zero-length input and
/// `DecodeError::DecodeFailed` when the bytes are not a decodable image.
pub fn decode_bitmap(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    // Extract EXIF orientation before decoding
    let orientation = extract_orientation(bytes);

    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| DecodeError::DecodeFailed(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::DecodeFailed(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    Ok(Bitmap::from_rgba_image(oriented.into_rgba8()))
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
