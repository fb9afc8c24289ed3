//! Bitmap cropping.
//!
//! Executes a [`CropPlan`] produced by [`crate::layout::plan`] against RGBA
//! pixel data. The plan is in source pixel coordinates; no scaling happens
//! here.
//!
//! # Example
//!
//! ```ignore
//! let plan = layout::plan(bitmap.width, bitmap.height, CropPolicy::SQUARE)?;
//! let framed = crop(&bitmap, &plan);
//! ```

use crate::decode::Bitmap;
use crate::layout::CropPlan;

/// Extract the region described by `plan` into a new bitmap.
///
/// # Behavior
///
/// - A plan covering the whole source returns a copy of the original
/// - A plan extending beyond the source bounds is clamped
/// - Minimum output dimension is 1x1 pixels
pub fn crop(bitmap: &Bitmap, plan: &CropPlan) -> Bitmap {
    // Fast path: identity plan returns a clone
    if plan.covers(bitmap.width, bitmap.height) || bitmap.is_empty() {
        return bitmap.clone();
    }

    // Clamp to bitmap bounds
    let src_x = plan.src_x.min(bitmap.width.saturating_sub(1));
    let src_y = plan.src_y.min(bitmap.height.saturating_sub(1));
    let out_width = plan.width.clamp(1, bitmap.width - src_x);
    let out_height = plan.height.clamp(1, bitmap.height - src_y);

    let src_stride = bitmap.width as usize * 4;
    let dst_stride = out_width as usize * 4;
    let mut output = vec![0u8; dst_stride * out_height as usize];

    // Copy pixel data row by row
    for y in 0..out_height as usize {
        let src_start = (src_y as usize + y) * src_stride + src_x as usize * 4;
        let dst_start = y * dst_stride;
        output[dst_start..dst_start + dst_stride]
            .copy_from_slice(&bitmap.pixels[src_start..src_start + dst_stride]);
    }

    Bitmap {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
