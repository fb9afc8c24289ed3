//! Size-constrained encoding: binary search over the quality knob.
//!
//! Given a byte budget, the search bisects the quality interval, probing the
//! codec at each midpoint and keeping the bytes of the best fitting probe.
//! The codec is treated as a black box whose output size grows (roughly)
//! monotonically with quality; nothing here inspects the encoded bytes.
//!
//! Every path returns *something*: when even the lowest quality overshoots
//! the budget, the floor-quality encode is returned as a best effort rather
//! than an error. Undershooting a budget is never a failure.

use serde::{Deserialize, Serialize};

use super::codec::{Encoder, ImageMime, MimeEncoder};
use super::EncodeError;
use crate::decode::Bitmap;

/// Lowest quality the search will probe or emit.
///
/// Also the left edge of the bisection interval, so the achievable quality
/// resolution after `n` iterations is `(1.0 - FLOOR_QUALITY) / 2^n`.
pub const FLOOR_QUALITY: f32 = 0.01;

/// Bisection steps for the interactive image tools.
///
/// Eight steps resolve quality to better than 1/256 of the interval, well
/// below a visible difference, while bounding the work per conversion.
pub const DEFAULT_SEARCH_ITERATIONS: u32 = 8;

/// Bisection steps for PDF page export, where each probe re-encodes a full
/// page render and a coarser answer is acceptable.
pub const PAGE_SEARCH_ITERATIONS: u32 = 6;

/// Quality used when no byte budget is given and the caller didn't pick one.
pub const DEFAULT_FIXED_QUALITY: f32 = 0.92;

/// How an encode should treat output size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Maximum acceptable output size in bytes; `None` disables the search.
    pub byte_budget: Option<u64>,
    /// Quality for the single encode when no budget is given.
    pub fixed_quality: f32,
    /// Number of bisection steps when a budget is given.
    pub max_iterations: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            byte_budget: None,
            fixed_quality: DEFAULT_FIXED_QUALITY,
            max_iterations: DEFAULT_SEARCH_ITERATIONS,
        }
    }
}

impl SearchOptions {
    /// Single-encode options at `quality`, no byte budget.
    pub fn fixed(quality: f32) -> Self {
        Self {
            byte_budget: None,
            fixed_quality: quality,
            ..Self::default()
        }
    }

    /// Budget-constrained options with the default iteration count.
    ///
    /// A zero budget means the user left the size field empty; it disables
    /// the search and falls back to a single encode at `fallback_quality`.
    pub fn budgeted(budget_bytes: u64, fallback_quality: f32) -> Self {
        Self {
            byte_budget: (budget_bytes > 0).then_some(budget_bytes),
            fixed_quality: fallback_quality,
            ..Self::default()
        }
    }

    /// Override the bisection step count.
    pub fn iterations(mut self, count: u32) -> Self {
        self.max_iterations = count;
        self
    }

    fn validate(&self) -> Result<(), EncodeError> {
        if self.max_iterations == 0 {
            return Err(EncodeError::InvalidOptions(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !(self.fixed_quality > 0.0 && self.fixed_quality <= 1.0) {
            return Err(EncodeError::InvalidOptions(format!(
                "fixed_quality must be in (0, 1], got {}",
                self.fixed_quality
            )));
        }
        if self.byte_budget == Some(0) {
            return Err(EncodeError::InvalidOptions(
                "byte_budget must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// The outcome of an encode: compressed bytes plus the quality that
/// produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    /// The encoded file bytes, owned by the caller.
    pub bytes: Vec<u8>,
    /// The quality scalar the bytes were encoded at.
    pub quality: f32,
}

impl EncodedImage {
    /// Encoded size in bytes.
    pub fn byte_len(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Find the highest quality whose encoded size fits the byte budget.
///
/// With no budget in `options`, encodes once at the fixed quality. With a
/// budget, runs `max_iterations` bisection steps over
/// `[FLOOR_QUALITY, 1.0]`: a probe that overshoots the budget lowers the
/// upper bound, a probe that fits (equality included) raises the lower
/// bound and keeps those bytes as the candidate result. If no probe ever
/// fits, the bitmap is re-encoded once at `FLOOR_QUALITY` and returned as
/// a best effort.
///
/// Lossless codecs short-circuit to a single encode, since their output
/// does not respond to quality.
///
/// # Errors
///
/// Returns `EncodeError::InvalidOptions` for malformed options, and
/// propagates any codec failure. Overshooting the budget is not an error.
pub fn search_encode<E: Encoder + ?Sized>(
    bitmap: &Bitmap,
    encoder: &E,
    options: &SearchOptions,
) -> Result<EncodedImage, EncodeError> {
    options.validate()?;

    let budget = match options.byte_budget {
        Some(budget) => budget,
        None => {
            let bytes = encoder.encode(bitmap, options.fixed_quality)?;
            return Ok(EncodedImage {
                bytes,
                quality: options.fixed_quality,
            });
        }
    };

    // One encode tells the whole story for a lossless codec; the result is
    // returned whether or not it fits the budget.
    if !encoder.is_lossy() {
        let bytes = encoder.encode(bitmap, 1.0)?;
        return Ok(EncodedImage {
            bytes,
            quality: 1.0,
        });
    }

    let mut low = FLOOR_QUALITY;
    let mut high = 1.0f32;
    let mut best: Option<Vec<u8>> = None;

    for _ in 0..options.max_iterations {
        let mid = (low + high) / 2.0;
        let bytes = encoder.encode(bitmap, mid)?;

        if bytes.len() as u64 > budget {
            high = mid;
        } else {
            // Exactly on budget counts as fitting
            low = mid;
            best = Some(bytes);
        }
    }

    match best {
        Some(bytes) => Ok(EncodedImage {
            bytes,
            quality: low,
        }),
        None => {
            // Even the floor overshoots; emit it anyway rather than refuse
            let bytes = encoder.encode(bitmap, FLOOR_QUALITY)?;
            Ok(EncodedImage {
                bytes,
                quality: FLOOR_QUALITY,
            })
        }
    }
}

/// Encode `bitmap` in `mime` format under `options`.
///
/// Convenience wrapper that runs [`search_encode`] with the production
/// codec for `mime`.
pub fn encode_to_budget(
    bitmap: &Bitmap,
    mime: ImageMime,
    options: &SearchOptions,
) -> Result<EncodedImage, EncodeError> {
    search_encode(bitmap, &MimeEncoder::new(mime), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// A codec whose output size is exactly `round(quality * scale)` bytes.
    struct LinearCodec {
        scale: f64,
        calls: Cell<u32>,
    }

    impl LinearCodec {
        fn new(scale: f64) -> Self {
            Self {
                scale,
                calls: Cell::new(0),
            }
        }
    }

    impl Encoder for LinearCodec {
        fn encode(&self, _bitmap: &Bitmap, quality: f32) -> Result<Vec<u8>, EncodeError> {
            self.calls.set(self.calls.get() + 1);
            let size = (quality as f64 * self.scale).round() as usize;
            Ok(vec![0u8; size])
        }

        fn is_lossy(&self) -> bool {
            true
        }
    }

    /// A codec that always produces the same bytes, like PNG or WebP here.
    struct FlatCodec {
        size: usize,
        calls: Cell<u32>,
    }

    impl Encoder for FlatCodec {
        fn encode(&self, _bitmap: &Bitmap, _quality: f32) -> Result<Vec<u8>, EncodeError> {
            self.calls.set(self.calls.get() + 1);
            Ok(vec![0u8; self.size])
        }

        fn is_lossy(&self) -> bool {
            false
        }
    }

    fn any_bitmap() -> Bitmap {
        Bitmap::new(2, 2, vec![100u8; 2 * 2 * 4])
    }

    #[test]
    fn test_fixed_path_encodes_exactly_once() {
        let codec = LinearCodec::new(100_000.0);
        let options = SearchOptions::fixed(0.92);

        let result = search_encode(&any_bitmap(), &codec, &options).unwrap();

        assert_eq!(codec.calls.get(), 1);
        assert_eq!(result.quality, 0.92);
        assert_eq!(result.byte_len(), 92_000);
    }

    #[test]
    fn test_budget_converges_on_quality_threshold() {
        // size(q) = round(q * 102400); fits exactly when q <= 0.5.
        let codec = LinearCodec::new(102_400.0);
        let options = SearchOptions::budgeted(51_200, 0.92);

        let result = search_encode(&any_bitmap(), &codec, &options).unwrap();

        assert!(result.byte_len() <= 51_200);
        // Eight bisection steps pin the threshold to within (1 - 0.01) / 256.
        assert!(
            (result.quality - 0.5).abs() <= 0.99 / 256.0 + 1e-6,
            "quality {} should be within one step of 0.5",
            result.quality
        );
        assert_eq!(codec.calls.get(), 8);
    }

    #[test]
    fn test_budget_result_is_best_fitting_probe() {
        let codec = LinearCodec::new(200_000.0);
        let options = SearchOptions::budgeted(60_000, 0.92);

        let result = search_encode(&any_bitmap(), &codec, &options).unwrap();

        // The kept bytes are the ones encoded at the reported quality.
        let expected = (result.quality as f64 * 200_000.0).round() as u64;
        assert_eq!(result.byte_len(), expected);
        assert!(result.byte_len() <= 60_000);
    }

    #[test]
    fn test_exact_budget_hit_counts_as_fitting() {
        // After the first probe at mid = 0.505, size = 1010 bytes.
        // With budget exactly 1010 the probe must be kept, not rejected.
        let codec = LinearCodec::new(2_000.0);
        let options = SearchOptions::budgeted(1_010, 0.92).iterations(1);

        let result = search_encode(&any_bitmap(), &codec, &options).unwrap();

        assert_eq!(result.byte_len(), 1_010);
        assert!((result.quality - 0.505).abs() < 1e-6);
    }

    #[test]
    fn test_impossible_budget_falls_back_to_floor() {
        // Even quality 0.01 produces 1024 bytes; budget is 1 byte.
        let codec = LinearCodec::new(102_400.0);
        let options = SearchOptions::budgeted(1, 0.92);

        let result = search_encode(&any_bitmap(), &codec, &options).unwrap();

        assert_eq!(result.quality, FLOOR_QUALITY);
        assert_eq!(result.byte_len(), 1024);
        // Eight failed probes plus the floor fallback encode.
        assert_eq!(codec.calls.get(), 9);
    }

    #[test]
    fn test_generous_budget_converges_high() {
        let codec = LinearCodec::new(1_000.0);
        let options = SearchOptions::budgeted(1_000_000, 0.92);

        let result = search_encode(&any_bitmap(), &codec, &options).unwrap();

        // Everything fits, so the search walks toward 1.0.
        assert!(result.quality > 0.99);
    }

    #[test]
    fn test_lossless_budget_short_circuits() {
        let codec = FlatCodec {
            size: 5_000,
            calls: Cell::new(0),
        };
        let options = SearchOptions::budgeted(1_000, 0.92);

        let result = search_encode(&any_bitmap(), &codec, &options).unwrap();

        // One encode, returned as-is even though it overshoots the budget.
        assert_eq!(codec.calls.get(), 1);
        assert_eq!(result.byte_len(), 5_000);
        assert_eq!(result.quality, 1.0);
    }

    #[test]
    fn test_zero_budget_means_no_budget() {
        let codec = LinearCodec::new(100_000.0);
        let options = SearchOptions::budgeted(0, 0.75);

        let result = search_encode(&any_bitmap(), &codec, &options).unwrap();

        assert_eq!(codec.calls.get(), 1);
        assert_eq!(result.quality, 0.75);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let codec = LinearCodec::new(100.0);

        let zero_iterations = SearchOptions::budgeted(1_000, 0.9).iterations(0);
        assert!(matches!(
            search_encode(&any_bitmap(), &codec, &zero_iterations),
            Err(EncodeError::InvalidOptions(_))
        ));

        let bad_quality = SearchOptions::fixed(0.0);
        assert!(matches!(
            search_encode(&any_bitmap(), &codec, &bad_quality),
            Err(EncodeError::InvalidOptions(_))
        ));

        let nan_quality = SearchOptions::fixed(f32::NAN);
        assert!(search_encode(&any_bitmap(), &codec, &nan_quality).is_err());

        let explicit_zero_budget = SearchOptions {
            byte_budget: Some(0),
            ..SearchOptions::default()
        };
        assert!(search_encode(&any_bitmap(), &codec, &explicit_zero_budget).is_err());
    }

    #[test]
    fn test_page_iteration_count() {
        let codec = LinearCodec::new(102_400.0);
        let options = SearchOptions::budgeted(51_200, 0.95).iterations(PAGE_SEARCH_ITERATIONS);

        let result = search_encode(&any_bitmap(), &codec, &options).unwrap();

        assert_eq!(codec.calls.get(), 6);
        assert!(result.byte_len() <= 51_200);
    }

    #[test]
    fn test_real_jpeg_budget_is_respected() {
        // Noisy bitmap so JPEG actually has size to trade away.
        let mut pixels = Vec::with_capacity(128 * 128 * 4);
        for i in 0..128 * 128 {
            pixels.extend_from_slice(&[
                ((i * 97) % 256) as u8,
                ((i * 31) % 256) as u8,
                ((i * 13) % 256) as u8,
                255,
            ]);
        }
        let bitmap = Bitmap::new(128, 128, pixels);

        let unconstrained = encode_to_budget(&bitmap, ImageMime::Jpeg, &SearchOptions::fixed(1.0))
            .unwrap()
            .byte_len();
        let budget = unconstrained / 2;

        let result =
            encode_to_budget(&bitmap, ImageMime::Jpeg, &SearchOptions::budgeted(budget, 0.92))
                .unwrap();

        assert!(
            result.byte_len() <= budget,
            "result {} exceeds budget {}",
            result.byte_len(),
            budget
        );
        assert!(result.quality >= FLOOR_QUALITY && result.quality <= 1.0);
    }

    #[test]
    fn test_real_jpeg_impossible_budget_still_returns_bytes() {
        let bitmap = Bitmap::new(16, 16, vec![200u8; 16 * 16 * 4]);

        let result =
            encode_to_budget(&bitmap, ImageMime::Jpeg, &SearchOptions::budgeted(1, 0.92)).unwrap();

        // A one-byte budget is unreachable; the floor encode comes back anyway.
        assert_eq!(result.quality, FLOOR_QUALITY);
        assert!(result.byte_len() > 1);
        assert_eq!(&result.bytes[0..2], &[0xFF, 0xD8]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;

    struct LinearCodec {
        scale: f64,
        calls: Cell<u32>,
    }

    impl Encoder for LinearCodec {
        fn encode(&self, _bitmap: &Bitmap, quality: f32) -> Result<Vec<u8>, EncodeError> {
            self.calls.set(self.calls.get() + 1);
            Ok(vec![0u8; (quality as f64 * self.scale).round() as usize])
        }

        fn is_lossy(&self) -> bool {
            true
        }
    }

    /// A codec with a step-shaped size curve: cheap below the threshold,
    /// expensive at or above it.
    struct StepCodec {
        threshold: f32,
        small: usize,
        large: usize,
    }

    impl Encoder for StepCodec {
        fn encode(&self, _bitmap: &Bitmap, quality: f32) -> Result<Vec<u8>, EncodeError> {
            let size = if quality < self.threshold {
                self.small
            } else {
                self.large
            };
            Ok(vec![0u8; size])
        }

        fn is_lossy(&self) -> bool {
            true
        }
    }

    fn any_bitmap() -> Bitmap {
        Bitmap::new(2, 2, vec![50u8; 16])
    }

    proptest! {
        /// Property: A fitting result never exceeds the budget, and a
        /// non-floor result implies at least one probe fit.
        #[test]
        fn prop_result_fits_or_is_floor(
            scale in 1_000.0f64..10_000_000.0,
            budget in 1u64..1_000_000,
            iterations in 1u32..=10,
        ) {
            let codec = LinearCodec { scale, calls: Cell::new(0) };
            let options = SearchOptions::budgeted(budget, 0.92).iterations(iterations);

            let result = search_encode(&any_bitmap(), &codec, &options).unwrap();

            if result.quality > FLOOR_QUALITY {
                prop_assert!(result.byte_len() <= budget);
            }
        }

        /// Property: Reported quality always stays inside [FLOOR_QUALITY, 1.0].
        #[test]
        fn prop_quality_stays_in_range(
            scale in 1.0f64..10_000_000.0,
            budget in 1u64..1_000_000,
            iterations in 1u32..=12,
        ) {
            let codec = LinearCodec { scale, calls: Cell::new(0) };
            let options = SearchOptions::budgeted(budget, 0.92).iterations(iterations);

            let result = search_encode(&any_bitmap(), &codec, &options).unwrap();

            prop_assert!(result.quality >= FLOOR_QUALITY);
            prop_assert!(result.quality <= 1.0);
        }

        /// Property: The probe count is exactly max_iterations, plus one
        /// fallback encode when nothing fit.
        #[test]
        fn prop_probe_count_is_bounded(
            scale in 1_000.0f64..1_000_000.0,
            budget in 1u64..1_000_000,
            iterations in 1u32..=10,
        ) {
            let codec = LinearCodec { scale, calls: Cell::new(0) };
            let options = SearchOptions::budgeted(budget, 0.92).iterations(iterations);

            let result = search_encode(&any_bitmap(), &codec, &options).unwrap();

            // A floor-quality result means no probe fit and one extra
            // fallback encode ran.
            let calls = codec.calls.get();
            if result.quality == FLOOR_QUALITY {
                prop_assert_eq!(calls, iterations + 1);
            } else {
                prop_assert_eq!(calls, iterations);
            }
        }

        /// Property: The search lands within one bisection step of the true
        /// quality threshold for a monotone codec.
        #[test]
        fn prop_converges_within_one_step(
            threshold_pct in 5u32..=95,
            iterations in 4u32..=10,
        ) {
            let threshold = threshold_pct as f64 / 100.0;
            // Fits exactly when quality <= threshold.
            let scale = 100_000.0;
            let budget = (threshold * scale).floor() as u64;
            let codec = LinearCodec { scale, calls: Cell::new(0) };
            let options = SearchOptions::budgeted(budget, 0.92).iterations(iterations);

            let result = search_encode(&any_bitmap(), &codec, &options).unwrap();

            let step = (1.0 - FLOOR_QUALITY as f64) / f64::from(1u32 << iterations);
            prop_assert!(
                f64::from(result.quality) <= threshold + 1e-4,
                "quality {} crossed threshold {}", result.quality, threshold
            );
            prop_assert!(
                f64::from(result.quality) >= threshold - step - 1e-4,
                "quality {} more than one step below threshold {}", result.quality, threshold
            );
        }

        /// Property: Step-shaped size curves settle on the cheap side when
        /// only the cheap side fits.
        #[test]
        fn prop_step_codec_settles_below_threshold(
            threshold in 0.1f32..0.9,
        ) {
            let codec = StepCodec { threshold, small: 100, large: 100_000 };
            let options = SearchOptions::budgeted(200, 0.92);

            let result = search_encode(&any_bitmap(), &codec, &options).unwrap();

            if result.quality > FLOOR_QUALITY {
                prop_assert_eq!(result.byte_len(), 100);
                prop_assert!(result.quality < threshold);
            }
        }
    }
}
