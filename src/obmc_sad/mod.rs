#[cfg(target_arch = "x86_64")]
#[cfg_attr(feature = "no_simd", allow(dead_code))]
mod avx2;
mod rust;


use std::num::NonZeroUsize;

use cfg_if::cfg_if;

use crate::util::Pixel;

/// Precision of the blend mask: a mask value of `1 << OBMC_WEIGHT_BITS` is a weight of 1.0.
pub const OBMC_WEIGHT_BITS: u32 = 12;

/// Reference samples and mask values must stay below `1 << OBMC_INPUT_BITS`
/// in magnitude for their product to fit a signed 32-bit lane.
pub const OBMC_INPUT_BITS: u32 = 15;

/// Computes the OBMC sum of absolute differences for one block.
///
/// For every pixel in raster order the reference sample is multiplied by its
/// Q12 mask value, subtracted from the weighted source, and the absolute
/// difference is rounded half-up at bit 12:
///
/// ```text
/// sad += (|wsrc[n] - ref[n] * msk[n]| + 2048) >> 12
/// ```
///
/// `wsrc` and `msk` are packed at `width` values per row, while `ref_` is read
/// with a row stride of `ref_pitch`. Arithmetic wraps at 32 bits. Samples and
/// mask values are required to fit in 15 bits; debug builds assert this.
///
/// Width 4 uses a dedicated narrow path, wider blocks are processed in runs of
/// eight pixels. Both paths produce identical sums for any input.
///
/// # Supported Block Sizes
/// - `(4, 4)`, `(4, 8)`, `(8, 4)`, `(8, 8)`, `(8, 16)`, `(16, 8)`
/// - `(16, 16)`, `(16, 32)`, `(32, 16)`, `(32, 32)`, `(32, 64)`, `(64, 32)`
/// - `(64, 64)`, `(64, 128)`, `(128, 64)`, `(128, 128)`
///
/// # Panics
/// Panics if the `(width, height)` combination is not in the list above, or if
/// any of the slices is too short to cover the block.
/// Use [`crate::ObmcSad`] to reject unsupported shapes without panicking.
#[must_use]
pub fn get_obmc_sad<T: Pixel>(
    width: NonZeroUsize,
    height: NonZeroUsize,
    ref_: &[T],
    ref_pitch: NonZeroUsize,
    wsrc: &[i32],
    msk: &[i32],
) -> u32 {
    let (w, h) = (width.get(), height.get());
    assert!(
        wsrc.len() >= w * h && msk.len() >= w * h,
        "weight tables too short for a {w}x{h} block"
    );
    assert!(
        ref_.len() >= (h - 1) * ref_pitch.get() + w,
        "reference too short for a {w}x{h} block"
    );
    debug_assert!(
        inputs_fit_in_15_bits(width, height, ref_, ref_pitch, msk),
        "OBMC inputs exceed {OBMC_INPUT_BITS} bits"
    );

    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
            if crate::util::has_avx2() {
                // SAFETY: We check for AVX2 first, and the slice lengths above
                unsafe {
                    return avx2::get_obmc_sad(width, height, ref_, ref_pitch, wsrc, msk);
                }
            }
        }
    }

    rust::get_obmc_sad(width, height, ref_, ref_pitch, wsrc, msk)
}

fn inputs_fit_in_15_bits<T: Pixel>(
    width: NonZeroUsize,
    height: NonZeroUsize,
    ref_: &[T],
    ref_pitch: NonZeroUsize,
    msk: &[i32],
) -> bool {
    let limit = 1u32 << OBMC_INPUT_BITS;
    let samples_fit = (0..height.get()).all(|y| {
        ref_[y * ref_pitch.get()..][..width.get()]
            .iter()
            .all(|&a| Into::<u32>::into(a) < limit)
    });
    samples_fit
        && msk[..width.get() * height.get()]
            .iter()
            .all(|m| m.unsigned_abs() < limit)
}
