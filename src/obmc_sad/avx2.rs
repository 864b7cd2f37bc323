#![allow(clippy::undocumented_unsafe_blocks)]
#![allow(unsafe_op_in_unsafe_fn)]

use std::{arch::x86_64::*, num::NonZeroUsize};

use super::OBMC_WEIGHT_BITS;
use crate::util::Pixel;

const SHIFT: i32 = OBMC_WEIGHT_BITS as i32;
const ROUND: i32 = 1 << (OBMC_WEIGHT_BITS - 1);

/// Sample types that can be loaded and zero-extended into 32-bit lanes.
trait WidenLoad: Copy {
    /// Loads 4 samples into the four 32-bit lanes of an `__m128i`.
    unsafe fn load4(ptr: *const Self) -> __m128i;

    /// Loads 8 samples into the eight 32-bit lanes of an `__m256i`.
    unsafe fn load8(ptr: *const Self) -> __m256i;
}

impl WidenLoad for u8 {
    #[inline(always)]
    unsafe fn load4(ptr: *const u8) -> __m128i {
        let four_bytes = ptr.cast::<i32>().read_unaligned();
        _mm_cvtepu8_epi32(_mm_cvtsi32_si128(four_bytes))
    }

    #[inline(always)]
    unsafe fn load8(ptr: *const u8) -> __m256i {
        _mm256_cvtepu8_epi32(_mm_loadl_epi64(ptr.cast()))
    }
}

impl WidenLoad for u16 {
    #[inline(always)]
    unsafe fn load4(ptr: *const u16) -> __m128i {
        _mm_cvtepu16_epi32(_mm_loadl_epi64(ptr.cast()))
    }

    #[inline(always)]
    unsafe fn load8(ptr: *const u16) -> __m256i {
        _mm256_cvtepu16_epi32(_mm_loadu_si128(ptr.cast()))
    }
}

#[must_use]
#[target_feature(enable = "avx2")]
pub(super) unsafe fn get_obmc_sad<T: Pixel>(
    width: NonZeroUsize,
    height: NonZeroUsize,
    ref_: &[T],
    ref_pitch: NonZeroUsize,
    wsrc: &[i32],
    msk: &[i32],
) -> u32 {
    // `Pixel` is sealed to u8 and u16, so the storage width names the concrete type
    match T::STORAGE_BITS {
        8 => obmc_sad_sized::<u8>(
            width,
            height,
            ref_.as_ptr().cast(),
            ref_pitch,
            wsrc.as_ptr(),
            msk.as_ptr(),
        ),
        16 => obmc_sad_sized::<u16>(
            width,
            height,
            ref_.as_ptr().cast(),
            ref_pitch,
            wsrc.as_ptr(),
            msk.as_ptr(),
        ),
        _ => unreachable!(),
    }
}

#[must_use]
#[target_feature(enable = "avx2")]
unsafe fn obmc_sad_sized<P: WidenLoad>(
    width: NonZeroUsize,
    height: NonZeroUsize,
    a: *const P,
    a_pitch: NonZeroUsize,
    b: *const i32,
    m: *const i32,
) -> u32 {
    match (width.get(), height.get()) {
        (4, 4) => obmc_sad_w4::<P, 4>(a, a_pitch, b, m),
        (4, 8) => obmc_sad_w4::<P, 8>(a, a_pitch, b, m),
        (8, 4) => obmc_sad_w8n::<P, 8, 4>(a, a_pitch, b, m),
        (8, 8) => obmc_sad_w8n::<P, 8, 8>(a, a_pitch, b, m),
        (8, 16) => obmc_sad_w8n::<P, 8, 16>(a, a_pitch, b, m),
        (16, 8) => obmc_sad_w8n::<P, 16, 8>(a, a_pitch, b, m),
        (16, 16) => obmc_sad_w8n::<P, 16, 16>(a, a_pitch, b, m),
        (16, 32) => obmc_sad_w8n::<P, 16, 32>(a, a_pitch, b, m),
        (32, 16) => obmc_sad_w8n::<P, 32, 16>(a, a_pitch, b, m),
        (32, 32) => obmc_sad_w8n::<P, 32, 32>(a, a_pitch, b, m),
        (32, 64) => obmc_sad_w8n::<P, 32, 64>(a, a_pitch, b, m),
        (64, 32) => obmc_sad_w8n::<P, 64, 32>(a, a_pitch, b, m),
        (64, 64) => obmc_sad_w8n::<P, 64, 64>(a, a_pitch, b, m),
        (64, 128) => obmc_sad_w8n::<P, 64, 128>(a, a_pitch, b, m),
        (128, 64) => obmc_sad_w8n::<P, 128, 64>(a, a_pitch, b, m),
        (128, 128) => obmc_sad_w8n::<P, 128, 128>(a, a_pitch, b, m),
        _ => unimplemented!("Invalid block size for OBMC SAD"),
    }
}

#[must_use]
#[target_feature(enable = "avx2")]
unsafe fn obmc_sad_w4<P: WidenLoad, const HEIGHT: usize>(
    a: *const P,
    a_pitch: NonZeroUsize,
    b: *const i32,
    m: *const i32,
) -> u32 {
    let a_pitch = a_pitch.get();
    let v_round = _mm_set1_epi32(ROUND);
    let mut v_sad = _mm_setzero_si128();

    for y in 0..HEIGHT {
        let v_a = P::load4(a.add(y * a_pitch));
        let v_m = _mm_loadu_si128(m.add(y * 4).cast());
        let v_b = _mm_loadu_si128(b.add(y * 4).cast());

        let v_am = _mm_mullo_epi32(v_a, v_m);
        let v_absdiff = _mm_abs_epi32(_mm_sub_epi32(v_b, v_am));
        // abs(i32::MIN) stays 0x80000000, which the logical shift reads as 2^31
        let v_rad = _mm_srli_epi32::<SHIFT>(_mm_add_epi32(v_absdiff, v_round));

        v_sad = _mm_add_epi32(v_sad, v_rad);
    }

    hsum_epi32(v_sad)
}

#[must_use]
#[target_feature(enable = "avx2")]
unsafe fn obmc_sad_w8n<P: WidenLoad, const WIDTH: usize, const HEIGHT: usize>(
    a: *const P,
    a_pitch: NonZeroUsize,
    b: *const i32,
    m: *const i32,
) -> u32 {
    const { assert!(WIDTH >= 8 && WIDTH.is_power_of_two()) };

    let a_pitch = a_pitch.get();
    let v_round = _mm256_set1_epi32(ROUND);
    let mut v_sad = _mm256_setzero_si256();

    for y in 0..HEIGHT {
        let a_row = a.add(y * a_pitch);
        let b_row = b.add(y * WIDTH);
        let m_row = m.add(y * WIDTH);

        for x in (0..WIDTH).step_by(8) {
            let v_a = P::load8(a_row.add(x));
            let v_m = _mm256_loadu_si256(m_row.add(x).cast());
            let v_b = _mm256_loadu_si256(b_row.add(x).cast());

            let v_am = _mm256_mullo_epi32(v_a, v_m);
            let v_absdiff = _mm256_abs_epi32(_mm256_sub_epi32(v_b, v_am));
            let v_rad = _mm256_srli_epi32::<SHIFT>(_mm256_add_epi32(v_absdiff, v_round));

            v_sad = _mm256_add_epi32(v_sad, v_rad);
        }
    }

    let lo = _mm256_castsi256_si128(v_sad);
    let hi = _mm256_extracti128_si256::<1>(v_sad);
    hsum_epi32(_mm_add_epi32(lo, hi))
}

/// Horizontal sum of 4 x u32, wrapping.
#[must_use]
#[target_feature(enable = "avx2")]
unsafe fn hsum_epi32(v: __m128i) -> u32 {
    let sum2 = _mm_add_epi32(v, _mm_shuffle_epi32::<0x4e>(v));
    let sum4 = _mm_add_epi32(sum2, _mm_shuffle_epi32::<0xb1>(sum2));
    _mm_cvtsi128_si32(sum4) as u32
}
