use std::num::NonZeroUsize;

use super::OBMC_WEIGHT_BITS;
use crate::util::{Pixel, math::round_power_of_two};

#[must_use]
pub(super) fn get_obmc_sad<T: Pixel>(
    width: NonZeroUsize,
    height: NonZeroUsize,
    ref_: &[T],
    ref_pitch: NonZeroUsize,
    wsrc: &[i32],
    msk: &[i32],
) -> u32 {
    match (width.get(), height.get()) {
        (4, 4) => obmc_sad_w4::<T, 4>(ref_, ref_pitch, wsrc, msk),
        (4, 8) => obmc_sad_w4::<T, 8>(ref_, ref_pitch, wsrc, msk),
        (8, 4) => obmc_sad_w8n::<T, 8, 4>(ref_, ref_pitch, wsrc, msk),
        (8, 8) => obmc_sad_w8n::<T, 8, 8>(ref_, ref_pitch, wsrc, msk),
        (8, 16) => obmc_sad_w8n::<T, 8, 16>(ref_, ref_pitch, wsrc, msk),
        (16, 8) => obmc_sad_w8n::<T, 16, 8>(ref_, ref_pitch, wsrc, msk),
        (16, 16) => obmc_sad_w8n::<T, 16, 16>(ref_, ref_pitch, wsrc, msk),
        (16, 32) => obmc_sad_w8n::<T, 16, 32>(ref_, ref_pitch, wsrc, msk),
        (32, 16) => obmc_sad_w8n::<T, 32, 16>(ref_, ref_pitch, wsrc, msk),
        (32, 32) => obmc_sad_w8n::<T, 32, 32>(ref_, ref_pitch, wsrc, msk),
        (32, 64) => obmc_sad_w8n::<T, 32, 64>(ref_, ref_pitch, wsrc, msk),
        (64, 32) => obmc_sad_w8n::<T, 64, 32>(ref_, ref_pitch, wsrc, msk),
        (64, 64) => obmc_sad_w8n::<T, 64, 64>(ref_, ref_pitch, wsrc, msk),
        (64, 128) => obmc_sad_w8n::<T, 64, 128>(ref_, ref_pitch, wsrc, msk),
        (128, 64) => obmc_sad_w8n::<T, 128, 64>(ref_, ref_pitch, wsrc, msk),
        (128, 128) => obmc_sad_w8n::<T, 128, 128>(ref_, ref_pitch, wsrc, msk),
        _ => unimplemented!("Invalid block size for OBMC SAD"),
    }
}

/// Rounded weighted absolute difference of a single pixel.
#[must_use]
#[inline(always)]
pub(super) fn rounded_abs_diff<T: Pixel>(a: T, wsrc: i32, msk: i32) -> u32 {
    let a: i32 = a.into();
    let diff = wsrc.wrapping_sub(a.wrapping_mul(msk));
    round_power_of_two(diff.unsigned_abs(), OBMC_WEIGHT_BITS)
}

#[must_use]
fn obmc_sad_w4<T: Pixel, const HEIGHT: usize>(
    ref_: &[T],
    ref_pitch: NonZeroUsize,
    wsrc: &[i32],
    msk: &[i32],
) -> u32 {
    const WIDTH: usize = 4;

    let wsrc = &wsrc[..WIDTH * HEIGHT];
    let msk = &msk[..WIDTH * HEIGHT];
    let mut sad = 0u32;
    for (y, (b_row, m_row)) in wsrc
        .chunks_exact(WIDTH)
        .zip(msk.chunks_exact(WIDTH))
        .enumerate()
    {
        let a_row = &ref_[y * ref_pitch.get()..][..WIDTH];
        sad = a_row
            .iter()
            .zip(b_row)
            .zip(m_row)
            .fold(sad, |acc, ((&a, &b), &m)| {
                acc.wrapping_add(rounded_abs_diff(a, b, m))
            });
    }
    sad
}

#[must_use]
fn obmc_sad_w8n<T: Pixel, const WIDTH: usize, const HEIGHT: usize>(
    ref_: &[T],
    ref_pitch: NonZeroUsize,
    wsrc: &[i32],
    msk: &[i32],
) -> u32 {
    const LANES: usize = 8;
    const { assert!(WIDTH >= LANES && WIDTH.is_power_of_two()) };

    let wsrc = &wsrc[..WIDTH * HEIGHT];
    let msk = &msk[..WIDTH * HEIGHT];
    // one partial sum per lane, reduced at the end like a vector register
    let mut lanes = [0u32; LANES];
    for (y, (b_row, m_row)) in wsrc
        .chunks_exact(WIDTH)
        .zip(msk.chunks_exact(WIDTH))
        .enumerate()
    {
        let a_row = &ref_[y * ref_pitch.get()..][..WIDTH];
        for ((a, b), m) in a_row
            .chunks_exact(LANES)
            .zip(b_row.chunks_exact(LANES))
            .zip(m_row.chunks_exact(LANES))
        {
            for i in 0..LANES {
                lanes[i] = lanes[i].wrapping_add(rounded_abs_diff(a[i], b[i], m[i]));
            }
        }
    }
    lanes.into_iter().fold(0, u32::wrapping_add)
}
