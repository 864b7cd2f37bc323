#[cfg(test)]
mod tests;

/// Divides `value` by `2^n`, rounding halves up.
///
/// This is the unsigned "add half the divisor, then shift" rounding used by
/// the fixed-point kernels: `(value + 2^(n-1)) >> n`. A shift of zero returns
/// `value` unchanged. `value` must leave room for the rounding bias, which
/// holds for any absolute difference of two `i32`s.
#[must_use]
#[inline(always)]
pub const fn round_power_of_two(value: u32, n: u32) -> u32 {
    (value + ((1 << n) >> 1)) >> n
}
