#![allow(clippy::unwrap_used, reason = "allow in test files")]

use quickcheck_macros::quickcheck;

use super::*;

#[test]
fn round_power_of_two_half_up_boundary() {
    assert_eq!(round_power_of_two(2047, 12), 0);
    assert_eq!(round_power_of_two(2048, 12), 1);
    assert_eq!(round_power_of_two(4095, 12), 1);
    assert_eq!(round_power_of_two(6143, 12), 1);
    assert_eq!(round_power_of_two(6144, 12), 2);
}

#[test]
fn round_power_of_two_ties_do_not_go_to_even() {
    // 2.5 rounds to 3, not to the even neighbour 2
    assert_eq!(round_power_of_two(5 * 2048, 12), 3);
    // 0.5 rounds to 1, not to 0
    assert_eq!(round_power_of_two(2048, 12), 1);
}

#[test]
fn round_power_of_two_exact_multiples() {
    assert_eq!(round_power_of_two(0, 12), 0);
    assert_eq!(round_power_of_two(4096, 12), 1);
    assert_eq!(round_power_of_two(100 * 4096, 12), 100);
}

#[test]
fn round_power_of_two_zero_shift() {
    assert_eq!(round_power_of_two(0, 0), 0);
    assert_eq!(round_power_of_two(12345, 0), 12345);
}

#[test]
fn round_power_of_two_largest_abs_diff() {
    // |i32::MIN| is the largest magnitude the kernels can produce
    assert_eq!(round_power_of_two(i32::MIN.unsigned_abs(), 12), 1 << 19);
}

#[quickcheck]
fn round_power_of_two_matches_float_half_up(value: u32) -> bool {
    let value = value >> 1;
    let expected = (f64::from(value) / 4096.0 + 0.5).floor() as u32;
    round_power_of_two(value, 12) == expected
}
