pub mod math;

use std::fmt::Debug;

#[cfg(target_arch = "x86_64")]
cpufeatures::new!(cpuid_avx2, "avx2");

#[cfg(target_arch = "x86_64")]
pub use cpuid_avx2::get as has_avx2;

mod private {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

/// A stored sample type.
///
/// The kernels are generic over this trait, and the only thing they do with a
/// sample is widen it to `i32` before the mask multiply. `u8` carries narrow
/// (8-bit) planes, `u16` carries wide (9 to 16-bit) planes.
///
/// The SIMD kernels load samples straight from memory by storage width, so
/// the trait is sealed to these two types:
///
/// ```compile_fail
/// use obmc_sad::Pixel;
///
/// #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
/// struct Inverted(u8);
///
/// impl From<u8> for Inverted {
///     fn from(v: u8) -> Self {
///         Self(v)
///     }
/// }
/// impl From<Inverted> for i32 {
///     fn from(v: Inverted) -> Self {
///         255 - i32::from(v.0)
///     }
/// }
/// impl From<Inverted> for u32 {
///     fn from(v: Inverted) -> Self {
///         255 - u32::from(v.0)
///     }
/// }
/// impl Pixel for Inverted {
///     const STORAGE_BITS: u8 = 8;
/// }
/// ```
pub trait Pixel:
    private::Sealed
    + Clone
    + Copy
    + Debug
    + Default
    + Into<i32>
    + Into<u32>
    + From<u8>
    + Ord
    + Eq
    + Send
    + Sync
{
    /// Number of bits in the storage type.
    const STORAGE_BITS: u8;
}

impl Pixel for u8 {
    const STORAGE_BITS: u8 = 8;
}

impl Pixel for u16 {
    const STORAGE_BITS: u8 = 16;
}

/// Name of the kernel implementation [`crate::obmc_sad::get_obmc_sad`] will use on this CPU.
#[must_use]
pub fn kernel_impl_name() -> &'static str {
    cfg_if::cfg_if! {
        if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
            if has_avx2() {
                return "avx2";
            }
        }
    }
    "rust"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_bits_match_type_size() {
        assert_eq!(usize::from(u8::STORAGE_BITS), 8 * size_of::<u8>());
        assert_eq!(usize::from(u16::STORAGE_BITS), 8 * size_of::<u16>());
    }
}
