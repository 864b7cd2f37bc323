// Performance
#![warn(clippy::imprecise_flops)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::inline_always)]
#![warn(clippy::large_types_passed_by_value)]
#![warn(clippy::naive_bytecount)]
#![warn(clippy::needless_bitwise_bool)]
#![warn(clippy::needless_collect)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::redundant_clone)]
#![warn(clippy::stable_sort_primitive)]
#![warn(clippy::suboptimal_flops)]
#![warn(clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::unnecessary_box_returns)]
// Readability/Code Intention
#![warn(clippy::checked_conversions)]
#![warn(clippy::cloned_instead_of_copied)]
#![warn(clippy::enum_glob_use)]
#![warn(clippy::equatable_if_let)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::implicit_clone)]
#![warn(clippy::inconsistent_struct_constructor)]
#![warn(clippy::invalid_upcast_comparisons)]
#![warn(clippy::macro_use_imports)]
#![warn(clippy::manual_assert)]
#![warn(clippy::manual_is_power_of_two)]
#![warn(clippy::manual_let_else)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::match_bool)]
#![warn(clippy::needless_continue)]
#![warn(clippy::option_if_let_else)]
#![warn(clippy::precedence_bits)]
#![warn(clippy::range_minus_one)]
#![warn(clippy::range_plus_one)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::tests_outside_test_module)]
#![warn(clippy::verbose_bit_mask)]
// Correctness/Safety
#![deny(clippy::cfg_not_test)]
#![warn(clippy::dbg_macro)]
#![deny(clippy::debug_assert_with_mut_call)]
#![deny(clippy::expl_impl_clone_on_copy)]
#![warn(clippy::large_stack_arrays)]
#![warn(clippy::mixed_read_write_in_expression)]
#![deny(clippy::non_send_fields_in_send_ty)]
#![warn(clippy::suspicious_operation_groupings)]
#![warn(clippy::transmute_undefined_repr)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::unwrap_used)]
// Annoyances
#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::uninlined_format_args)]
#![allow(unsafe_op_in_unsafe_fn)]

//! Overlapped block motion compensation SAD.
//!
//! Scores a candidate reference block against a pre-weighted source signal,
//! where each reference sample is scaled by a Q12 blend mask before the
//! comparison and each absolute difference is rounded half-up at bit 12.
//!
//! The usual entry point is [`ObmcSad`], which validates the block shape against
//! the supported catalog and forwards to the matching kernel specialization:
//!
//! ```rust
//! use std::num::{NonZeroU8, NonZeroUsize};
//! use obmc_sad::{ObmcFeatures, ObmcSad, SampleBlock, Samples, WeightTable};
//!
//! let reference = vec![200u8; 8 * 4];
//! let wsrc = vec![200 * 2048; 8 * 4];
//! let msk = vec![2048; 8 * 4];
//!
//! let block = SampleBlock::new(
//!     Samples::Narrow(&reference),
//!     0,
//!     NonZeroUsize::new(8).unwrap(),
//!     8,
//!     4,
//!     NonZeroU8::new(8).unwrap(),
//! )?;
//! let weights = WeightTable::new(&wsrc, &msk)?;
//!
//! let obmc = ObmcSad::new(ObmcFeatures::empty());
//! assert_eq!(obmc.distortion(&block, &weights)?, 0);
//! # Ok::<(), anyhow::Error>(())
//! ```


pub mod block;
pub mod catalog;
pub mod error;
pub mod obmc_sad;
pub mod params;

#[cfg(feature = "bench")]
pub mod util;
#[cfg(not(feature = "bench"))]
mod util;

pub use block::{SampleBlock, Samples, WeightTable};
pub use catalog::{BlockSize, KernelPath, KernelSpecialization, ObmcSad, resolve};
pub use error::UnsupportedShape;
pub use params::{ObmcFeatures, SampleDepth};
pub use util::Pixel;
