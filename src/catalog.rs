
use std::num::NonZeroUsize;

use log::debug;

use crate::{
    block::{SampleBlock, Samples, WeightTable},
    error::UnsupportedShape,
    obmc_sad::get_obmc_sad,
    params::ObmcFeatures,
    util::kernel_impl_name,
};

/// Block shapes with an OBMC SAD kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockSize {
    Block4x4,
    Block4x8,
    Block8x4,
    Block8x8,
    Block8x16,
    Block16x8,
    Block16x16,
    Block16x32,
    Block32x16,
    Block32x32,
    Block32x64,
    Block64x32,
    Block64x64,
    Block64x128,
    Block128x64,
    Block128x128,
}

impl BlockSize {
    pub const COUNT: usize = 16;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Block4x4,
        Self::Block4x8,
        Self::Block8x4,
        Self::Block8x8,
        Self::Block8x16,
        Self::Block16x8,
        Self::Block16x16,
        Self::Block16x32,
        Self::Block32x16,
        Self::Block32x32,
        Self::Block32x64,
        Self::Block64x32,
        Self::Block64x64,
        Self::Block64x128,
        Self::Block128x64,
        Self::Block128x128,
    ];

    #[must_use]
    pub const fn from_dimensions(width: usize, height: usize) -> Option<Self> {
        Some(match (width, height) {
            (4, 4) => Self::Block4x4,
            (4, 8) => Self::Block4x8,
            (8, 4) => Self::Block8x4,
            (8, 8) => Self::Block8x8,
            (8, 16) => Self::Block8x16,
            (16, 8) => Self::Block16x8,
            (16, 16) => Self::Block16x16,
            (16, 32) => Self::Block16x32,
            (32, 16) => Self::Block32x16,
            (32, 32) => Self::Block32x32,
            (32, 64) => Self::Block32x64,
            (64, 32) => Self::Block64x32,
            (64, 64) => Self::Block64x64,
            (64, 128) => Self::Block64x128,
            (128, 64) => Self::Block128x64,
            (128, 128) => Self::Block128x128,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Block4x4 | Self::Block4x8 => 4,
            Self::Block8x4 | Self::Block8x8 | Self::Block8x16 => 8,
            Self::Block16x8 | Self::Block16x16 | Self::Block16x32 => 16,
            Self::Block32x16 | Self::Block32x32 | Self::Block32x64 => 32,
            Self::Block64x32 | Self::Block64x64 | Self::Block64x128 => 64,
            Self::Block128x64 | Self::Block128x128 => 128,
        }
    }

    #[must_use]
    pub const fn height(self) -> usize {
        match self {
            Self::Block4x4 | Self::Block8x4 => 4,
            Self::Block4x8 | Self::Block8x8 | Self::Block16x8 => 8,
            Self::Block8x16 | Self::Block16x16 | Self::Block32x16 => 16,
            Self::Block16x32 | Self::Block32x32 | Self::Block64x32 => 32,
            Self::Block32x64 | Self::Block64x64 | Self::Block128x64 => 64,
            Self::Block64x128 | Self::Block128x128 => 128,
        }
    }

    /// Whether the shape only exists with [`ObmcFeatures::EXT_PARTITION`].
    #[must_use]
    pub const fn requires_ext_partition(self) -> bool {
        matches!(
            self,
            Self::Block64x128 | Self::Block128x64 | Self::Block128x128
        )
    }

    #[must_use]
    pub const fn kernel_path(self) -> KernelPath {
        if self.width() == 4 {
            KernelPath::Narrow
        } else {
            KernelPath::Batched
        }
    }
}

/// Which inner loop a block size runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelPath {
    /// Width 4: one row of four pixels per step.
    Narrow,
    /// Width 8 or more (power of two): runs of eight pixels per step.
    Batched,
}

/// A resolved kernel for one block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelSpecialization {
    block_size: BlockSize,
    width: NonZeroUsize,
    height: NonZeroUsize,
}

impl KernelSpecialization {
    const fn new(block_size: BlockSize) -> Self {
        // SAFETY: no block size in the catalog has a zero dimension
        unsafe {
            Self {
                block_size,
                width: NonZeroUsize::new_unchecked(block_size.width()),
                height: NonZeroUsize::new_unchecked(block_size.height()),
            }
        }
    }

    #[must_use]
    pub const fn block_size(&self) -> BlockSize {
        self.block_size
    }

    #[must_use]
    pub const fn path(&self) -> KernelPath {
        self.block_size.kernel_path()
    }

    /// Scores `block` against `weights`.
    ///
    /// # Panics
    /// Panics if `block` is not the size this kernel was resolved for, or if
    /// `weights` does not hold exactly one entry per pixel.
    #[must_use]
    pub fn distortion(&self, block: &SampleBlock<'_>, weights: &WeightTable<'_>) -> u32 {
        let (w, h) = (self.width.get(), self.height.get());
        assert_eq!(
            (block.width(), block.height()),
            (w, h),
            "block does not match the resolved {w}x{h} kernel"
        );
        assert_eq!(
            weights.len(),
            w * h,
            "weight table does not cover the {w}x{h} block"
        );

        match block.samples() {
            Samples::Narrow(ref_) => get_obmc_sad(
                self.width,
                self.height,
                ref_,
                block.stride(),
                weights.wsrc(),
                weights.msk(),
            ),
            Samples::Wide(ref_) => get_obmc_sad(
                self.width,
                self.height,
                ref_,
                block.stride(),
                weights.wsrc(),
                weights.msk(),
            ),
        }
    }
}

/// Looks up the kernel for a `width` x `height` block.
///
/// The 128-sample shapes are only available when `features` contains
/// [`ObmcFeatures::EXT_PARTITION`].
pub fn resolve(
    width: usize,
    height: usize,
    features: ObmcFeatures,
) -> Result<KernelSpecialization, UnsupportedShape> {
    match BlockSize::from_dimensions(width, height) {
        Some(block_size)
            if !block_size.requires_ext_partition()
                || features.contains(ObmcFeatures::EXT_PARTITION) =>
        {
            Ok(KernelSpecialization::new(block_size))
        }
        _ => Err(UnsupportedShape { width, height }),
    }
}

/// OBMC SAD dispatcher for a fixed set of features.
///
/// The kernel table is built once here and never changes, so a single
/// instance can be shared freely between threads scoring different candidates.
#[derive(Debug, Clone, Copy)]
pub struct ObmcSad {
    features: ObmcFeatures,
    kernels: [Option<KernelSpecialization>; BlockSize::COUNT],
}

impl ObmcSad {
    #[must_use]
    pub fn new(features: ObmcFeatures) -> Self {
        let kernels =
            BlockSize::ALL.map(|bsize| resolve(bsize.width(), bsize.height(), features).ok());
        debug!(
            "OBMC SAD: {} block sizes enabled with features {:?}, using {} kernels",
            kernels.iter().flatten().count(),
            features,
            kernel_impl_name()
        );

        Self { features, kernels }
    }

    #[must_use]
    pub const fn features(&self) -> ObmcFeatures {
        self.features
    }

    /// Block sizes this dispatcher accepts.
    pub fn block_sizes(&self) -> impl Iterator<Item = BlockSize> + '_ {
        self.kernels.iter().flatten().map(KernelSpecialization::block_size)
    }

    pub fn resolve(
        &self,
        width: usize,
        height: usize,
    ) -> Result<KernelSpecialization, UnsupportedShape> {
        BlockSize::from_dimensions(width, height)
            .and_then(|bsize| self.kernels[bsize as usize])
            .ok_or(UnsupportedShape { width, height })
    }

    /// Resolves the block's shape and scores it against `weights`.
    ///
    /// # Panics
    /// Panics if `weights` does not hold exactly one entry per pixel.
    pub fn distortion(
        &self,
        block: &SampleBlock<'_>,
        weights: &WeightTable<'_>,
    ) -> Result<u32, UnsupportedShape> {
        let kernel = self.resolve(block.width(), block.height())?;
        Ok(kernel.distortion(block, weights))
    }
}
