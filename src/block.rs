use std::num::{NonZeroU8, NonZeroUsize};

use anyhow::{Result, bail};

use crate::params::SampleDepth;

/// Reference samples in their stored representation.
///
/// The variant is the depth flag: kernels pick their fetch-and-widen step from
/// it and never look at sample values to guess the depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Samples<'a> {
    Narrow(&'a [u8]),
    Wide(&'a [u16]),
}

impl<'a> Samples<'a> {
    #[must_use]
    pub const fn depth(&self) -> SampleDepth {
        match self {
            Self::Narrow(_) => SampleDepth::Narrow,
            Self::Wide(_) => SampleDepth::Wide,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Narrow(s) => s.len(),
            Self::Wide(s) => s.len(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn offset_by(self, offset: usize) -> Self {
        match self {
            Self::Narrow(s) => Self::Narrow(&s[offset..]),
            Self::Wide(s) => Self::Wide(&s[offset..]),
        }
    }
}

/// A read-only rectangular view into a reference plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleBlock<'a> {
    samples: Samples<'a>,
    stride: NonZeroUsize,
    width: usize,
    height: usize,
    bits_per_sample: NonZeroU8,
}

impl<'a> SampleBlock<'a> {
    /// Creates a view of `width` x `height` samples starting at `offset` in `plane`.
    ///
    /// Fails if the stride is narrower than the block, if the block does not
    /// fit in the plane, or if `bits_per_sample` does not fit the storage.
    /// Whether `width` x `height` is a supported shape is decided at dispatch.
    pub fn new(
        plane: Samples<'a>,
        offset: usize,
        stride: NonZeroUsize,
        width: usize,
        height: usize,
        bits_per_sample: NonZeroU8,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            bail!("Block dimensions must be non-zero, got {width}x{height}.");
        }
        if stride.get() < width {
            bail!(
                "Stride must be at least the block width, got stride {} for width {width}.",
                stride.get()
            );
        }
        let max_bits = plane.depth().max_bits_per_sample();
        if bits_per_sample.get() > max_bits {
            bail!(
                "{} bits per sample does not fit {:?} storage (max {max_bits}).",
                bits_per_sample.get(),
                plane.depth()
            );
        }
        let needed = offset + (height - 1) * stride.get() + width;
        if plane.len() < needed {
            bail!(
                "Plane too small for a {width}x{height} block at offset {offset}: need {needed} samples, have {}.",
                plane.len()
            );
        }

        Ok(Self {
            samples: plane.offset_by(offset),
            stride,
            width,
            height,
            bits_per_sample,
        })
    }

    /// Samples starting at the block's top-left corner.
    #[must_use]
    pub const fn samples(&self) -> Samples<'a> {
        self.samples
    }

    #[must_use]
    pub const fn stride(&self) -> NonZeroUsize {
        self.stride
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn bits_per_sample(&self) -> NonZeroU8 {
        self.bits_per_sample
    }

    #[must_use]
    pub const fn depth(&self) -> SampleDepth {
        self.samples.depth()
    }
}

/// Per-pixel OBMC weights for one block, in raster order.
///
/// Scoring a block requires exactly one entry per pixel.
///
/// `wsrc` is the pre-weighted target and `msk` the Q12 blend mask applied to
/// the reference. Sample and mask values must fit in 15 bits so the product
/// fits a signed 32-bit lane; debug builds assert this, release builds do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightTable<'a> {
    wsrc: &'a [i32],
    msk: &'a [i32],
}

impl<'a> WeightTable<'a> {
    pub fn new(wsrc: &'a [i32], msk: &'a [i32]) -> Result<Self> {
        if wsrc.len() != msk.len() {
            bail!(
                "Weighted source and mask must have the same length, got {} and {}.",
                wsrc.len(),
                msk.len()
            );
        }
        Ok(Self { wsrc, msk })
    }

    #[must_use]
    pub const fn wsrc(&self) -> &'a [i32] {
        self.wsrc
    }

    #[must_use]
    pub const fn msk(&self) -> &'a [i32] {
        self.msk
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.wsrc.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.wsrc.is_empty()
    }
}
