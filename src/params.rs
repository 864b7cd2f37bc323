use std::num::NonZeroU8;

use anyhow::{Result, bail};
use bitflags::bitflags;

use crate::util::Pixel;

bitflags! {
    /// Optional capabilities of the OBMC dispatcher.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ObmcFeatures: u8 {
        /// Enables the 128-sample block sizes (128x128, 128x64, 64x128).
        const EXT_PARTITION = 0x01;
    }
}

impl TryFrom<i64> for ObmcFeatures {
    type Error = anyhow::Error;

    fn try_from(val: i64) -> Result<Self> {
        let Ok(bits) = u8::try_from(val) else {
            bail!("Invalid value for 'features', must fit in 8 bits, got {val}.");
        };
        match Self::from_bits(bits) {
            Some(features) => Ok(features),
            None => bail!("Invalid value for 'features', unknown flag bits in {val:#x}."),
        }
    }
}

/// How reference samples are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDepth {
    /// One byte per sample, up to 8 bits.
    Narrow = 0,
    /// Two bytes per sample, up to 16 bits.
    Wide = 1,
}

impl TryFrom<i64> for SampleDepth {
    type Error = anyhow::Error;

    fn try_from(val: i64) -> Result<Self> {
        Ok(match val {
            0 => Self::Narrow,
            1 => Self::Wide,
            _ => bail!("Invalid value for 'depth', must be 0 or 1, got {val}."),
        })
    }
}

impl SampleDepth {
    /// Picks the smallest storage that can hold `bits_per_sample`.
    pub fn for_bits_per_sample(bits_per_sample: NonZeroU8) -> Result<Self> {
        Ok(match bits_per_sample.get() {
            1..=8 => Self::Narrow,
            9..=16 => Self::Wide,
            bits => bail!("Invalid bits per sample, must be 1-16, got {bits}."),
        })
    }

    /// Largest bit depth the storage can carry.
    #[must_use]
    pub const fn max_bits_per_sample(self) -> u8 {
        match self {
            Self::Narrow => u8::STORAGE_BITS,
            Self::Wide => u16::STORAGE_BITS,
        }
    }
}
