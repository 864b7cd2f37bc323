use std::num::{NonZeroU8, NonZeroUsize};

use anyhow::Result;
use obmc_sad::{
    BlockSize, KernelPath, ObmcFeatures, ObmcSad, SampleBlock, SampleDepth, Samples,
    UnsupportedShape, WeightTable,
};

fn stride(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn bits(n: u8) -> NonZeroU8 {
    NonZeroU8::new(n).unwrap()
}

#[test]
fn half_weight_8x4_block() -> Result<()> {
    let reference = vec![200u8; 8 * 4];
    let msk = vec![2048i32; 8 * 4];
    let mut wsrc = vec![409_600i32; 8 * 4];

    let block = SampleBlock::new(Samples::Narrow(&reference), 0, stride(8), 8, 4, bits(8))?;
    let obmc = ObmcSad::new(ObmcFeatures::empty());

    assert_eq!(obmc.distortion(&block, &WeightTable::new(&wsrc, &msk)?)?, 0);

    wsrc[13] += 6144;
    assert_eq!(obmc.distortion(&block, &WeightTable::new(&wsrc, &msk)?)?, 2);
    Ok(())
}

#[test]
fn full_weight_4x4_off_by_one_sample() -> Result<()> {
    let reference = vec![100u8; 16];
    let msk = vec![4096i32; 16];
    let wsrc = vec![100 * 4096 + 4096; 16];

    let block = SampleBlock::new(Samples::Narrow(&reference), 0, stride(4), 4, 4, bits(8))?;
    let kernel = ObmcSad::new(ObmcFeatures::empty()).resolve(4, 4)?;
    assert_eq!(kernel.path(), KernelPath::Narrow);
    assert_eq!(kernel.distortion(&block, &WeightTable::new(&wsrc, &msk)?), 16);
    Ok(())
}

#[test]
fn rounding_is_half_up() -> Result<()> {
    let reference = vec![0u16; 16];
    let msk = vec![4096i32; 16];
    let block = SampleBlock::new(Samples::Wide(&reference), 0, stride(4), 4, 4, bits(10))?;
    let obmc = ObmcSad::new(ObmcFeatures::empty());

    let below = vec![2047i32; 16];
    let tie = vec![2048i32; 16];
    assert_eq!(obmc.distortion(&block, &WeightTable::new(&below, &msk)?)?, 0);
    assert_eq!(obmc.distortion(&block, &WeightTable::new(&tie, &msk)?)?, 16);
    Ok(())
}

#[test]
fn wide_samples_score_like_narrow_samples() -> Result<()> {
    let narrow: Vec<u8> = (0..32 * 16).map(|i| (i * 13 % 256) as u8).collect();
    let wide: Vec<u16> = narrow.iter().map(|&v| u16::from(v)).collect();
    let msk: Vec<i32> = (0..32 * 16).map(|i| (i * 97 % 4097) as i32).collect();
    let wsrc: Vec<i32> = (0..32 * 16).map(|i| i * 1733 % 1_000_000).collect();
    let weights = WeightTable::new(&wsrc, &msk)?;
    let obmc = ObmcSad::new(ObmcFeatures::empty());

    let narrow_block = SampleBlock::new(Samples::Narrow(&narrow), 0, stride(32), 32, 16, bits(8))?;
    let wide_block = SampleBlock::new(Samples::Wide(&wide), 0, stride(32), 32, 16, bits(12))?;
    assert_eq!(narrow_block.depth(), SampleDepth::Narrow);
    assert_eq!(wide_block.depth(), SampleDepth::Wide);
    assert_eq!(
        obmc.distortion(&narrow_block, &weights)?,
        obmc.distortion(&wide_block, &weights)?
    );
    Ok(())
}

#[test]
fn unsupported_shape_is_reported() -> Result<()> {
    let reference = vec![0u8; 16 * 4];
    let wsrc = vec![0i32; 16 * 4];
    let msk = vec![0i32; 16 * 4];
    let block = SampleBlock::new(Samples::Narrow(&reference), 0, stride(16), 16, 4, bits(8))?;
    let obmc = ObmcSad::new(ObmcFeatures::EXT_PARTITION);

    let err = obmc
        .distortion(&block, &WeightTable::new(&wsrc, &msk)?)
        .unwrap_err();
    assert_eq!(
        err,
        UnsupportedShape {
            width: 16,
            height: 4
        }
    );

    let err: anyhow::Error = obmc.resolve(3, 3).unwrap_err().into();
    assert!(err.to_string().contains("3x3"));
    Ok(())
}

#[test]
fn extended_sizes_follow_feature_flag() -> Result<()> {
    let features = ObmcFeatures::try_from(1i64)?;
    assert_eq!(features, ObmcFeatures::EXT_PARTITION);

    let ext = ObmcSad::new(features);
    let base = ObmcSad::new(ObmcFeatures::try_from(0i64)?);
    assert!(ext.block_sizes().any(|b| b == BlockSize::Block128x64));
    assert!(!base.block_sizes().any(|b| b == BlockSize::Block128x64));
    assert!(ObmcFeatures::try_from(2i64).is_err());
    Ok(())
}

#[test]
fn malformed_inputs_are_rejected_at_construction() {
    let reference = vec![0u8; 64];
    assert!(SampleBlock::new(Samples::Narrow(&reference), 0, stride(4), 8, 4, bits(8)).is_err());
    assert!(SampleBlock::new(Samples::Narrow(&reference), 40, stride(8), 8, 4, bits(8)).is_err());
    assert!(SampleBlock::new(Samples::Narrow(&reference), 0, stride(8), 8, 4, bits(10)).is_err());
    assert!(WeightTable::new(&[0; 16], &[0; 15]).is_err());
}
