//! DXT1 (BC1) block decompression.
//!
//! Each 4x4 pixel block is 8 bytes: two 5:6:5 endpoint colors followed by
//! sixteen 2-bit palette indices, pixel 0 in the lowest bits.

use vtf_common::{read_bits, BinaryReader};
use zerocopy::{FromBytes, Immutable, KnownLayout};

use crate::Result;

const BLOCK_BYTES: usize = 8;
const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// One stored DXT1 block.
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
struct Dxt1Block {
    color0: [u8; 2],
    color1: [u8; 2],
    indices: [u8; 4],
}

impl Dxt1Block {
    /// The four palette entries selected by the 2-bit indices.
    fn palette(&self) -> Result<[[u8; 4]; 4]> {
        let packed0 = u16::from_le_bytes(self.color0);
        let packed1 = u16::from_le_bytes(self.color1);
        let c0 = rgb565(packed0)?;
        let c1 = rgb565(packed1)?;

        let palette = if packed0 > packed1 {
            [
                c0,
                c1,
                blend(c0, c1, |a, b| (2 * a + b) / 3),
                blend(c0, c1, |a, b| (a + 2 * b) / 3),
            ]
        } else {
            [c0, c1, blend(c0, c1, |a, b| (a + b) / 2), TRANSPARENT]
        };

        Ok(palette)
    }

    /// Palette index of pixel `p` (row-major within the block).
    #[inline]
    fn index(&self, p: usize) -> usize {
        ((u32::from_le_bytes(self.indices) >> (2 * p)) & 0b11) as usize
    }
}

/// Expand a 5:6:5 color to opaque RGBA8888.
fn rgb565(color: u16) -> Result<[u8; 4]> {
    Ok([
        expand(read_bits(color, 0, 5)?, 5),
        expand(read_bits(color, 5, 6)?, 6),
        expand(read_bits(color, 11, 5)?, 5),
        u8::MAX,
    ])
}

/// Scale an n-bit field to 0..=255, rounding to nearest.
#[inline]
fn expand(field: u32, bits: u32) -> u8 {
    let max = (1u32 << bits) - 1;
    ((field * 255 + max / 2) / max) as u8
}

/// Per-channel combination of two opaque colors.
#[inline]
fn blend(c0: [u8; 4], c1: [u8; 4], f: impl Fn(u16, u16) -> u16) -> [u8; 4] {
    [
        f(c0[0].into(), c1[0].into()) as u8,
        f(c0[1].into(), c1[1].into()) as u8,
        f(c0[2].into(), c1[2].into()) as u8,
        u8::MAX,
    ]
}

/// Decode one row of blocks into a 4-pixel-tall output band.
///
/// Returns whether any pixel came out transparent.
fn decode_band(blocks: &[u8], band: &mut [u8], width: usize) -> Result<bool> {
    let mut reader = BinaryReader::new(blocks);
    let mut transparent = false;

    for block_col in 0..width / 4 {
        let block: Dxt1Block = reader.read_struct()?;
        let palette = block.palette()?;

        for y in 0..4 {
            for x in 0..4 {
                let color = palette[block.index(y * 4 + x)];
                let dst = (y * width + block_col * 4 + x) * 4;
                band[dst..dst + 4].copy_from_slice(&color);
                transparent |= color[3] == 0;
            }
        }
    }

    Ok(transparent)
}

#[cfg_attr(all(feature = "parallel", not(test)), allow(dead_code))]
fn decode_bands_sequential(raw: &[u8], data: &mut [u8], width: usize) -> Result<bool> {
    let row_bytes = width / 4 * BLOCK_BYTES;
    let band_bytes = width * 4 * 4;

    let mut transparent = false;
    for (band, blocks) in data.chunks_mut(band_bytes).zip(raw.chunks(row_bytes)) {
        transparent |= decode_band(blocks, band, width)?;
    }
    Ok(transparent)
}

#[cfg(feature = "parallel")]
fn decode_bands(raw: &[u8], data: &mut [u8], width: usize) -> Result<bool> {
    use rayon::prelude::*;

    let row_bytes = width / 4 * BLOCK_BYTES;
    let band_bytes = width * 4 * 4;

    data.par_chunks_mut(band_bytes)
        .zip(raw.par_chunks(row_bytes))
        .map(|(band, blocks)| decode_band(blocks, band, width))
        .try_reduce(|| false, |a, b| Ok(a || b))
}

#[cfg(not(feature = "parallel"))]
fn decode_bands(raw: &[u8], data: &mut [u8], width: usize) -> Result<bool> {
    decode_bands_sequential(raw, data, width)
}

/// Decode a DXT1 image whose dimensions are multiples of 4.
pub(crate) fn decode(raw: &[u8], width: usize, height: usize) -> Result<(Vec<u8>, bool)> {
    let mut data = vec![0u8; width * height * 4];
    if data.is_empty() {
        return Ok((data, false));
    }

    let has_alpha = decode_bands(raw, &mut data, width)?;
    Ok((data, has_alpha))
}
