//! Bit-field extraction.
//!
//! Bits are numbered from the most significant bit of the group, which is
//! the order packed colors such as 5:6:5 are laid out in: bit 0 of a `u16`
//! color is the top bit of its red field.

use crate::{Error, Result};

/// An unsigned integer that can be used as a bit group.
pub trait BitGroup: Copy {
    /// Width of the group in bits.
    const BITS: u32;

    /// Widen the group to `u32`.
    fn widen(self) -> u32;
}

impl BitGroup for u8 {
    const BITS: u32 = 8;

    #[inline]
    fn widen(self) -> u32 {
        self as u32
    }
}

impl BitGroup for u16 {
    const BITS: u32 = 16;

    #[inline]
    fn widen(self) -> u32 {
        self as u32
    }
}

impl BitGroup for u32 {
    const BITS: u32 = 32;

    #[inline]
    fn widen(self) -> u32 {
        self
    }
}

/// Extract `bit_count` bits starting `bit_offset` bits below the top of `group`.
///
/// The trailing bits are shifted out and the result is masked to
/// `bit_count` bits.
///
/// # Example
///
/// ```
/// use vtf_common::read_bits;
///
/// assert_eq!(read_bits(0b1011_0000u8, 0, 5).unwrap(), 0b10110);
///
/// // Green field of a 5:6:5 color.
/// assert_eq!(read_bits(0x07E0u16, 5, 6).unwrap(), 63);
/// ```
#[inline]
pub fn read_bits<T: BitGroup>(group: T, bit_offset: u32, bit_count: u32) -> Result<u32> {
    let end = bit_offset
        .checked_add(bit_count)
        .filter(|&end| end <= T::BITS)
        .ok_or(Error::InvalidBitRange {
            bit_offset,
            bit_count,
            group_bits: T::BITS,
        })?;

    if bit_count == 0 {
        return Ok(0);
    }

    let mask = ((1u64 << bit_count) - 1) as u32;
    Ok((group.widen() >> (T::BITS - end)) & mask)
}
