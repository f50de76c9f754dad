//! Binary reader for bounds-checked parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type that reads
//! little-endian values from a byte slice without copying. Every read is
//! checked against the buffer length up front and reports
//! [`Error::OutOfBounds`] instead of panicking.
//!
//! Two styles are supported: explicit-offset reads (`*_at`), which leave
//! the position untouched, and advancing reads that consume from the
//! current position.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// A binary reader over a byte slice.
///
/// # Example
///
/// ```
/// use vtf_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u32_at(4).unwrap(), 0x08070605);
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
/// assert_eq!(reader.position(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the underlying buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Seek to an absolute position.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Borrow `count` bytes starting at `offset`.
    #[inline]
    pub fn bytes_at(&self, offset: usize, count: usize) -> Result<&'a [u8]> {
        let out_of_bounds = || Error::OutOfBounds {
            offset,
            needed: count,
            available: self.data.len(),
        };

        let end = offset.checked_add(count).ok_or_else(out_of_bounds)?;
        self.data.get(offset..end).ok_or_else(out_of_bounds)
    }

    #[inline]
    fn array_at<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let bytes = self.bytes_at(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Borrow `count * size` bytes starting at `offset`, for sequence reads.
    #[inline]
    fn elements_at(&self, offset: usize, count: usize, size: usize) -> Result<&'a [u8]> {
        let total = count.checked_mul(size).ok_or(Error::OutOfBounds {
            offset,
            needed: usize::MAX,
            available: self.data.len(),
        })?;
        self.bytes_at(offset, total)
    }

    /// Read `count` bytes at `offset` as a string, one char per byte.
    pub fn read_chars_at(&self, offset: usize, count: usize) -> Result<String> {
        let bytes = self.bytes_at(offset, count)?;
        Ok(bytes.iter().map(|&b| b as char).collect())
    }

    /// Read an unsigned byte at `offset`.
    #[inline]
    pub fn read_u8_at(&self, offset: usize) -> Result<u8> {
        self.array_at::<1>(offset).map(|b| b[0])
    }

    /// Read a signed byte at `offset`.
    #[inline]
    pub fn read_i8_at(&self, offset: usize) -> Result<i8> {
        self.array_at::<1>(offset).map(i8::from_le_bytes)
    }

    /// Read a little-endian u16 at `offset`.
    #[inline]
    pub fn read_u16_at(&self, offset: usize) -> Result<u16> {
        self.array_at(offset).map(u16::from_le_bytes)
    }

    /// Read a little-endian i16 at `offset`.
    #[inline]
    pub fn read_i16_at(&self, offset: usize) -> Result<i16> {
        self.array_at(offset).map(i16::from_le_bytes)
    }

    /// Read a little-endian u32 at `offset`.
    #[inline]
    pub fn read_u32_at(&self, offset: usize) -> Result<u32> {
        self.array_at(offset).map(u32::from_le_bytes)
    }

    /// Read a little-endian i32 at `offset`.
    #[inline]
    pub fn read_i32_at(&self, offset: usize) -> Result<i32> {
        self.array_at(offset).map(i32::from_le_bytes)
    }

    /// Read a little-endian f32 at `offset`.
    #[inline]
    pub fn read_f32_at(&self, offset: usize) -> Result<f32> {
        self.array_at(offset).map(f32::from_le_bytes)
    }

    /// Read `count` consecutive little-endian i32 values at `offset`.
    pub fn read_i32s_at(&self, offset: usize, count: usize) -> Result<Vec<i32>> {
        let bytes = self.elements_at(offset, count, 4)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    /// Read `count` consecutive little-endian f32 values at `offset`.
    pub fn read_f32s_at(&self, offset: usize, count: usize) -> Result<Vec<f32>> {
        let bytes = self.elements_at(offset, count, 4)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.bytes_at(self.position, count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        let value = self.read_u16_at(self.position)?;
        self.position += 2;
        Ok(value)
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let value = self.read_u32_at(self.position)?;
        self.position += 4;
        Ok(value)
    }

    /// Read a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        let value = self.read_i32_at(self.position)?;
        self.position += 4;
        Ok(value)
    }

    /// Read a little-endian f32.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        let value = self.read_f32_at(self.position)?;
        self.position += 4;
        Ok(value)
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::OutOfBounds {
            offset: self.position - size,
            needed: size,
            available: self.data.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [
            0x01u8, 0x02, 0x03, 0x04, // u32: 0x04030201
            0xFF, 0xFF, 0xFF, 0xFF, // i32: -1
        ];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u32().unwrap(), 0x04030201);
        assert_eq!(reader.read_i32().unwrap(), -1);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_offset_reads_do_not_advance() {
        let data = [0x34, 0x12, 0xFE, 0xFF];
        let reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u16_at(0).unwrap(), 0x1234);
        assert_eq!(reader.read_i16_at(2).unwrap(), -2);
        assert_eq!(reader.read_i8_at(3).unwrap(), -1);
        assert_eq!(reader.read_u8_at(3).unwrap(), 0xFF);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_chars() {
        let data = b"VTF\0rest";
        let reader = BinaryReader::new(data);

        assert_eq!(reader.read_chars_at(0, 4).unwrap(), "VTF\0");
        assert_eq!(reader.read_chars_at(4, 4).unwrap(), "rest");
    }

    #[test]
    fn test_sequence_reads() {
        let mut data = Vec::new();
        for v in [0.25f32, 0.5, 1.0] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        let reader = BinaryReader::new(&data);

        assert_eq!(reader.read_f32s_at(0, 3).unwrap(), vec![0.25, 0.5, 1.0]);
        assert_eq!(reader.read_f32_at(8).unwrap(), 1.0);
        assert_eq!(reader.read_i32s_at(0, 0).unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn test_out_of_bounds() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(
            reader.read_u32_at(0),
            Err(Error::OutOfBounds {
                offset: 0,
                needed: 4,
                available: 2,
            })
        );
        assert!(reader.read_u16_at(1).is_err());
        assert!(reader.read_f32s_at(0, 2).is_err());
        assert!(reader.read_i32s_at(0, usize::MAX).is_err());
        assert!(reader.bytes_at(usize::MAX, 2).is_err());

        assert!(reader.read_u32().is_err());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_struct() {
        let data = [0x01, 0x00, 0x02, 0x00, 0xAA];
        let mut reader = BinaryReader::new(&data);

        let pair: [u8; 4] = reader.read_struct().unwrap();
        assert_eq!(pair, [0x01, 0x00, 0x02, 0x00]);
        assert_eq!(reader.read_u8().unwrap(), 0xAA);
        assert!(reader.read_struct::<[u8; 2]>().is_err());
    }
}
