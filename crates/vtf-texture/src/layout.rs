//! Image data layout.
//!
//! After the header a VTF file stores the thumbnail, then the mipmap chain
//! from the 1x1 level upwards, then the full-resolution image. Nothing in
//! the file records where each image starts, so offsets are derived from
//! the dimensions and storage rate of everything before it.

use crate::format::ImageFormat;
use crate::header::Header;
use crate::{Error, Result};

/// Which image of the texture a descriptor refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Thumbnail,
    /// Mipmap by storage index; level 0 is the 1x1 level.
    Mipmap(usize),
    Full,
}

/// Location and shape of one image inside the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub kind: ImageKind,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    /// Byte offset from the start of the file.
    pub offset: usize,
    /// Byte length of the stored image.
    pub length: usize,
}

impl ImageDescriptor {
    /// Offset one past the last byte of the image.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Whether the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Borrow this image's bytes from the source buffer.
    pub fn bytes<'a>(&self, data: &'a [u8]) -> Result<&'a [u8]> {
        data.get(self.offset..self.end())
            .ok_or(Error::TruncatedBuffer {
                needed: self.end(),
                available: data.len(),
            })
    }
}

/// Number of bytes an image of the given format and size occupies.
///
/// Block formats round each dimension up to whole 4x4 blocks. Returns
/// `None` on arithmetic overflow.
pub fn image_size(format: ImageFormat, width: u32, height: u32) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }

    let info = format.info();
    let (width, height) = (width as usize, height as usize);

    match info.block_bytes {
        Some(block_bytes) => width
            .div_ceil(4)
            .checked_mul(height.div_ceil(4))?
            .checked_mul(block_bytes),
        None => width
            .checked_mul(height)?
            .checked_mul(info.bits_per_pixel as usize)
            .map(|bits| bits / 8),
    }
}

/// Dimensions of mipmap `level`, counting up from 1x1 and clamped to the
/// full size.
pub fn mipmap_dimensions(header: &Header, level: usize) -> (u32, u32) {
    let side = u32::try_from(level)
        .ok()
        .and_then(|shift| 1u32.checked_shl(shift))
        .unwrap_or(u32::MAX);
    (side.min(header.width.into()), side.min(header.height.into()))
}

/// Compute the descriptor of every image in the file, in storage order:
/// thumbnail, mipmaps (smallest first), full image.
pub fn layout(header: &Header, buffer_len: usize) -> Result<Vec<ImageDescriptor>> {
    let depth = u32::from(header.depth);
    let mut descriptors = Vec::with_capacity(header.mipmap_count as usize + 2);
    let mut offset = header.header_size as usize;

    let mut push = |kind: ImageKind, format: ImageFormat, width: u32, height: u32| -> Result<()> {
        let overflow = Error::TruncatedBuffer {
            needed: usize::MAX,
            available: buffer_len,
        };
        let length = image_size(format, width, height).ok_or(overflow.clone())?;
        descriptors.push(ImageDescriptor {
            kind,
            format,
            width,
            height,
            depth,
            offset,
            length,
        });
        offset = offset.checked_add(length).ok_or(overflow)?;
        Ok(())
    };

    push(
        ImageKind::Thumbnail,
        header.low_res_format,
        header.low_res_width.into(),
        header.low_res_height.into(),
    )?;

    for level in 0..header.mipmap_count as usize {
        let (width, height) = mipmap_dimensions(header, level);
        push(ImageKind::Mipmap(level), header.high_res_format, width, height)?;
    }

    push(
        ImageKind::Full,
        header.high_res_format,
        header.width.into(),
        header.height.into(),
    )?;

    if offset > buffer_len {
        return Err(Error::TruncatedBuffer {
            needed: offset,
            available: buffer_len,
        });
    }

    Ok(descriptors)
}
