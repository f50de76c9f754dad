//! Pixel decoding to RGBA8888.
//!
//! Uncompressed formats go through a channel permutation, DXT1 through
//! block decompression. Everything else is rejected with
//! [`Error::UnsupportedFormat`].

mod dxt1;
mod permute;

use crate::format::{Decoder, ImageFormat};
use crate::layout::image_size;
use crate::{Error, Result};

/// One decoded image: 4 bytes per pixel, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    depth: u32,
    data: Vec<u8>,
    has_alpha: bool,
}

impl DecodedImage {
    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Volume depth as declared by the header.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// RGBA pixel data; `width * height * 4` bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Take ownership of the pixel data.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Whether the alpha channel carries information, i.e. the format
    /// stores alpha or a pixel decoded transparent.
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// RGBA value of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * 4;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.data[start..start + 4]);
        Some(rgba)
    }
}

/// Decode one image's raw bytes into RGBA8888.
///
/// `raw` must hold at least the stored size of the image; trailing bytes
/// are ignored.
pub fn decode(
    raw: &[u8],
    width: u32,
    height: u32,
    depth: u32,
    format: ImageFormat,
) -> Result<DecodedImage> {
    let info = format.info();
    if !info.is_supported() {
        return Err(Error::UnsupportedFormat(format));
    }

    if info.decoder == Decoder::Dxt1 && (width % 4 != 0 || height % 4 != 0) {
        return Err(Error::UnsupportedDimensions {
            format,
            width,
            height,
        });
    }

    let needed = image_size(format, width, height).ok_or(Error::TruncatedBuffer {
        needed: usize::MAX,
        available: raw.len(),
    })?;
    if raw.len() < needed {
        return Err(Error::TruncatedBuffer {
            needed,
            available: raw.len(),
        });
    }
    let raw = &raw[..needed];

    let (data, has_alpha) = match info.decoder {
        Decoder::Permute { channel_order } => {
            (permute::decode(raw, channel_order), channel_order.len() == 4)
        }
        Decoder::Dxt1 => dxt1::decode(raw, width as usize, height as usize)?,
        Decoder::Unsupported => return Err(Error::UnsupportedFormat(format)),
    };

    debug_assert_eq!(data.len(), width as usize * height as usize * 4);

    Ok(DecodedImage {
        width,
        height,
        depth,
        data,
        has_alpha,
    })
}
