//! VTF header parsing.

use std::fmt;

use bitflags::bitflags;
use vtf_common::BinaryReader;

use crate::format::ImageFormat;
use crate::{Error, Result, VTF_SIGNATURE};

/// Smallest header size any VTF version declares.
pub const MIN_HEADER_SIZE: u32 = 80;

bitflags! {
    /// Texture flags stored in the header.
    ///
    /// These do not affect decoding. Bits without a name are kept as-is.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureFlags: u32 {
        const POINTSAMPLE = 0x0000_0001;
        const TRILINEAR = 0x0000_0002;
        const CLAMPS = 0x0000_0004;
        const CLAMPT = 0x0000_0008;
        const ANISOTROPIC = 0x0000_0010;
        const HINT_DXT5 = 0x0000_0020;
        const NORMAL = 0x0000_0080;
        const NOMIP = 0x0000_0100;
        const NOLOD = 0x0000_0200;
        const ALL_MIPS = 0x0000_0400;
        const PROCEDURAL = 0x0000_0800;
        /// One bit alpha channel (DXT1 alpha key or bluescreen).
        const ONEBITALPHA = 0x0000_1000;
        const EIGHTBITALPHA = 0x0000_2000;
        const ENVMAP = 0x0000_4000;
        const RENDERTARGET = 0x0000_8000;
        const DEPTHRENDERTARGET = 0x0001_0000;
        const NODEBUGOVERRIDE = 0x0002_0000;
        const SINGLECOPY = 0x0004_0000;
    }
}

/// File format version, e.g. 7.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Parsed VTF header.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// File signature (`VTF\0`).
    pub signature: [u8; 4],
    pub version: Version,
    /// Size of the header in bytes; image data starts here.
    pub header_size: u32,
    /// Width of the full-resolution image.
    pub width: u16,
    /// Height of the full-resolution image.
    pub height: u16,
    pub flags: TextureFlags,
    /// Number of animation frames.
    pub frame_count: u32,
    /// First animation frame (0 based).
    pub first_frame: u16,
    pub reflectivity: [f32; 3],
    pub bumpmap_scale: f32,
    pub high_res_format: ImageFormat,
    pub mipmap_count: u8,
    /// Thumbnail format, conventionally DXT1.
    pub low_res_format: ImageFormat,
    pub low_res_width: u8,
    pub low_res_height: u8,
    /// Volume depth, usually 1.
    pub depth: u16,
}

impl Header {
    /// Parse the fixed-layout header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let reader = BinaryReader::new(data);

        let mut signature = [0u8; 4];
        signature.copy_from_slice(reader.bytes_at(0, 4)?);
        if &signature != VTF_SIGNATURE {
            return Err(Error::MalformedHeader(format!(
                "invalid signature {:?}",
                reader.read_chars_at(0, 4)?
            )));
        }

        let version = Version {
            major: reader.read_u32_at(4)?,
            minor: reader.read_u32_at(8)?,
        };

        let header_size = reader.read_u32_at(12)?;
        if header_size < MIN_HEADER_SIZE {
            return Err(Error::MalformedHeader(format!(
                "header size {} is smaller than {}",
                header_size, MIN_HEADER_SIZE
            )));
        }

        let width = reader.read_u16_at(16)?;
        let height = reader.read_u16_at(18)?;
        let flags = TextureFlags::from_bits_retain(reader.read_u32_at(20)?);
        let frame_count = reader.read_u32_at(24)?;
        let first_frame = reader.read_u16_at(28)?;

        let reflectivity = reader.read_f32s_at(32, 3)?;
        let reflectivity = [reflectivity[0], reflectivity[1], reflectivity[2]];
        let bumpmap_scale = reader.read_f32_at(48)?;

        let high_res_format = format_from_raw(reader.read_i32_at(52)?, "high-res")?;
        let mipmap_count = reader.read_u8_at(56)?;
        let low_res_format = format_from_raw(reader.read_i32_at(57)?, "low-res")?;
        let low_res_width = reader.read_u8_at(61)?;
        let low_res_height = reader.read_u8_at(62)?;
        let depth = reader.read_u16_at(63)?;

        check_dimension("width", width.into())?;
        check_dimension("height", height.into())?;
        check_dimension("low-res width", low_res_width.into())?;
        check_dimension("low-res height", low_res_height.into())?;

        Ok(Self {
            signature,
            version,
            header_size,
            width,
            height,
            flags,
            frame_count,
            first_frame,
            reflectivity,
            bumpmap_scale,
            high_res_format,
            mipmap_count,
            low_res_format,
            low_res_width,
            low_res_height,
            depth,
        })
    }

    /// Whether the header declares a thumbnail.
    pub fn has_thumbnail(&self) -> bool {
        self.low_res_format != ImageFormat::None
            && self.low_res_width > 0
            && self.low_res_height > 0
    }
}

/// Map a stored format value to the table. Stored `-1` is `NONE`.
fn format_from_raw(raw: i32, which: &str) -> Result<ImageFormat> {
    raw.checked_add(1)
        .and_then(ImageFormat::from_code)
        .ok_or_else(|| Error::MalformedHeader(format!("unknown {} format value {}", which, raw)))
}

fn check_dimension(name: &str, value: u32) -> Result<()> {
    if value == 0 || value.is_power_of_two() {
        Ok(())
    } else {
        Err(Error::MalformedHeader(format!(
            "{} {} is not a power of two",
            name, value
        )))
    }
}
