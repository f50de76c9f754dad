//! Image format table.
//!
//! VTF stores its formats as a signed enum where `-1` means "none". The
//! header parser adds one to the stored value, so the codes used here start
//! at 0 for [`ImageFormat::None`].

use std::fmt;

/// How a format is turned into RGBA8888.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoder {
    /// Reorder the stored channels. `channel_order[i]` is the source byte
    /// that becomes destination channel `i` (R, G, B, then A if present).
    Permute { channel_order: &'static [usize] },
    /// DXT1 4x4 block decompression.
    Dxt1,
    /// No decoder.
    Unsupported,
}

/// Static metadata for one image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Canonical VTF name.
    pub name: &'static str,
    /// Storage rate in bits per pixel.
    pub bits_per_pixel: u32,
    /// Bytes per 4x4 block, for block-compressed formats.
    pub block_bytes: Option<usize>,
    /// Decode path.
    pub decoder: Decoder,
}

impl FormatInfo {
    const fn permute(name: &'static str, channel_order: &'static [usize]) -> Self {
        Self {
            name,
            bits_per_pixel: channel_order.len() as u32 * 8,
            block_bytes: None,
            decoder: Decoder::Permute { channel_order },
        }
    }

    const fn block(name: &'static str, block_bytes: usize, decoder: Decoder) -> Self {
        Self {
            name,
            bits_per_pixel: (block_bytes * 8 / 16) as u32,
            block_bytes: Some(block_bytes),
            decoder,
        }
    }

    const fn raw(name: &'static str, bits_per_pixel: u32) -> Self {
        Self {
            name,
            bits_per_pixel,
            block_bytes: None,
            decoder: Decoder::Unsupported,
        }
    }

    /// Bytes per pixel; fractional for block formats (DXT1 is 0.5).
    pub fn bytes_per_pixel(&self) -> f32 {
        self.bits_per_pixel as f32 / 8.0
    }

    /// Whether the format is stored as 4x4 compressed blocks.
    pub fn is_compressed(&self) -> bool {
        self.block_bytes.is_some()
    }

    /// Whether a decoder exists for the format.
    pub fn is_supported(&self) -> bool {
        self.decoder != Decoder::Unsupported
    }

    /// Channel order for the permutation path.
    pub fn channel_order(&self) -> Option<&'static [usize]> {
        match self.decoder {
            Decoder::Permute { channel_order } => Some(channel_order),
            _ => None,
        }
    }
}

/// Format metadata, indexed by format code.
pub static FORMATS: [FormatInfo; 28] = [
    FormatInfo::raw("NONE", 0),
    FormatInfo::permute("RGBA8888", &[0, 1, 2, 3]),
    FormatInfo::permute("ABGR8888", &[3, 2, 1, 0]),
    FormatInfo::permute("RGB888", &[0, 1, 2]),
    FormatInfo::permute("BGR888", &[2, 1, 0]),
    FormatInfo::raw("RGB565", 16),
    FormatInfo::raw("I8", 8),
    FormatInfo::raw("IA88", 16),
    FormatInfo::raw("P8", 8),
    FormatInfo::raw("A8", 8),
    FormatInfo::permute("RGB888_BLUESCREEN", &[0, 1, 2]),
    FormatInfo::permute("BGR888_BLUESCREEN", &[2, 1, 0]),
    FormatInfo::permute("ARGB8888", &[1, 2, 3, 0]),
    FormatInfo::permute("BGRA8888", &[2, 1, 0, 3]),
    FormatInfo::block("DXT1", 8, Decoder::Dxt1),
    FormatInfo::block("DXT3", 16, Decoder::Unsupported),
    FormatInfo::block("DXT5", 16, Decoder::Unsupported),
    FormatInfo::raw("BGRX8888", 32),
    FormatInfo::raw("BGR565", 16),
    FormatInfo::raw("BGRX5551", 16),
    FormatInfo::raw("BGRA4444", 16),
    FormatInfo::block("DXT1_ONEBITALPHA", 8, Decoder::Unsupported),
    FormatInfo::raw("BGRA5551", 16),
    FormatInfo::raw("UV88", 16),
    FormatInfo::raw("UVWQ8888", 32),
    FormatInfo::raw("RGBA16161616F", 64),
    FormatInfo::raw("RGBA16161616", 64),
    FormatInfo::raw("UVLX8888", 32),
];

/// VTF image format, by table code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ImageFormat {
    None = 0,
    Rgba8888 = 1,
    Abgr8888 = 2,
    Rgb888 = 3,
    Bgr888 = 4,
    Rgb565 = 5,
    I8 = 6,
    Ia88 = 7,
    P8 = 8,
    A8 = 9,
    Rgb888Bluescreen = 10,
    Bgr888Bluescreen = 11,
    Argb8888 = 12,
    Bgra8888 = 13,
    Dxt1 = 14,
    Dxt3 = 15,
    Dxt5 = 16,
    Bgrx8888 = 17,
    Bgr565 = 18,
    Bgrx5551 = 19,
    Bgra4444 = 20,
    Dxt1OneBitAlpha = 21,
    Bgra5551 = 22,
    Uv88 = 23,
    Uvwq8888 = 24,
    Rgba16161616F = 25,
    Rgba16161616 = 26,
    Uvlx8888 = 27,
}

impl ImageFormat {
    /// Every format, in code order.
    pub const ALL: [ImageFormat; 28] = [
        ImageFormat::None,
        ImageFormat::Rgba8888,
        ImageFormat::Abgr8888,
        ImageFormat::Rgb888,
        ImageFormat::Bgr888,
        ImageFormat::Rgb565,
        ImageFormat::I8,
        ImageFormat::Ia88,
        ImageFormat::P8,
        ImageFormat::A8,
        ImageFormat::Rgb888Bluescreen,
        ImageFormat::Bgr888Bluescreen,
        ImageFormat::Argb8888,
        ImageFormat::Bgra8888,
        ImageFormat::Dxt1,
        ImageFormat::Dxt3,
        ImageFormat::Dxt5,
        ImageFormat::Bgrx8888,
        ImageFormat::Bgr565,
        ImageFormat::Bgrx5551,
        ImageFormat::Bgra4444,
        ImageFormat::Dxt1OneBitAlpha,
        ImageFormat::Bgra5551,
        ImageFormat::Uv88,
        ImageFormat::Uvwq8888,
        ImageFormat::Rgba16161616F,
        ImageFormat::Rgba16161616,
        ImageFormat::Uvlx8888,
    ];

    /// Look up a format by table code. Unknown codes return `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index))
            .copied()
    }

    /// Table code of this format.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Static metadata for this format.
    pub fn info(self) -> &'static FormatInfo {
        &FORMATS[self as usize]
    }

    /// Canonical VTF name.
    pub fn name(self) -> &'static str {
        self.info().name
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
