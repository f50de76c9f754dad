//! Synthetic VTF files for tests.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::format::ImageFormat;
use crate::layout::image_size;

/// Builds VTF buffers field by field.
#[derive(Debug, Clone)]
pub struct VtfBuilder {
    version: (u32, u32),
    header_size: u32,
    width: u16,
    height: u16,
    flags: u32,
    frame_count: u32,
    first_frame: u16,
    reflectivity: [f32; 3],
    bumpmap_scale: f32,
    high_res_format: ImageFormat,
    mipmap_count: u8,
    low_res_format: ImageFormat,
    low_res_width: u8,
    low_res_height: u8,
    depth: u16,
}

impl VtfBuilder {
    /// A 7.2 file with no thumbnail and no mipmaps.
    pub fn new(width: u16, height: u16, format: ImageFormat) -> Self {
        Self {
            version: (7, 2),
            header_size: 80,
            width,
            height,
            flags: 0,
            frame_count: 1,
            first_frame: 0,
            reflectivity: [0.0; 3],
            bumpmap_scale: 1.0,
            high_res_format: format,
            mipmap_count: 0,
            low_res_format: ImageFormat::None,
            low_res_width: 0,
            low_res_height: 0,
            depth: 1,
        }
    }

    pub fn version(mut self, major: u32, minor: u32) -> Self {
        self.version = (major, minor);
        self
    }

    pub fn header_size(mut self, header_size: u32) -> Self {
        self.header_size = header_size;
        self
    }

    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    pub fn frames(mut self, frame_count: u32, first_frame: u16) -> Self {
        self.frame_count = frame_count;
        self.first_frame = first_frame;
        self
    }

    pub fn reflectivity(mut self, reflectivity: [f32; 3]) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    pub fn bumpmap_scale(mut self, bumpmap_scale: f32) -> Self {
        self.bumpmap_scale = bumpmap_scale;
        self
    }

    pub fn mipmap_count(mut self, mipmap_count: u8) -> Self {
        self.mipmap_count = mipmap_count;
        self
    }

    pub fn thumbnail(mut self, format: ImageFormat, width: u8, height: u8) -> Self {
        self.low_res_format = format;
        self.low_res_width = width;
        self.low_res_height = height;
        self
    }

    pub fn depth(mut self, depth: u16) -> Self {
        self.depth = depth;
        self
    }

    /// Header bytes, zero-padded to the declared header size.
    pub fn header_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.write_all(b"VTF\0").unwrap();
        buf.write_u32::<LittleEndian>(self.version.0).unwrap();
        buf.write_u32::<LittleEndian>(self.version.1).unwrap();
        buf.write_u32::<LittleEndian>(self.header_size).unwrap();
        buf.write_u16::<LittleEndian>(self.width).unwrap();
        buf.write_u16::<LittleEndian>(self.height).unwrap();
        buf.write_u32::<LittleEndian>(self.flags).unwrap();
        buf.write_u32::<LittleEndian>(self.frame_count).unwrap();
        buf.write_u16::<LittleEndian>(self.first_frame).unwrap();
        buf.write_u16::<LittleEndian>(0).unwrap();
        for value in self.reflectivity {
            buf.write_f32::<LittleEndian>(value).unwrap();
        }
        buf.write_u32::<LittleEndian>(0).unwrap();
        buf.write_f32::<LittleEndian>(self.bumpmap_scale).unwrap();
        buf.write_i32::<LittleEndian>(self.high_res_format.code() - 1).unwrap();
        buf.write_u8(self.mipmap_count).unwrap();
        buf.write_i32::<LittleEndian>(self.low_res_format.code() - 1).unwrap();
        buf.write_u8(self.low_res_width).unwrap();
        buf.write_u8(self.low_res_height).unwrap();
        buf.write_u16::<LittleEndian>(self.depth).unwrap();
        assert_eq!(buf.len(), 65);

        buf.resize(buf.len().max(self.header_size as usize), 0);
        buf
    }

    /// Number of image bytes the header implies.
    pub fn payload_len(&self) -> usize {
        let mut len = image_size(
            self.low_res_format,
            self.low_res_width.into(),
            self.low_res_height.into(),
        )
        .unwrap();
        for level in 0..self.mipmap_count as u32 {
            let side = 1u32 << level;
            len += image_size(
                self.high_res_format,
                side.min(self.width.into()),
                side.min(self.height.into()),
            )
            .unwrap();
        }
        len + image_size(self.high_res_format, self.width.into(), self.height.into()).unwrap()
    }

    /// Header followed by the given image bytes.
    pub fn build(&self, payload: &[u8]) -> Vec<u8> {
        let mut buf = self.header_bytes();
        buf.extend_from_slice(payload);
        buf
    }

    /// Header followed by zeroed image bytes of the implied length.
    pub fn build_zeroed(&self) -> Vec<u8> {
        self.build(&vec![0u8; self.payload_len()])
    }
}

/// Encode one DXT1 block.
pub fn dxt1_block(color0: u16, color1: u16, indices: u32) -> [u8; 8] {
    let mut block = [0u8; 8];
    block[0..2].copy_from_slice(&color0.to_le_bytes());
    block[2..4].copy_from_slice(&color1.to_le_bytes());
    block[4..8].copy_from_slice(&indices.to_le_bytes());
    block
}
