//! Whole-file decoding.

use crate::decode::{decode, DecodedImage};
use crate::header::Header;
use crate::layout::{layout, ImageDescriptor, ImageKind};
use crate::Result;

/// A fully decoded VTF file.
///
/// Borrows the buffer it was decoded from; every image is decoded up front.
#[derive(Debug, Clone)]
pub struct Texture<'a> {
    source: &'a [u8],
    header: Header,
    thumbnail: Option<DecodedImage>,
    mipmaps: Vec<DecodedImage>,
    image: DecodedImage,
}

impl<'a> Texture<'a> {
    /// Decode every image in `data`.
    ///
    /// Fails on the first error from header parsing, layout, or any image's
    /// decode; no partially decoded texture is returned.
    pub fn assemble(data: &'a [u8]) -> Result<Self> {
        let header = Header::parse(data)?;
        let descriptors = layout(&header, data.len())?;

        let mut thumbnail = None;
        let mut mipmaps = Vec::with_capacity(header.mipmap_count as usize);
        let mut image = None;

        for descriptor in &descriptors {
            match descriptor.kind {
                ImageKind::Thumbnail if !header.has_thumbnail() => {}
                ImageKind::Thumbnail => thumbnail = Some(decode_image(descriptor, data)?),
                ImageKind::Mipmap(_) => mipmaps.push(decode_image(descriptor, data)?),
                ImageKind::Full => image = Some(decode_image(descriptor, data)?),
            }
        }

        // layout always emits the full image last
        let image = image.ok_or_else(|| {
            crate::Error::MalformedHeader("layout produced no full-resolution image".into())
        })?;

        Ok(Self {
            source: data,
            header,
            thumbnail,
            mipmaps,
            image,
        })
    }

    /// The buffer this texture was decoded from.
    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    /// The parsed header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The low-resolution thumbnail, if the file has one.
    pub fn thumbnail(&self) -> Option<&DecodedImage> {
        self.thumbnail.as_ref()
    }

    /// Mipmaps in storage order, smallest first.
    pub fn mipmaps(&self) -> &[DecodedImage] {
        &self.mipmaps
    }

    /// The full-resolution image.
    pub fn image(&self) -> &DecodedImage {
        &self.image
    }
}

fn decode_image(descriptor: &ImageDescriptor, data: &[u8]) -> Result<DecodedImage> {
    decode(
        descriptor.bytes(data)?,
        descriptor.width,
        descriptor.height,
        descriptor.depth,
        descriptor.format,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ImageFormat;
    use crate::testutil::{dxt1_block, VtfBuilder};
    use crate::Error;

    #[test]
    fn test_single_block_dxt1() {
        let data = VtfBuilder::new(4, 4, ImageFormat::Dxt1).build(&dxt1_block(0xFFFF, 0x0000, 0));

        let texture = Texture::assemble(&data).unwrap();

        assert!(texture.thumbnail().is_none());
        assert!(texture.mipmaps().is_empty());
        assert_eq!(texture.image().data(), &[255u8; 64][..]);
        assert_eq!(texture.source().as_ptr(), data.as_ptr());
        assert_eq!(texture.header().high_res_format, ImageFormat::Dxt1);
    }

    #[test]
    fn test_rgb888_with_thumbnail_and_mipmaps() {
        let builder = VtfBuilder::new(8, 8, ImageFormat::Rgb888)
            .thumbnail(ImageFormat::Dxt1, 4, 4)
            .mipmap_count(3);

        let mut payload = dxt1_block(0x001F, 0x0000, 0).to_vec();
        let mip_bytes = (1 + 4 + 16) * 3;
        payload.extend(std::iter::repeat(7u8).take(mip_bytes));
        payload.extend((0..8 * 8 * 3).map(|i| ((i + 1) * 10 % 256) as u8));
        let data = builder.build(&payload);

        let texture = Texture::assemble(&data).unwrap();

        let thumbnail = texture.thumbnail().unwrap();
        assert_eq!(thumbnail.pixel(3, 3), Some([0, 0, 255, 255]));

        let sizes: Vec<_> = texture
            .mipmaps()
            .iter()
            .map(|m| (m.width(), m.height()))
            .collect();
        assert_eq!(sizes, vec![(1, 1), (2, 2), (4, 4)]);
        assert!(texture.mipmaps()[2]
            .data()
            .chunks_exact(4)
            .all(|p| p == [7, 7, 7, 255]));

        let image = texture.image();
        assert_eq!(image.data().len(), 8 * 8 * 4);
        assert_eq!(image.pixel(0, 0), Some([10, 20, 30, 255]));
        assert_eq!(image.pixel(1, 0), Some([40, 50, 60, 255]));
        assert!(image.data().iter().skip(3).step_by(4).all(|&a| a == 255));
    }

    #[test]
    fn test_unsupported_high_res_format() {
        let builder = VtfBuilder::new(4, 4, ImageFormat::Dxt3);
        let data = builder.build_zeroed();
        assert_eq!(i32::from_le_bytes(data[52..56].try_into().unwrap()), 14);

        assert_eq!(
            Texture::assemble(&data).unwrap_err(),
            Error::UnsupportedFormat(ImageFormat::Dxt3)
        );
    }

    #[test]
    fn test_truncated_full_image() {
        let data = VtfBuilder::new(8, 8, ImageFormat::Bgra8888).build_zeroed();

        assert_eq!(
            Texture::assemble(&data[..data.len() - 4]).unwrap_err(),
            Error::TruncatedBuffer {
                needed: data.len(),
                available: data.len() - 4,
            }
        );
    }

    #[test]
    fn test_first_error_is_returned() {
        // The 1x1 DXT1 mipmap fails before the full image is reached.
        let data = VtfBuilder::new(4, 4, ImageFormat::Dxt1)
            .mipmap_count(1)
            .build_zeroed();

        assert!(matches!(
            Texture::assemble(&data),
            Err(Error::UnsupportedDimensions {
                width: 1,
                height: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_bad_signature() {
        let mut data = VtfBuilder::new(4, 4, ImageFormat::Rgba8888).build_zeroed();
        data[0] = b'X';

        assert!(matches!(
            Texture::assemble(&data),
            Err(Error::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_thumbnail_with_none_format_is_skipped() {
        let data = VtfBuilder::new(4, 4, ImageFormat::Rgba8888)
            .thumbnail(ImageFormat::None, 16, 16)
            .build_zeroed();

        let texture = Texture::assemble(&data).unwrap();
        assert!(texture.thumbnail().is_none());
        assert_eq!(texture.image().data().len(), 64);
    }

    #[test]
    fn test_empty_buffer() {
        assert!(Texture::assemble(&[]).unwrap_err().is_out_of_bounds());
    }
}
