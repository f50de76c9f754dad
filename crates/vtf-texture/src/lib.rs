//! Valve Texture Format (VTF) decoding.
//!
//! A VTF file is a fixed-layout header followed by a low-resolution
//! thumbnail, a mipmap chain stored smallest first, and the full-resolution
//! image. This crate decodes all of them into RGBA8888 buffers.
//!
//! - [`Header`] - Fixed-layout header parsing
//! - [`ImageFormat`] / [`FORMATS`] - Static format table
//! - [`layout`] - Byte ranges of each stored image
//! - [`decode`] - Channel permutation and DXT1 block decompression
//! - [`Texture`] - Everything above, for a whole file
//!
//! # Example
//!
//! ```no_run
//! use vtf_texture::Texture;
//!
//! let data = std::fs::read("brick.vtf")?;
//! let texture = Texture::assemble(&data)?;
//!
//! let image = texture.image();
//! println!("{}x{} ({})", image.width(), image.height(), texture.header().high_res_format);
//! for mipmap in texture.mipmaps() {
//!     println!("  mipmap {}x{}", mipmap.width(), mipmap.height());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Features
//!
//! - `parallel` - Decode DXT1 block rows on the rayon thread pool

mod decode;
mod error;
mod format;
mod header;
mod layout;
mod texture;

#[cfg(test)]
mod testutil;

pub use decode::{decode, DecodedImage};
pub use error::{Error, Result};
pub use format::{Decoder, FormatInfo, ImageFormat, FORMATS};
pub use header::{Header, TextureFlags, Version, MIN_HEADER_SIZE};
pub use layout::{image_size, layout, mipmap_dimensions, ImageDescriptor, ImageKind};
pub use texture::Texture;

/// VTF file signature ("VTF\0").
pub const VTF_SIGNATURE: &[u8; 4] = b"VTF\0";
