//! vtf - Valve Texture Format reading library.
//!
//! This crate provides a unified interface to the vtf library crates.
//!
//! # Crates
//!
//! - [`vtf_common`] - Bounds-checked binary reading and bit-field extraction
//! - [`vtf_texture`] - Header parsing, layout, and RGBA decoding
//!
//! # Example
//!
//! ```no_run
//! use vtf::prelude::*;
//!
//! let data = std::fs::read("materials/brick.vtf")?;
//! let texture = Texture::assemble(&data)?;
//!
//! let header = texture.header();
//! println!("VTF {} {}x{} {}", header.version, header.width, header.height, header.high_res_format);
//!
//! if let Some(thumbnail) = texture.thumbnail() {
//!     println!("Thumbnail: {}x{}", thumbnail.width(), thumbnail.height());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use vtf_common as common;
pub use vtf_texture as texture;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use vtf_common::{read_bits, BinaryReader};
    pub use vtf_texture::{
        layout, DecodedImage, Header, ImageDescriptor, ImageFormat, ImageKind, Texture,
        TextureFlags,
    };
}

// Re-export commonly used types at the crate root
pub use vtf_texture::{Error, Result, Texture};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
