//! Common utilities for vtf.
//!
//! This crate provides the low-level reading primitives used by the texture
//! decoder:
//!
//! - [`BinaryReader`] - Bounds-checked little-endian reads from byte slices
//! - [`read_bits`] - MSB-first bit-field extraction from a byte group

mod bits;
mod error;
mod reader;

pub use bits::{read_bits, BitGroup};
pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
