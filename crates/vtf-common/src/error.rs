//! Error types for vtf-common.

use thiserror::Error;

/// Error raised by the binary reading primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A read would run past the end of the buffer.
    #[error("read of {needed} bytes at offset {offset} is out of bounds (buffer holds {available} bytes)")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A bit range does not fit inside the group it is extracted from.
    #[error("bit range {bit_offset}+{bit_count} exceeds a {group_bits}-bit group")]
    InvalidBitRange {
        bit_offset: u32,
        bit_count: u32,
        group_bits: u32,
    },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
