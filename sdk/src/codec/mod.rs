//! # Catbuffer Codec
//!
//! The wire format is plain little-endian packing: no varints, no tags, no
//! alignment. Every entity starts with a `u32` size, fixed fields follow in
//! declaration order, and variable sections are preceded by their count or
//! byte length somewhere earlier in the entity.
//!
//! This module provides the three pieces every body codec is built from:
//!
//! - [`CatReader`] / [`CatWriter`]: cursor-based readers and writers that
//!   fail instead of panicking when the buffer runs out;
//! - [`WireFormat`]: the one trait every primitive and body implements;
//! - `fixed_layout!`: generates a struct and its `WireFormat` impl from an
//!   ordered field list, for bodies with no variable sections.

pub mod reader;
pub mod wire;
pub mod writer;

use thiserror::Error;

pub use reader::CatReader;
pub use wire::WireFormat;
pub use writer::CatWriter;

pub(crate) use wire::{fixed_layout, wire_enum};

/// Errors raised while encoding or decoding catbuffer bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A fixed-width value was built from a buffer of the wrong length.
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A read or a declared count ran past the end of the buffer.
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    /// Bytes were present but do not describe a valid entity.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The entity decoded cleanly but bytes were left over.
    #[error("{0} trailing bytes after entity")]
    TrailingBytes(usize),
}

impl CodecError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        CodecError::MalformedInput(msg.into())
    }
}

/// Copies `bytes` into a fixed-size array, failing with `SizeMismatch`.
pub fn fixed_bytes<const N: usize>(bytes: &[u8]) -> Result<[u8; N], CodecError> {
    bytes.try_into().map_err(|_| CodecError::SizeMismatch {
        expected: N,
        actual: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_bytes_checks_length() {
        assert_eq!(fixed_bytes::<4>(&[1, 2, 3, 4]).unwrap(), [1, 2, 3, 4]);
        assert_eq!(
            fixed_bytes::<32>(&[0u8; 31]),
            Err(CodecError::SizeMismatch { expected: 32, actual: 31 })
        );
    }

    #[test]
    fn errors_render_their_numbers() {
        let err = CodecError::TruncatedInput { needed: 8, remaining: 3 };
        assert_eq!(err.to_string(), "truncated input: needed 8 bytes, 3 remaining");
    }
}
