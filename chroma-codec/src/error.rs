//! Codec errors
//!
//! A malformed artifact is never repaired by guessing: every inconsistency
//! the decode path can detect is its own hard error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("Invalid artifact magic: expected {expected:#010x}, got {found:#010x}")]
    BadMagic { expected: u32, found: u32 },

    #[error("Unsupported artifact version: expected {expected:#010x}, found {found:#010x}")]
    UnsupportedVersion { expected: u32, found: u32 },

    #[error("Artifact method {method:?} does not match its payload")]
    MethodMismatch { method: crate::artifact::Method },

    #[error("Palette index {index} out of range (palette has {palette_len} entries)")]
    PaletteIndexOutOfRange { index: u32, palette_len: usize },

    #[error("Run with zero length")]
    ZeroLengthRun,

    #[error("Run lengths total {actual} cells, artifact declares {expected}")]
    RunLengthMismatch { expected: usize, actual: usize },

    #[error("Payload holds {actual} cells, artifact declares {expected}")]
    PayloadSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid pixel in artifact palette or runs: {0}")]
    InvalidPixel(#[from] chroma_spec::ChromaError),

    #[error("Checksum mismatch: artifact does not describe the pixels it decodes to")]
    ChecksumMismatch,

    #[error("Malformed artifact bytes: {0}")]
    Malformed(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, CompressionError>;
