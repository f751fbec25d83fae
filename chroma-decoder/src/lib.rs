//! # Chroma Decoder
//!
//! Reading direction of the toolchain: program images (HSV grids or raw RGB
//! rasters) in, validated instruction streams out. Decoding is pure per
//! call; the only internal state is a bounded RGB conversion memo that never
//! affects results.

pub mod cache;
pub mod decoder;
pub mod error;
pub mod formatter;

pub use cache::HsvCache;
pub use decoder::{decode_pixel, Decoder};
pub use error::{ColorParseError, Result};
pub use formatter::{format_instruction, format_op, format_program};
