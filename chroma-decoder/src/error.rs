//! Decoder errors
//!
//! Parse failures stay discriminable: bad raw pixel data, a structurally
//! valid pixel carrying impossible operands, and a malformed image are
//! distinct variants, each tagged with the offending grid position.

use chroma_spec::ChromaError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Invalid color at ({x}, {y}): {source}")]
    InvalidColor {
        x: u32,
        y: u32,
        #[source]
        source: ChromaError,
    },

    #[error("Invalid instruction at ({x}, {y}): {source}")]
    InvalidInstruction {
        x: u32,
        y: u32,
        #[source]
        source: ChromaError,
    },

    #[error("Malformed image: {0}")]
    MalformedImage(#[from] ChromaError),
}

impl ColorParseError {
    /// Attach a grid position to a spec-level error, routing color-range
    /// problems and operand problems to their own variants.
    pub fn at(x: u32, y: u32, source: ChromaError) -> Self {
        if source.is_color_error() {
            ColorParseError::InvalidColor { x, y, source }
        } else {
            ColorParseError::InvalidInstruction { x, y, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, ColorParseError>;
