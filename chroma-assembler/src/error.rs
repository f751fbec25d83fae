//! Assembler errors

use chroma_spec::ChromaError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssemblerError {
    #[error("Syntax error at line {line}: {message}")]
    SyntaxError { line: usize, message: String },

    #[error("Unknown instruction: {0}")]
    UnknownInstruction(String),

    #[error("Invalid register: {0}")]
    InvalidRegister(String),

    #[error("Invalid operand on line {line}: {source}")]
    InvalidOperand {
        line: usize,
        #[source]
        source: ChromaError,
    },

    #[error("Image width must be non-zero")]
    ZeroWidth,

    #[error("Encoding failed: {0}")]
    Encode(#[from] ChromaError),
}

pub type Result<T> = std::result::Result<T, AssemblerError>;
