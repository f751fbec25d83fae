//! # Chroma Assembler
//!
//! Authoring direction of the toolchain: text micro-assembly or hand-built
//! instruction streams in, program images out. The encoding side shares its
//! quantization formulas with the decoder, so authored images decode back to
//! exactly the instructions that produced them (plus padding NOPs).

pub mod assembler;
pub mod encoder;
pub mod error;
pub mod lexer;
pub mod parser;

pub use assembler::{assemble, assemble_image};
pub use encoder::{encode, encode_op};
pub use error::{AssemblerError, Result};
pub use parser::{parse_line, parse_register};
