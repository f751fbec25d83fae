//! # Chroma Specification v1.0
//!
//! Core types for the pixel-program representation: a program is a 2D grid
//! of HSV pixels, one instruction per pixel.
//!
//! ## Key Features
//! - Hue selects the opcode through a fixed, non-overlapping band table
//! - Saturation and value quantize to operands with exact round-trips
//! - 16 general-purpose i64 registers, r0 as the accumulator
//! - 1024-cell linear memory
//! - Reserved black pixel as NOP and grid padding
//! - Hard-fail policy: out-of-range colors and operands are errors, never
//!   clamped

pub mod error;
pub mod grid;
pub mod instruction;
pub mod pixel;
pub mod program;
pub mod registry;

pub use error::ChromaError;
pub use grid::PixelGrid;
pub use instruction::{Instruction, Op, Pos, Reg};
pub use pixel::{Hsv, Rgb, CHANNEL_MAX, HUE_MAX};
pub use program::{Program, FORMAT_VERSION};
pub use registry::{quant, HueBand, OpKind, OpcodeClass, BANDS, MEMORY_CELLS, NUM_REGISTERS};
