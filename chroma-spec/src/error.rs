//! # Error Types for the Chroma Specification
//!
//! Out-of-range colors and operands hard-fail; nothing in the spec layer
//! clamps silently.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChromaError {
    // Color validation errors
    #[error("Invalid hue: {hue} (valid range: 0-359)")]
    InvalidHue { hue: u16 },

    #[error("Invalid saturation: {sat} (valid range: 0-100)")]
    InvalidSaturation { sat: u8 },

    #[error("Invalid value: {val} (valid range: 0-100)")]
    InvalidValue { val: u8 },

    // Operand quantization errors
    #[error("Register index out of range: {reg} (valid range: 0-15)")]
    InvalidRegister { reg: u8 },

    #[error("Memory address out of range: {addr} (valid range: 0-1023)")]
    InvalidAddress { addr: u16 },

    #[error("Immediate out of range: {imm} (valid range: {min}..={max})")]
    InvalidImmediate { imm: i32, min: i32, max: i32 },

    #[error("Jump target ({x}, {y}) is not channel-encodable (both coordinates must be 0-100)")]
    InvalidTarget { x: u16, y: u16 },

    #[error("Step out of range: {step} (valid values: -1, 0, 1)")]
    InvalidStep { step: i8 },

    #[error("Channel scalar out of range: {scalar} (valid range: 0-100)")]
    InvalidScalar { scalar: u8 },

    // Grid errors
    #[error("Pixel grid dimensions {width}x{height} do not match {pixels} pixels")]
    DimensionMismatch {
        width: u32,
        height: u32,
        pixels: usize,
    },

    #[error("Pixel grid dimensions must be non-zero")]
    EmptyGrid,

    // Program errors
    #[error("Invalid program version: expected {expected:#010x}, found {found:#010x}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Program has {instructions} instructions but the {width}x{height} grid holds {cells}")]
    ProgramSizeMismatch {
        width: u32,
        height: u32,
        instructions: usize,
        cells: usize,
    },

    #[error("Control-flow target ({x}, {y}) lies outside the {width}x{height} program")]
    TargetOutsideProgram {
        x: u16,
        y: u16,
        width: u32,
        height: u32,
    },
}

impl ChromaError {
    /// Check if this error describes bad raw color data (as opposed to a
    /// structurally valid pixel carrying an out-of-range operand).
    pub fn is_color_error(&self) -> bool {
        matches!(
            self,
            ChromaError::InvalidHue { .. }
                | ChromaError::InvalidSaturation { .. }
                | ChromaError::InvalidValue { .. }
        )
    }
}
