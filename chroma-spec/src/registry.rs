//! # Hue-Band Instruction Registry
//!
//! The registry is the authoritative mapping from pixel color to opcode.
//! Source material for this encoding carried overlapping hue tables; the
//! partition below is the single, non-overlapping truth. All bands are
//! half-open `[lo, hi)` — the lower edge belongs to the band, the upper edge
//! to the next one — so every hue in `[0, 360)` classifies to exactly one
//! opcode kind.
//!
//! ## Band layout
//!
//! ```text
//! [  0,  30)  Data literal   LIT
//! [ 30,  90)  Arithmetic     ADD SUB MUL DIV MOD       (12 degrees each)
//! [ 90, 150)  Memory         LOAD STORE COPY           (20 degrees each)
//! [150, 210)  Control flow   JMP JZ JNZ CALL RET       (12 degrees each)
//! [210, 270)  Host interop   SCANTILE MOVEAGENT PATHFIND (20 degrees each)
//! [270, 330)  I/O            PRINT INPUT NETSEND       (20 degrees each)
//! [330, 360)  System         HALT [330,345) DEBUG [345,360)
//! ```
//!
//! Pure black (saturation 0, value 0) is the reserved NOP pixel and is
//! checked before hue classification; it never reaches a band.
//!
//! ## Operand quantization
//!
//! The saturation and value channels (0-100) quantize to operand integers
//! through the fixed formulas in [`quant`]. Encode and decode share the same
//! constants, so `decode(encode(x)) == x` for every representable operand.

use serde::{Deserialize, Serialize};

use crate::error::ChromaError;

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 16;

/// Number of addressable linear memory cells.
pub const MEMORY_CELLS: usize = 1024;

/// Smallest encodable immediate.
pub const IMM_MIN: i32 = -(quant::IMM_BIAS as i32);

/// Largest encodable immediate.
pub const IMM_MAX: i32 = (100 * 101 + 100) - quant::IMM_BIAS as i32;

/// Opcode family decoded from a pixel's hue band.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpcodeClass {
    /// Data literal: LIT
    DataLiteral = 0,
    /// Arithmetic: ADD, SUB, MUL, DIV, MOD
    Arithmetic = 1,
    /// Memory: LOAD, STORE, COPY
    Memory = 2,
    /// Control flow: JMP, JZ, JNZ, CALL, RET
    ControlFlow = 3,
    /// Host interop: SCANTILE, MOVEAGENT, PATHFIND
    Host = 4,
    /// I/O: PRINT, INPUT, NETSEND
    Io = 5,
    /// System: HALT, DEBUG (and the reserved NOP pixel)
    System = 6,
}

impl OpcodeClass {
    /// Total number of opcode classes.
    pub const COUNT: usize = 7;
}

impl std::fmt::Display for OpcodeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OpcodeClass::DataLiteral => "data",
            OpcodeClass::Arithmetic => "arithmetic",
            OpcodeClass::Memory => "memory",
            OpcodeClass::ControlFlow => "control",
            OpcodeClass::Host => "host",
            OpcodeClass::Io => "io",
            OpcodeClass::System => "system",
        };
        write!(f, "{}", name)
    }
}

/// Operand-free opcode discriminant. [`crate::instruction::Op`] is the
/// operand-carrying form; this is what a hue band names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    Nop,
    Lit,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Load,
    Store,
    Copy,
    Jmp,
    Jz,
    Jnz,
    Call,
    Ret,
    ScanTile,
    MoveAgent,
    Pathfind,
    Print,
    Input,
    NetSend,
    Halt,
    Debug,
}

/// One hue band: `[lo, hi)` in whole degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HueBand {
    pub lo: u16,
    pub hi: u16,
    pub kind: OpKind,
}

const fn band(lo: u16, hi: u16, kind: OpKind) -> HueBand {
    HueBand { lo, hi, kind }
}

/// The full partition of `[0, 360)`. Order matches the hue circle; NOP is
/// absent because the black pixel is reserved outside the hue scheme.
pub const BANDS: [HueBand; 22] = [
    band(0, 30, OpKind::Lit),
    band(30, 42, OpKind::Add),
    band(42, 54, OpKind::Sub),
    band(54, 66, OpKind::Mul),
    band(66, 78, OpKind::Div),
    band(78, 90, OpKind::Mod),
    band(90, 110, OpKind::Load),
    band(110, 130, OpKind::Store),
    band(130, 150, OpKind::Copy),
    band(150, 162, OpKind::Jmp),
    band(162, 174, OpKind::Jz),
    band(174, 186, OpKind::Jnz),
    band(186, 198, OpKind::Call),
    band(198, 210, OpKind::Ret),
    band(210, 230, OpKind::ScanTile),
    band(230, 250, OpKind::MoveAgent),
    band(250, 270, OpKind::Pathfind),
    band(270, 290, OpKind::Print),
    band(290, 310, OpKind::Input),
    band(310, 330, OpKind::NetSend),
    band(330, 345, OpKind::Halt),
    band(345, 360, OpKind::Debug),
];

impl OpKind {
    /// Classify a hue into its opcode kind. Total over `[0, 360)`; hues at
    /// or above 360 are invalid color data, not a classification result.
    pub fn classify(hue: u16) -> Option<OpKind> {
        BANDS
            .iter()
            .find(|b| b.lo <= hue && hue < b.hi)
            .map(|b| b.kind)
    }

    /// The band this kind occupies, if it has one (NOP does not).
    pub fn hue_band(self) -> Option<HueBand> {
        BANDS.iter().copied().find(|b| b.kind == self)
    }

    /// Canonical encoding hue: the band midpoint, safely away from both
    /// edges. NOP encodes as the black pixel and reports hue 0.
    pub fn canonical_hue(self) -> u16 {
        match self.hue_band() {
            Some(b) => (b.lo + b.hi) / 2,
            None => 0,
        }
    }

    /// The opcode class this kind belongs to.
    pub const fn class(self) -> OpcodeClass {
        match self {
            OpKind::Lit => OpcodeClass::DataLiteral,
            OpKind::Add | OpKind::Sub | OpKind::Mul | OpKind::Div | OpKind::Mod => {
                OpcodeClass::Arithmetic
            }
            OpKind::Load | OpKind::Store | OpKind::Copy => OpcodeClass::Memory,
            OpKind::Jmp | OpKind::Jz | OpKind::Jnz | OpKind::Call | OpKind::Ret => {
                OpcodeClass::ControlFlow
            }
            OpKind::ScanTile | OpKind::MoveAgent | OpKind::Pathfind => OpcodeClass::Host,
            OpKind::Print | OpKind::Input | OpKind::NetSend => OpcodeClass::Io,
            OpKind::Nop | OpKind::Halt | OpKind::Debug => OpcodeClass::System,
        }
    }
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OpKind::Nop => "nop",
            OpKind::Lit => "lit",
            OpKind::Add => "add",
            OpKind::Sub => "sub",
            OpKind::Mul => "mul",
            OpKind::Div => "div",
            OpKind::Mod => "mod",
            OpKind::Load => "load",
            OpKind::Store => "store",
            OpKind::Copy => "copy",
            OpKind::Jmp => "jmp",
            OpKind::Jz => "jz",
            OpKind::Jnz => "jnz",
            OpKind::Call => "call",
            OpKind::Ret => "ret",
            OpKind::ScanTile => "scan",
            OpKind::MoveAgent => "move",
            OpKind::Pathfind => "path",
            OpKind::Print => "print",
            OpKind::Input => "input",
            OpKind::NetSend => "net",
            OpKind::Halt => "halt",
            OpKind::Debug => "debug",
        };
        write!(f, "{}", name)
    }
}

/// Fixed channel-to-operand quantization formulas, shared by the encode and
/// decode directions.
pub mod quant {
    use super::{ChromaError, IMM_MAX, IMM_MIN, MEMORY_CELLS, NUM_REGISTERS};

    /// Bias applied to the combined-channel immediate encoding.
    pub(super) const IMM_BIAS: u16 = 5050;

    /// 16-way index (register, tile kind) from one channel. Total on 0-100.
    #[inline]
    pub fn index16(ch: u8) -> u8 {
        (ch as u16 * NUM_REGISTERS as u16 / 101) as u8
    }

    /// Canonical channel for a 16-way index: the bucket midpoint.
    pub fn index16_channel(index: u8) -> Result<u8, ChromaError> {
        if index as usize >= NUM_REGISTERS {
            return Err(ChromaError::InvalidRegister { reg: index });
        }
        Ok(((index as u16 * 101 + 50) / NUM_REGISTERS as u16) as u8)
    }

    /// Memory address from both channels. Hard-fails past the memory size;
    /// the channels can express more cells than the machine has.
    pub fn address(sat: u8, val: u8) -> Result<u16, ChromaError> {
        let addr = sat as u16 * 101 + val as u16;
        if addr as usize >= MEMORY_CELLS {
            return Err(ChromaError::InvalidAddress { addr });
        }
        Ok(addr)
    }

    /// Canonical channels for a memory address.
    pub fn address_channels(addr: u16) -> Result<(u8, u8), ChromaError> {
        if addr as usize >= MEMORY_CELLS {
            return Err(ChromaError::InvalidAddress { addr });
        }
        Ok(((addr / 101) as u8, (addr % 101) as u8))
    }

    /// Signed immediate from both channels. Total on the channel domain.
    #[inline]
    pub fn immediate(sat: u8, val: u8) -> i32 {
        sat as i32 * 101 + val as i32 - IMM_BIAS as i32
    }

    /// Canonical channels for a signed immediate.
    pub fn immediate_channels(imm: i32) -> Result<(u8, u8), ChromaError> {
        if !(IMM_MIN..=IMM_MAX).contains(&imm) {
            return Err(ChromaError::InvalidImmediate {
                imm,
                min: IMM_MIN,
                max: IMM_MAX,
            });
        }
        let biased = (imm + IMM_BIAS as i32) as u16;
        Ok(((biased / 101) as u8, (biased % 101) as u8))
    }

    /// Tri-state step (-1, 0, +1) from one channel. Total on 0-100.
    #[inline]
    pub fn step(ch: u8) -> i8 {
        match ch {
            0..=33 => -1,
            34..=66 => 0,
            _ => 1,
        }
    }

    /// Canonical channel for a tri-state step.
    pub fn step_channel(step: i8) -> Result<u8, ChromaError> {
        match step {
            -1 => Ok(17),
            0 => Ok(50),
            1 => Ok(84),
            _ => Err(ChromaError::InvalidStep { step }),
        }
    }

    /// Channel-verbatim scalar (halt code, debug tag, port). The decode
    /// direction is the identity; encode rejects values past 100.
    pub fn scalar_channel(scalar: u8) -> Result<u8, ChromaError> {
        if scalar > 100 {
            return Err(ChromaError::InvalidScalar { scalar });
        }
        Ok(scalar)
    }
}
