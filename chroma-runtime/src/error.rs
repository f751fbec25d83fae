//! Runtime error types
//!
//! Every fault carries the source position of the failing instruction, so a
//! faulted program can be traced back to the pixel that caused it.

use chroma_spec::Pos;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VmError {
    #[error("Division by zero at {pos}")]
    DivisionByZero { pos: Pos },

    #[error("Memory access out of bounds: address {addr} at {pos}")]
    MemoryOutOfBounds { addr: u16, pos: Pos },

    #[error("Call stack overflow (depth {depth}) at {pos}")]
    CallStackOverflow { depth: usize, pos: Pos },

    #[error("Return with empty call stack at {pos}")]
    CallStackUnderflow { pos: Pos },

    #[error("Jump target {target} outside the program, at {pos}")]
    JumpOutOfBounds { target: Pos, pos: Pos },

    #[error("Program counter ran past the end of the program (pc {pc}) without HALT")]
    PcOutOfBounds { pc: usize },
}

impl VmError {
    /// Source position of the failing instruction, when one exists.
    pub fn pos(&self) -> Option<Pos> {
        match self {
            VmError::DivisionByZero { pos }
            | VmError::MemoryOutOfBounds { pos, .. }
            | VmError::CallStackOverflow { pos, .. }
            | VmError::CallStackUnderflow { pos }
            | VmError::JumpOutOfBounds { pos, .. } => Some(*pos),
            VmError::PcOutOfBounds { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, VmError>;
