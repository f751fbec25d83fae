//! # Program Structure
//!
//! A program is the decoded form of a pixel grid: an ordered instruction
//! stream plus the grid dimensions it came from and a format version tag.
//! The VM treats programs as read-only; whoever produced the program owns
//! it.

use serde::{Deserialize, Serialize};

use crate::error::ChromaError;
use crate::instruction::{Instruction, Pos};

/// Program format version: v1.0
pub const FORMAT_VERSION: u32 = 0x0001_0000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Format version tag
    pub version: u32,

    /// Source grid width in pixels
    pub width: u32,

    /// Source grid height in pixels
    pub height: u32,

    /// Instructions in row-major traversal order
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// Create a program over explicit grid dimensions.
    pub fn new(width: u32, height: u32, instructions: Vec<Instruction>) -> Self {
        Program {
            version: FORMAT_VERSION,
            width,
            height,
            instructions,
        }
    }

    /// Resolve a grid position to a linear instruction index. `None` when
    /// the position misses the grid or points past the instruction stream.
    pub fn index_of(&self, pos: Pos) -> Option<usize> {
        if (pos.x as u32) < self.width && (pos.y as u32) < self.height {
            let index = pos.y as usize * self.width as usize + pos.x as usize;
            (index < self.instructions.len()).then_some(index)
        } else {
            None
        }
    }

    /// Validate the program: version tag, dimension agreement, and every
    /// control-flow target landing inside the instruction stream. Runs
    /// before execution so that malformed programs never start.
    pub fn validate(&self) -> Result<(), ChromaError> {
        if self.version != FORMAT_VERSION {
            return Err(ChromaError::VersionMismatch {
                expected: FORMAT_VERSION,
                found: self.version,
            });
        }

        let cells = self.width as usize * self.height as usize;
        if self.instructions.len() > cells {
            return Err(ChromaError::ProgramSizeMismatch {
                width: self.width,
                height: self.height,
                instructions: self.instructions.len(),
                cells,
            });
        }

        for inst in &self.instructions {
            if let Some(target) = inst.op.target() {
                if self.index_of(target).is_none() {
                    return Err(ChromaError::TargetOutsideProgram {
                        x: target.x,
                        y: target.y,
                        width: self.width,
                        height: self.height,
                    });
                }
            }
        }

        Ok(())
    }
}
