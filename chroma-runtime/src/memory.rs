//! Memory subsystem
//!
//! A fixed rectangle of 1024 integer cells, zero-initialized. Every access
//! is bounds-checked; an out-of-range address faults with the position of
//! the instruction that issued it.

use chroma_spec::{Pos, MEMORY_CELLS};

use crate::error::VmError;

#[derive(Debug, Clone)]
pub struct Memory {
    cells: Vec<i64>,
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            cells: vec![0; MEMORY_CELLS],
        }
    }

    pub fn load(&self, addr: u16, pos: Pos) -> Result<i64, VmError> {
        self.cells
            .get(addr as usize)
            .copied()
            .ok_or(VmError::MemoryOutOfBounds { addr, pos })
    }

    pub fn store(&mut self, addr: u16, value: i64, pos: Pos) -> Result<(), VmError> {
        match self.cells.get_mut(addr as usize) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(VmError::MemoryOutOfBounds { addr, pos }),
        }
    }

    /// Snapshot of every cell, for execution results and diagnostics.
    pub fn snapshot(&self) -> Vec<i64> {
        self.cells.clone()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
