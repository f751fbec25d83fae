//! Main assembler logic
//!
//! Turns micro-assembly source into a `Program` laid out row-major over a
//! grid of the requested width, and optionally all the way into a pixel
//! image.

use chroma_spec::{Instruction, PixelGrid, Pos, Program};

use crate::encoder::encode;
use crate::error::{AssemblerError, Result};
use crate::parser::parse_line;

/// Assemble source code into a program laid out over a grid of `width`
/// columns.
pub fn assemble(source: &str, width: u32) -> Result<Program> {
    if width == 0 {
        return Err(AssemblerError::ZeroWidth);
    }

    let mut instructions = Vec::new();

    for (line_num, line) in source.lines().enumerate() {
        let Some(op) = parse_line(line, line_num + 1)? else {
            continue;
        };
        let index = instructions.len() as u32;
        let pos = Pos::new((index % width) as u16, (index / width) as u16);
        instructions.push(Instruction::new(op, pos));
    }

    let height = (instructions.len() as u32).div_ceil(width).max(1);
    let program = Program::new(width, height, instructions);
    program
        .validate()
        .map_err(|e| AssemblerError::InvalidOperand { line: 0, source: e })?;
    Ok(program)
}

/// Assemble source code straight to a program image.
pub fn assemble_image(source: &str, width: u32) -> Result<PixelGrid> {
    let program = assemble(source, width)?;
    encode(&program.instructions, width)
}
