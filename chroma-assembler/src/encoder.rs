//! Instruction-to-pixel encoding
//!
//! The inverse of decoding: each operation becomes one pixel at its band's
//! midpoint hue, with operands packed into the saturation and value
//! channels through the shared quantization formulas. The grid is padded to
//! a full rectangle with the reserved black NOP pixel.

use chroma_spec::registry::quant;
use chroma_spec::{ChromaError, Hsv, Instruction, Op, PixelGrid};

use crate::error::{AssemblerError, Result};

/// Neutral channel for operands an opcode does not use.
const CH_UNUSED: u8 = 50;

/// Encode one operation as a pixel.
pub fn encode_op(op: &Op) -> std::result::Result<Hsv, ChromaError> {
    let hue = op.kind().canonical_hue();
    let (sat, val) = match *op {
        Op::Nop => return Ok(Hsv::BLACK),
        Op::Lit { imm } => quant::immediate_channels(imm)?,
        Op::Add { ra, rb }
        | Op::Sub { ra, rb }
        | Op::Mul { ra, rb }
        | Op::Div { ra, rb }
        | Op::Mod { ra, rb } => (
            quant::index16_channel(ra.raw())?,
            quant::index16_channel(rb.raw())?,
        ),
        Op::Load { addr } | Op::Store { addr } => quant::address_channels(addr)?,
        Op::Copy { rd, rs } => (
            quant::index16_channel(rd.raw())?,
            quant::index16_channel(rs.raw())?,
        ),
        Op::Jmp { target } | Op::Jz { target } | Op::Jnz { target } | Op::Call { target } => {
            if target.x > 100 || target.y > 100 {
                return Err(ChromaError::InvalidTarget {
                    x: target.x,
                    y: target.y,
                });
            }
            (target.x as u8, target.y as u8)
        }
        Op::Ret | Op::ScanTile | Op::Input => (CH_UNUSED, CH_UNUSED),
        Op::MoveAgent { dx, dy } => (quant::step_channel(dx)?, quant::step_channel(dy)?),
        Op::Pathfind { tile } => (quant::index16_channel(tile)?, CH_UNUSED),
        Op::Print { src } => (quant::index16_channel(src.raw())?, CH_UNUSED),
        Op::NetSend { port } => (quant::scalar_channel(port)?, CH_UNUSED),
        Op::Halt { code } => (quant::scalar_channel(code)?, CH_UNUSED),
        Op::Debug { tag } => (quant::scalar_channel(tag)?, CH_UNUSED),
    };

    Hsv::new(hue, sat, val)
}

/// Encode an instruction stream as a pixel grid of the given width.
/// Height is the ceiling of `len / width`; the trailing remainder is padded
/// with black NOP pixels.
pub fn encode(instructions: &[Instruction], width: u32) -> Result<PixelGrid> {
    if width == 0 {
        return Err(AssemblerError::ZeroWidth);
    }

    let height = (instructions.len() as u32).div_ceil(width).max(1);
    let mut pixels = Vec::with_capacity((width * height) as usize);

    for inst in instructions {
        pixels.push(encode_op(&inst.op)?);
    }
    pixels.resize((width * height) as usize, Hsv::BLACK);

    PixelGrid::new(width, height, pixels).map_err(AssemblerError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_spec::{OpKind, Pos, Reg};

    #[test]
    fn test_encode_op_nop_is_black() {
        assert_eq!(encode_op(&Op::Nop).unwrap(), Hsv::BLACK);
    }

    #[test]
    fn test_encode_op_hue_is_band_midpoint() {
        let px = encode_op(&Op::Halt { code: 3 }).unwrap();
        assert_eq!(px.hue, OpKind::Halt.canonical_hue());
        assert_eq!(px.sat, 3);

        let px = encode_op(&Op::Lit { imm: 50 }).unwrap();
        assert_eq!(px.hue, OpKind::Lit.canonical_hue());
        assert_eq!((px.sat, px.val), (50, 50));
    }

    #[test]
    fn test_encode_op_rejects_unencodable_target() {
        let op = Op::Jmp {
            target: Pos::new(101, 0),
        };
        assert_eq!(
            encode_op(&op).unwrap_err(),
            ChromaError::InvalidTarget { x: 101, y: 0 }
        );
    }

    #[test]
    fn test_encode_pads_to_rectangle() {
        let instructions = vec![
            Instruction::new(Op::Lit { imm: 1 }, Pos::new(0, 0)),
            Instruction::new(
                Op::Print { src: Reg::R0 },
                Pos::new(1, 0),
            ),
            Instruction::new(Op::Halt { code: 0 }, Pos::new(2, 0)),
        ];
        let grid = encode(&instructions, 2).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(1, 1).unwrap(), Hsv::BLACK);
    }

    #[test]
    fn test_encode_empty_stream_is_single_nop_row() {
        let grid = encode(&[], 4).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 1);
        assert!(grid.pixels().iter().all(|px| px.is_black()));
    }

    #[test]
    fn test_encode_zero_width() {
        assert_eq!(encode(&[], 0).unwrap_err(), AssemblerError::ZeroWidth);
    }
}
