//! Pixel-grid decoder
//!
//! Row-major traversal over the grid: every pixel is validated, checked
//! against the reserved NOP color, classified by hue, and quantized into an
//! operation. The whole program is validated before it is returned, so a
//! malformed image never reaches execution.

use chroma_spec::registry::quant;
use chroma_spec::{Hsv, Instruction, Op, OpKind, PixelGrid, Pos, Program, Reg, Rgb};

use crate::cache::HsvCache;
use crate::error::{ColorParseError, Result};

/// Grid decoder with an internal RGB conversion memo.
#[derive(Debug, Default)]
pub struct Decoder {
    cache: HsvCache,
}

impl Decoder {
    pub fn new() -> Self {
        Decoder {
            cache: HsvCache::new(),
        }
    }

    /// A decoder whose conversion memo holds at most `capacity` entries.
    /// Capacity zero disables memoization.
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Decoder {
            cache: HsvCache::with_capacity(capacity),
        }
    }

    /// Decode an HSV pixel grid into a program.
    pub fn decode(&mut self, grid: &PixelGrid) -> Result<Program> {
        let mut instructions = Vec::with_capacity(grid.len());

        for (y, row) in grid.rows().enumerate() {
            for (x, px) in row.iter().enumerate() {
                let op = decode_pixel(*px).map_err(|e| ColorParseError::at(x as u32, y as u32, e))?;
                instructions.push(Instruction::new(op, Pos::new(x as u16, y as u16)));
            }
        }

        let program = Program::new(grid.width(), grid.height(), instructions);
        program.validate().map_err(ColorParseError::MalformedImage)?;
        Ok(program)
    }

    /// Decode raw RGB raster data: convert through the memo, then decode the
    /// resulting grid.
    pub fn decode_rgb(&mut self, width: u32, height: u32, pixels: &[Rgb]) -> Result<Program> {
        let hsv: Vec<Hsv> = pixels.iter().map(|&rgb| self.cache.convert(rgb)).collect();
        let grid = PixelGrid::new(width, height, hsv).map_err(ColorParseError::MalformedImage)?;
        self.decode(&grid)
    }

    /// Number of memoized conversions.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// Decode one pixel into an operation.
///
/// Order matters: range validation first (hard-fail policy), then the
/// reserved black NOP, then hue classification and operand quantization.
pub fn decode_pixel(px: Hsv) -> std::result::Result<Op, chroma_spec::ChromaError> {
    px.validate()?;

    if px.is_black() {
        return Ok(Op::Nop);
    }

    let kind = match OpKind::classify(px.hue) {
        Some(kind) => kind,
        // Unreachable after validate(), kept as a hard failure rather than
        // a silent NOP.
        None => return Err(chroma_spec::ChromaError::InvalidHue { hue: px.hue }),
    };

    let (s, v) = (px.sat, px.val);
    let op = match kind {
        OpKind::Nop => Op::Nop,
        OpKind::Lit => Op::Lit {
            imm: quant::immediate(s, v),
        },
        OpKind::Add => Op::Add {
            ra: Reg::new(quant::index16(s))?,
            rb: Reg::new(quant::index16(v))?,
        },
        OpKind::Sub => Op::Sub {
            ra: Reg::new(quant::index16(s))?,
            rb: Reg::new(quant::index16(v))?,
        },
        OpKind::Mul => Op::Mul {
            ra: Reg::new(quant::index16(s))?,
            rb: Reg::new(quant::index16(v))?,
        },
        OpKind::Div => Op::Div {
            ra: Reg::new(quant::index16(s))?,
            rb: Reg::new(quant::index16(v))?,
        },
        OpKind::Mod => Op::Mod {
            ra: Reg::new(quant::index16(s))?,
            rb: Reg::new(quant::index16(v))?,
        },
        OpKind::Load => Op::Load {
            addr: quant::address(s, v)?,
        },
        OpKind::Store => Op::Store {
            addr: quant::address(s, v)?,
        },
        OpKind::Copy => Op::Copy {
            rd: Reg::new(quant::index16(s))?,
            rs: Reg::new(quant::index16(v))?,
        },
        OpKind::Jmp => Op::Jmp {
            target: Pos::new(s as u16, v as u16),
        },
        OpKind::Jz => Op::Jz {
            target: Pos::new(s as u16, v as u16),
        },
        OpKind::Jnz => Op::Jnz {
            target: Pos::new(s as u16, v as u16),
        },
        OpKind::Call => Op::Call {
            target: Pos::new(s as u16, v as u16),
        },
        OpKind::Ret => Op::Ret,
        OpKind::ScanTile => Op::ScanTile,
        OpKind::MoveAgent => Op::MoveAgent {
            dx: quant::step(s),
            dy: quant::step(v),
        },
        OpKind::Pathfind => Op::Pathfind {
            tile: quant::index16(s),
        },
        OpKind::Print => Op::Print {
            src: Reg::new(quant::index16(s))?,
        },
        OpKind::Input => Op::Input,
        OpKind::NetSend => Op::NetSend { port: s },
        OpKind::Halt => Op::Halt { code: s },
        OpKind::Debug => Op::Debug { tag: s },
    };

    Ok(op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_spec::ChromaError;

    fn px(hue: u16, sat: u8, val: u8) -> Hsv {
        Hsv::new(hue, sat, val).unwrap()
    }

    #[test]
    fn test_decode_pixel_black_is_nop() {
        assert_eq!(decode_pixel(Hsv::BLACK).unwrap(), Op::Nop);
        // Black at a nonzero hue is still the reserved pixel
        assert_eq!(decode_pixel(px(200, 0, 0)).unwrap(), Op::Nop);
    }

    #[test]
    fn test_decode_pixel_literal() {
        // Band midpoint, channels 50/50: imm = 50*101 + 50 - 5050 = 50
        assert_eq!(decode_pixel(px(15, 50, 50)).unwrap(), Op::Lit { imm: 50 });
    }

    #[test]
    fn test_decode_pixel_arithmetic_registers() {
        // ADD band; channels at register midpoints for r1 and r0
        let ch1 = quant::index16_channel(1).unwrap();
        let ch0 = quant::index16_channel(0).unwrap();
        assert_eq!(
            decode_pixel(px(36, ch1, ch0)).unwrap(),
            Op::Add {
                ra: Reg::R1,
                rb: Reg::R0
            }
        );
    }

    #[test]
    fn test_decode_pixel_out_of_range_address() {
        // STORE band with channels past the memory size
        let err = decode_pixel(px(120, 100, 100)).unwrap_err();
        assert_eq!(err, ChromaError::InvalidAddress { addr: 10200 });
    }

    #[test]
    fn test_decode_pixel_rejects_invalid_color() {
        let bad = Hsv {
            hue: 400,
            sat: 10,
            val: 10,
        };
        assert_eq!(
            decode_pixel(bad).unwrap_err(),
            ChromaError::InvalidHue { hue: 400 }
        );
    }

    #[test]
    fn test_decode_grid_positions() {
        let grid = PixelGrid::new(
            2,
            2,
            vec![px(15, 50, 50), Hsv::BLACK, px(280, 1, 50), px(335, 0, 50)],
        )
        .unwrap();

        let program = Decoder::new().decode(&grid).unwrap();
        assert_eq!(program.width, 2);
        assert_eq!(program.height, 2);
        assert_eq!(program.instructions.len(), 4);
        assert_eq!(program.instructions[0].pos, Pos::new(0, 0));
        assert_eq!(program.instructions[1].op, Op::Nop);
        assert_eq!(program.instructions[2].pos, Pos::new(0, 1));
        assert_eq!(program.instructions[3].op, Op::Halt { code: 0 });
    }

    #[test]
    fn test_decode_reports_position() {
        // Bad address at (1, 0)
        let grid = PixelGrid::new(2, 1, vec![Hsv::BLACK, px(95, 100, 100)]).unwrap();
        let err = Decoder::new().decode(&grid).unwrap_err();
        assert!(matches!(
            err,
            ColorParseError::InvalidInstruction { x: 1, y: 0, .. }
        ));
    }

    #[test]
    fn test_decode_rgb_uses_cache() {
        let mut decoder = Decoder::new();
        // A 2x1 all-black image: one distinct triple
        let program = decoder
            .decode_rgb(2, 1, &[Rgb::new(0, 0, 0), Rgb::new(0, 0, 0)])
            .unwrap();
        assert_eq!(program.instructions[0].op, Op::Nop);
        assert_eq!(decoder.cache_len(), 1);
    }

    #[test]
    fn test_decode_rgb_dimension_mismatch() {
        let mut decoder = Decoder::new();
        let err = decoder.decode_rgb(3, 2, &[Rgb::new(0, 0, 0)]).unwrap_err();
        assert!(matches!(err, ColorParseError::MalformedImage(_)));
    }
}
