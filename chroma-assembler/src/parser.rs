//! Micro-assembly parser
//!
//! One instruction per line. Operands are registers (`r0`-`r15`) or plain
//! integers, comma-separated. Jump targets are written as explicit grid
//! coordinates: `jmp x, y`.

use chroma_spec::registry::{IMM_MAX, IMM_MIN};
use chroma_spec::{ChromaError, Op, Pos, Reg};
use logos::Logos;

use crate::error::{AssemblerError, Result};
use crate::lexer::Token;

/// A parsed operand: register or integer.
#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Register(Reg),
    Number(i64),
}

/// Parse a register name of the form `r<n>`.
pub fn parse_register(name: &str) -> Result<Reg> {
    let digits = name
        .strip_prefix('r')
        .ok_or_else(|| AssemblerError::InvalidRegister(name.to_string()))?;
    let index: u8 = digits
        .parse()
        .map_err(|_| AssemblerError::InvalidRegister(name.to_string()))?;
    Reg::new(index).map_err(|_| AssemblerError::InvalidRegister(name.to_string()))
}

/// Parse one source line into an operation. `line` is the 1-based line
/// number for diagnostics.
pub fn parse_line(text: &str, line: usize) -> Result<Option<Op>> {
    let mut mnemonic: Option<String> = None;
    let mut operands: Vec<Operand> = Vec::new();

    for token in Token::lexer(text) {
        let token = token.map_err(|_| AssemblerError::SyntaxError {
            line,
            message: format!("Unrecognized input in {:?}", text.trim()),
        })?;
        match token {
            Token::Identifier(name) if mnemonic.is_none() => mnemonic = Some(name),
            Token::Identifier(name) => {
                return Err(AssemblerError::SyntaxError {
                    line,
                    message: format!("Unexpected identifier {:?}", name),
                })
            }
            Token::Register(name) => operands.push(Operand::Register(parse_register(&name)?)),
            Token::Number(value) => operands.push(Operand::Number(value)),
            Token::Comma => {}
            Token::Newline => break,
        }
    }

    let Some(mnemonic) = mnemonic else {
        return Ok(None); // blank or comment-only line
    };

    parse_mnemonic(&mnemonic, &operands, line).map(Some)
}

fn parse_mnemonic(mnemonic: &str, operands: &[Operand], line: usize) -> Result<Op> {
    let op = match mnemonic {
        "nop" => {
            arity(operands, 0, line)?;
            Op::Nop
        }
        "lit" => {
            arity(operands, 1, line)?;
            Op::Lit {
                imm: number(&operands[0], line).and_then(|n| immediate(n, line))?,
            }
        }
        "add" | "sub" | "mul" | "div" | "mod" => {
            arity(operands, 2, line)?;
            let ra = register(&operands[0], line)?;
            let rb = register(&operands[1], line)?;
            match mnemonic {
                "add" => Op::Add { ra, rb },
                "sub" => Op::Sub { ra, rb },
                "mul" => Op::Mul { ra, rb },
                "div" => Op::Div { ra, rb },
                _ => Op::Mod { ra, rb },
            }
        }
        "load" | "store" => {
            arity(operands, 1, line)?;
            let addr = address(number(&operands[0], line)?, line)?;
            if mnemonic == "load" {
                Op::Load { addr }
            } else {
                Op::Store { addr }
            }
        }
        "copy" => {
            arity(operands, 2, line)?;
            Op::Copy {
                rd: register(&operands[0], line)?,
                rs: register(&operands[1], line)?,
            }
        }
        "jmp" | "jz" | "jnz" | "call" => {
            arity(operands, 2, line)?;
            let target = target(
                number(&operands[0], line)?,
                number(&operands[1], line)?,
                line,
            )?;
            match mnemonic {
                "jmp" => Op::Jmp { target },
                "jz" => Op::Jz { target },
                "jnz" => Op::Jnz { target },
                _ => Op::Call { target },
            }
        }
        "ret" => {
            arity(operands, 0, line)?;
            Op::Ret
        }
        "scan" => {
            arity(operands, 0, line)?;
            Op::ScanTile
        }
        "move" => {
            arity(operands, 2, line)?;
            Op::MoveAgent {
                dx: step(number(&operands[0], line)?, line)?,
                dy: step(number(&operands[1], line)?, line)?,
            }
        }
        "path" => {
            arity(operands, 1, line)?;
            Op::Pathfind {
                tile: scalar16(number(&operands[0], line)?, line)?,
            }
        }
        "print" => {
            arity(operands, 1, line)?;
            Op::Print {
                src: register(&operands[0], line)?,
            }
        }
        "input" => {
            arity(operands, 0, line)?;
            Op::Input
        }
        "net" => {
            arity(operands, 1, line)?;
            Op::NetSend {
                port: scalar(number(&operands[0], line)?, line)?,
            }
        }
        "halt" => {
            arity(operands, 1, line)?;
            Op::Halt {
                code: scalar(number(&operands[0], line)?, line)?,
            }
        }
        "debug" => {
            arity(operands, 1, line)?;
            Op::Debug {
                tag: scalar(number(&operands[0], line)?, line)?,
            }
        }
        other => return Err(AssemblerError::UnknownInstruction(other.to_string())),
    };
    Ok(op)
}

fn arity(operands: &[Operand], expected: usize, line: usize) -> Result<()> {
    if operands.len() == expected {
        Ok(())
    } else {
        Err(AssemblerError::SyntaxError {
            line,
            message: format!(
                "Expected {} operand(s), found {}",
                expected,
                operands.len()
            ),
        })
    }
}

fn register(operand: &Operand, line: usize) -> Result<Reg> {
    match operand {
        Operand::Register(reg) => Ok(*reg),
        Operand::Number(n) => Err(AssemblerError::SyntaxError {
            line,
            message: format!("Expected a register, found number {}", n),
        }),
    }
}

fn number(operand: &Operand, line: usize) -> Result<i64> {
    match operand {
        Operand::Number(n) => Ok(*n),
        Operand::Register(reg) => Err(AssemblerError::SyntaxError {
            line,
            message: format!("Expected a number, found register {}", reg),
        }),
    }
}

fn immediate(n: i64, line: usize) -> Result<i32> {
    if (IMM_MIN as i64..=IMM_MAX as i64).contains(&n) {
        Ok(n as i32)
    } else {
        Err(AssemblerError::InvalidOperand {
            line,
            source: ChromaError::InvalidImmediate {
                imm: n.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
                min: IMM_MIN,
                max: IMM_MAX,
            },
        })
    }
}

fn address(n: i64, line: usize) -> Result<u16> {
    u16::try_from(n)
        .ok()
        .filter(|&a| (a as usize) < chroma_spec::MEMORY_CELLS)
        .ok_or(AssemblerError::InvalidOperand {
            line,
            source: ChromaError::InvalidAddress {
                addr: n.clamp(0, u16::MAX as i64) as u16,
            },
        })
}

fn target(x: i64, y: i64, line: usize) -> Result<Pos> {
    let valid = (0..=100).contains(&x) && (0..=100).contains(&y);
    if valid {
        Ok(Pos::new(x as u16, y as u16))
    } else {
        Err(AssemblerError::InvalidOperand {
            line,
            source: ChromaError::InvalidTarget {
                x: x.clamp(0, u16::MAX as i64) as u16,
                y: y.clamp(0, u16::MAX as i64) as u16,
            },
        })
    }
}

fn step(n: i64, line: usize) -> Result<i8> {
    if (-1..=1).contains(&n) {
        Ok(n as i8)
    } else {
        Err(AssemblerError::InvalidOperand {
            line,
            source: ChromaError::InvalidStep {
                step: n.clamp(i8::MIN as i64, i8::MAX as i64) as i8,
            },
        })
    }
}

fn scalar(n: i64, line: usize) -> Result<u8> {
    if (0..=100).contains(&n) {
        Ok(n as u8)
    } else {
        Err(AssemblerError::InvalidOperand {
            line,
            source: ChromaError::InvalidScalar {
                scalar: n.clamp(0, u8::MAX as i64) as u8,
            },
        })
    }
}

fn scalar16(n: i64, line: usize) -> Result<u8> {
    if (0..16).contains(&n) {
        Ok(n as u8)
    } else {
        Err(AssemblerError::InvalidOperand {
            line,
            source: ChromaError::InvalidRegister {
                reg: n.clamp(0, u8::MAX as i64) as u8,
            },
        })
    }
}
