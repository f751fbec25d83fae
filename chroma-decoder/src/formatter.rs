//! Program listing formatter
//!
//! Renders a decoded program as one mnemonic line per instruction, for
//! diagnostics and authoring round-trips.

use chroma_spec::{Instruction, Op, Program};

/// Format a single instruction as assembly text.
pub fn format_op(op: &Op) -> String {
    match op {
        Op::Nop => "nop".to_string(),
        Op::Lit { imm } => format!("lit {}", imm),
        Op::Add { ra, rb } => format!("add {}, {}", ra, rb),
        Op::Sub { ra, rb } => format!("sub {}, {}", ra, rb),
        Op::Mul { ra, rb } => format!("mul {}, {}", ra, rb),
        Op::Div { ra, rb } => format!("div {}, {}", ra, rb),
        Op::Mod { ra, rb } => format!("mod {}, {}", ra, rb),
        Op::Load { addr } => format!("load {}", addr),
        Op::Store { addr } => format!("store {}", addr),
        Op::Copy { rd, rs } => format!("copy {}, {}", rd, rs),
        Op::Jmp { target } => format!("jmp {}, {}", target.x, target.y),
        Op::Jz { target } => format!("jz {}, {}", target.x, target.y),
        Op::Jnz { target } => format!("jnz {}, {}", target.x, target.y),
        Op::Call { target } => format!("call {}, {}", target.x, target.y),
        Op::Ret => "ret".to_string(),
        Op::ScanTile => "scan".to_string(),
        Op::MoveAgent { dx, dy } => format!("move {}, {}", dx, dy),
        Op::Pathfind { tile } => format!("path {}", tile),
        Op::Print { src } => format!("print {}", src),
        Op::Input => "input".to_string(),
        Op::NetSend { port } => format!("net {}", port),
        Op::Halt { code } => format!("halt {}", code),
        Op::Debug { tag } => format!("debug {}", tag),
    }
}

/// Format one instruction with its index and source position.
pub fn format_instruction(index: usize, inst: &Instruction) -> String {
    format!(
        "{:04}  ({:>3},{:>3})  {}",
        index,
        inst.pos.x,
        inst.pos.y,
        format_op(&inst.op)
    )
}

/// Format a whole program as a listing, one instruction per line.
pub fn format_program(program: &Program) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "; chroma program, {}x{}, {} instructions\n",
        program.width,
        program.height,
        program.instructions.len()
    ));
    for (index, inst) in program.instructions.iter().enumerate() {
        out.push_str(&format_instruction(index, inst));
        out.push('\n');
    }
    out
}
