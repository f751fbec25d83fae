//! Instruction execution
//!
//! One function, one exhaustive match. Each arm advances the program
//! counter unless the instruction redirected it. Arithmetic wraps on i64;
//! division and modulo by zero fault.

use chroma_spec::{Instruction, Op, Pos, Program, Reg};
use tracing::debug;

use crate::error::VmError;
use crate::io::IoHandler;
use crate::memory::Memory;
use crate::state::VmState;
use crate::world::WorldState;

/// Resolve a control-flow target to a linear instruction index.
fn resolve(program: &Program, target: Pos, pos: Pos) -> Result<usize, VmError> {
    program
        .index_of(target)
        .ok_or(VmError::JumpOutOfBounds { target, pos })
}

/// Execute a single instruction against the machine state.
pub fn execute(
    inst: &Instruction,
    program: &Program,
    state: &mut VmState,
    memory: &mut Memory,
    io: &mut IoHandler,
    world: Option<&mut WorldState>,
) -> Result<(), VmError> {
    let pos = inst.pos;

    match inst.op {
        Op::Nop => {
            state.pc += 1;
        }

        // ========== Data ==========
        Op::Lit { imm } => {
            let r0 = state.read_reg(Reg::R0);
            let r1 = state.read_reg(Reg::R1);
            state.write_reg(Reg::R2, r1);
            state.write_reg(Reg::R1, r0);
            state.write_reg(Reg::R0, imm as i64);
            state.pc += 1;
        }

        // ========== Arithmetic ==========
        Op::Add { ra, rb } => {
            let result = state.read_reg(ra).wrapping_add(state.read_reg(rb));
            state.write_reg(Reg::R0, result);
            state.pc += 1;
        }

        Op::Sub { ra, rb } => {
            let result = state.read_reg(ra).wrapping_sub(state.read_reg(rb));
            state.write_reg(Reg::R0, result);
            state.pc += 1;
        }

        Op::Mul { ra, rb } => {
            let result = state.read_reg(ra).wrapping_mul(state.read_reg(rb));
            state.write_reg(Reg::R0, result);
            state.pc += 1;
        }

        Op::Div { ra, rb } => {
            let divisor = state.read_reg(rb);
            if divisor == 0 {
                return Err(VmError::DivisionByZero { pos });
            }
            let result = state.read_reg(ra).wrapping_div(divisor);
            state.write_reg(Reg::R0, result);
            state.pc += 1;
        }

        Op::Mod { ra, rb } => {
            let divisor = state.read_reg(rb);
            if divisor == 0 {
                return Err(VmError::DivisionByZero { pos });
            }
            let result = state.read_reg(ra).wrapping_rem(divisor);
            state.write_reg(Reg::R0, result);
            state.pc += 1;
        }

        // ========== Memory ==========
        Op::Load { addr } => {
            let value = memory.load(addr, pos)?;
            state.write_reg(Reg::R0, value);
            state.pc += 1;
        }

        Op::Store { addr } => {
            memory.store(addr, state.read_reg(Reg::R0), pos)?;
            state.pc += 1;
        }

        Op::Copy { rd, rs } => {
            let value = state.read_reg(rs);
            state.write_reg(rd, value);
            state.pc += 1;
        }

        // ========== Control flow ==========
        Op::Jmp { target } => {
            state.pc = resolve(program, target, pos)?;
        }

        Op::Jz { target } => {
            if state.read_reg(Reg::R0) == 0 {
                state.pc = resolve(program, target, pos)?;
            } else {
                state.pc += 1;
            }
        }

        Op::Jnz { target } => {
            if state.read_reg(Reg::R0) != 0 {
                state.pc = resolve(program, target, pos)?;
            } else {
                state.pc += 1;
            }
        }

        Op::Call { target } => {
            let index = resolve(program, target, pos)?;
            state.push_call(state.pc + 1, pos)?;
            state.pc = index;
        }

        Op::Ret => {
            state.pc = state.pop_call(pos)?;
        }

        // ========== Host interop ==========
        // Without a world handle these degrade to their pure-VM
        // equivalents: SCANTILE and PATHFIND load 0, MOVEAGENT is a no-op.
        Op::ScanTile => {
            let tile = world.map(|w| w.tile_under_agent()).unwrap_or(0);
            state.write_reg(Reg::R0, tile as i64);
            state.pc += 1;
        }

        Op::MoveAgent { dx, dy } => {
            if let Some(w) = world {
                w.step_agent(dx, dy);
            }
            state.pc += 1;
        }

        Op::Pathfind { tile } => {
            let found = world.map(|w| w.step_toward(tile)).unwrap_or(false);
            state.write_reg(Reg::R0, found as i64);
            state.pc += 1;
        }

        // ========== I/O ==========
        Op::Print { src } => {
            io.write(state.read_reg(src));
            state.pc += 1;
        }

        Op::Input => {
            let value = io.read().unwrap_or(0);
            state.write_reg(Reg::R0, value);
            state.pc += 1;
        }

        Op::NetSend { port } => {
            // Transport hook only; nothing leaves the machine.
            debug!(port, "net send suppressed");
            state.pc += 1;
        }

        // ========== System ==========
        Op::Halt { code } => {
            state.halt(code);
        }

        Op::Debug { tag } => {
            debug!(tag, x = pos.x, y = pos.y, "debug breakpoint");
            state.pc += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_spec::Instruction;

    fn machine(ops: Vec<Op>) -> (Program, VmState, Memory, IoHandler) {
        let width = ops.len().max(1) as u32;
        let instructions = ops
            .into_iter()
            .enumerate()
            .map(|(i, op)| Instruction::new(op, Pos::new(i as u16, 0)))
            .collect();
        (
            Program::new(width, 1, instructions),
            VmState::new(),
            Memory::new(),
            IoHandler::new(vec![]),
        )
    }

    fn run_one(
        op: Op,
        state: &mut VmState,
        memory: &mut Memory,
        io: &mut IoHandler,
    ) -> Result<(), VmError> {
        let (program, ..) = machine(vec![op]);
        execute(&program.instructions[0], &program, state, memory, io, None)
    }

    #[test]
    fn test_lit_cascade() {
        let (_, mut state, mut memory, mut io) = machine(vec![]);
        run_one(Op::Lit { imm: 10 }, &mut state, &mut memory, &mut io).unwrap();
        run_one(Op::Lit { imm: 3 }, &mut state, &mut memory, &mut io).unwrap();
        assert_eq!(state.read_reg(Reg::R0), 3);
        assert_eq!(state.read_reg(Reg::R1), 10);
    }

    #[test]
    fn test_arithmetic_into_accumulator() {
        let (_, mut state, mut memory, mut io) = machine(vec![]);
        state.write_reg(Reg::R1, 10);
        state.write_reg(Reg::R0, 3);
        run_one(
            Op::Add {
                ra: Reg::R1,
                rb: Reg::R0,
            },
            &mut state,
            &mut memory,
            &mut io,
        )
        .unwrap();
        assert_eq!(state.read_reg(Reg::R0), 13);
    }

    #[test]
    fn test_division_by_zero_faults() {
        let (_, mut state, mut memory, mut io) = machine(vec![]);
        state.write_reg(Reg::R1, 10);
        let err = run_one(
            Op::Div {
                ra: Reg::R1,
                rb: Reg::R0,
            },
            &mut state,
            &mut memory,
            &mut io,
        )
        .unwrap_err();
        assert_eq!(
            err,
            VmError::DivisionByZero {
                pos: Pos::new(0, 0)
            }
        );
    }

    #[test]
    fn test_memory_round_trip() {
        let (_, mut state, mut memory, mut io) = machine(vec![]);
        state.write_reg(Reg::R0, 77);
        run_one(Op::Store { addr: 40 }, &mut state, &mut memory, &mut io).unwrap();
        state.write_reg(Reg::R0, 0);
        run_one(Op::Load { addr: 40 }, &mut state, &mut memory, &mut io).unwrap();
        assert_eq!(state.read_reg(Reg::R0), 77);
    }

    #[test]
    fn test_jz_taken_and_not_taken() {
        let (program, mut state, mut memory, mut io) = machine(vec![
            Op::Jz {
                target: Pos::new(2, 0),
            },
            Op::Nop,
            Op::Halt { code: 0 },
        ]);

        // r0 == 0: taken
        execute(
            &program.instructions[0],
            &program,
            &mut state,
            &mut memory,
            &mut io,
            None,
        )
        .unwrap();
        assert_eq!(state.pc, 2);

        // r0 != 0: fall through
        let mut state = VmState::new();
        state.write_reg(Reg::R0, 5);
        execute(
            &program.instructions[0],
            &program,
            &mut state,
            &mut memory,
            &mut io,
            None,
        )
        .unwrap();
        assert_eq!(state.pc, 1);
    }

    #[test]
    fn test_call_and_ret() {
        let (program, mut state, mut memory, mut io) = machine(vec![
            Op::Call {
                target: Pos::new(2, 0),
            },
            Op::Halt { code: 0 },
            Op::Ret,
        ]);

        execute(
            &program.instructions[0],
            &program,
            &mut state,
            &mut memory,
            &mut io,
            None,
        )
        .unwrap();
        assert_eq!(state.pc, 2);
        assert_eq!(state.call_stack, vec![1]);

        execute(
            &program.instructions[2],
            &program,
            &mut state,
            &mut memory,
            &mut io,
            None,
        )
        .unwrap();
        assert_eq!(state.pc, 1);
        assert!(state.call_stack.is_empty());
    }

    #[test]
    fn test_ret_underflow_faults() {
        let (_, mut state, mut memory, mut io) = machine(vec![]);
        let err = run_one(Op::Ret, &mut state, &mut memory, &mut io).unwrap_err();
        assert_eq!(
            err,
            VmError::CallStackUnderflow {
                pos: Pos::new(0, 0)
            }
        );
    }

    #[test]
    fn test_host_ops_degrade_without_world() {
        let (_, mut state, mut memory, mut io) = machine(vec![]);
        state.write_reg(Reg::R0, 42);
        run_one(Op::ScanTile, &mut state, &mut memory, &mut io).unwrap();
        assert_eq!(state.read_reg(Reg::R0), 0);

        run_one(Op::MoveAgent { dx: 1, dy: 0 }, &mut state, &mut memory, &mut io).unwrap();
        run_one(Op::Pathfind { tile: 3 }, &mut state, &mut memory, &mut io).unwrap();
        assert_eq!(state.read_reg(Reg::R0), 0);
    }

    #[test]
    fn test_host_ops_with_world() {
        let (program, ..) = machine(vec![Op::ScanTile]);
        let mut state = VmState::new();
        let mut memory = Memory::new();
        let mut io = IoHandler::new(vec![]);
        let mut world = WorldState::new(3, 3);
        world.set_tile(0, 0, 9);

        execute(
            &program.instructions[0],
            &program,
            &mut state,
            &mut memory,
            &mut io,
            Some(&mut world),
        )
        .unwrap();
        assert_eq!(state.read_reg(Reg::R0), 9);
    }

    #[test]
    fn test_io_ops() {
        let (_, mut state, mut memory, _) = machine(vec![]);
        let mut io = IoHandler::new(vec![123]);

        run_one(Op::Input, &mut state, &mut memory, &mut io).unwrap();
        assert_eq!(state.read_reg(Reg::R0), 123);

        run_one(Op::Print { src: Reg::R0 }, &mut state, &mut memory, &mut io).unwrap();
        assert_eq!(io.outputs(), &[123]);

        // Exhausted input degrades to zero
        run_one(Op::Input, &mut state, &mut memory, &mut io).unwrap();
        assert_eq!(state.read_reg(Reg::R0), 0);
    }
}
