//! Virtual machine
//!
//! Synchronous fetch-decode-execute over a validated program. One VM owns
//! one mutable machine state; `run` blocks until HALT, a fault, or the
//! caller's cycle budget runs out. Execution is deterministic: the same
//! program with the same inputs and world snapshot produces the same
//! trajectory.

use chroma_spec::{Program, NUM_REGISTERS};
use tracing::trace;

use crate::error::{Result, VmError};
use crate::execute::execute;
use crate::io::IoHandler;
use crate::memory::Memory;
use crate::state::{Status, VmState};
use crate::world::WorldState;

/// VM configuration
#[derive(Debug, Clone)]
pub struct VmConfig {
    /// Fetch-decode-execute iterations before the run stops with
    /// `StopReason::CycleBudget`. The budget is the caller's lever against
    /// runaway programs; exceeding it is not a fault.
    pub max_cycles: u64,

    /// Emit a trace event per executed instruction
    pub trace: bool,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            max_cycles: 1_000_000,
            trace: false,
        }
    }
}

/// Why a run stopped without faulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Explicit HALT with its exit code
    Halted { code: u8 },
    /// Cycle budget exhausted before the program terminated
    CycleBudget,
}

/// Execution result: outputs plus a snapshot of the final machine state.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Values emitted by PRINT, in order
    pub outputs: Vec<i64>,

    /// Executed instruction count
    pub cycles: u64,

    /// Why the run stopped
    pub stop: StopReason,

    /// Final register file
    pub registers: [i64; NUM_REGISTERS],

    /// Final linear memory
    pub memory: Vec<i64>,
}

/// The chroma virtual machine.
pub struct Vm<'w> {
    program: Program,
    state: VmState,
    memory: Memory,
    io: IoHandler,
    world: Option<&'w mut WorldState>,
    config: VmConfig,
}

impl<'w> Vm<'w> {
    /// Create a VM over a program with host-supplied inputs.
    pub fn new(program: Program, inputs: Vec<i64>, config: VmConfig) -> Self {
        Vm {
            program,
            state: VmState::new(),
            memory: Memory::new(),
            io: IoHandler::new(inputs),
            world: None,
            config,
        }
    }

    /// Create a VM with a shared world handle attached. The VM borrows the
    /// world for its own lifetime and touches it only from host-interop
    /// opcodes.
    pub fn with_world(
        program: Program,
        inputs: Vec<i64>,
        config: VmConfig,
        world: &'w mut WorldState,
    ) -> Self {
        let mut vm = Self::new(program, inputs, config);
        vm.world = Some(world);
        vm
    }

    /// Run to halt, fault, or budget exhaustion.
    ///
    /// On a fault the error carries the failing instruction's position and
    /// the machine state stays frozen at the fault point; `state()`,
    /// `memory()` and `outputs()` remain available for diagnostics.
    pub fn run(&mut self) -> Result<ExecutionResult> {
        self.state.status = Status::Running;

        let code = loop {
            if let Status::Halted { code } = self.state.status {
                break code;
            }

            if self.state.cycles >= self.config.max_cycles {
                return Ok(self.finish(StopReason::CycleBudget));
            }

            let Some(inst) = self.program.instructions.get(self.state.pc).copied() else {
                self.state.status = Status::Faulted;
                return Err(VmError::PcOutOfBounds { pc: self.state.pc });
            };

            if self.config.trace {
                trace!(
                    cycle = self.state.cycles,
                    pc = self.state.pc,
                    op = %inst.op.kind(),
                    "execute"
                );
            }

            if let Err(e) = execute(
                &inst,
                &self.program,
                &mut self.state,
                &mut self.memory,
                &mut self.io,
                self.world.as_deref_mut(),
            ) {
                self.state.status = Status::Faulted;
                return Err(e);
            }

            self.state.cycles += 1;
        };

        Ok(self.finish(StopReason::Halted { code }))
    }

    fn finish(&mut self, stop: StopReason) -> ExecutionResult {
        ExecutionResult {
            outputs: self.io.outputs().to_vec(),
            cycles: self.state.cycles,
            stop,
            registers: self.state.regs,
            memory: self.memory.snapshot(),
        }
    }

    /// Current machine state (for diagnostics after a fault).
    pub fn state(&self) -> &VmState {
        &self.state
    }

    /// Linear memory (for diagnostics).
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Values emitted so far.
    pub fn outputs(&self) -> &[i64] {
        self.io.outputs()
    }

    /// Lifecycle status.
    pub fn status(&self) -> Status {
        self.state.status
    }
}
