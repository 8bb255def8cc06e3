//! Execution state: register file, memory, bound program, output sink.

use std::io::{self, Write};

use crate::error::{AllocError, Fault};
use tlr_common::register::REGISTER_COUNT;
use tlr_common::{DecodeError, Instruction, Program, Register};

/// The complete mutable state of one execution.
///
/// A context borrows its program and owns everything else. Memory is
/// released when the context is dropped; the program is never touched.
pub struct Context<'p, W = io::Stdout> {
    /// The program being executed.
    pub(crate) program: &'p Program,
    /// Register file, PC included.
    pub(crate) registers: [i32; REGISTER_COUNT],
    /// Flat integer memory. Empty when created with size 0.
    pub(crate) memory: Vec<i32>,
    /// Where PRINT writes.
    pub(crate) output: W,
}

impl<'p> Context<'p, io::Stdout> {
    /// Create a context over `program` with `memory_size` zeroed words,
    /// printing to standard output.
    pub fn new(program: &'p Program, memory_size: usize) -> Self {
        Self::with_output(program, memory_size, io::stdout())
    }

    /// Like [`Context::new`], but reports a failed memory allocation
    /// instead of aborting.
    pub fn try_new(program: &'p Program, memory_size: usize) -> Result<Self, AllocError> {
        Self::try_with_output(program, memory_size, io::stdout())
    }
}

impl<'p, W: Write> Context<'p, W> {
    /// Create a context that prints to `output`.
    pub fn with_output(program: &'p Program, memory_size: usize, output: W) -> Self {
        Self {
            program,
            registers: [0; REGISTER_COUNT],
            memory: vec![0; memory_size],
            output,
        }
    }

    /// Create a context that prints to `output`, failing with
    /// [`AllocError`] when `memory_size` words cannot be allocated.
    pub fn try_with_output(
        program: &'p Program,
        memory_size: usize,
        output: W,
    ) -> Result<Self, AllocError> {
        let mut memory = Vec::new();
        memory
            .try_reserve_exact(memory_size)
            .map_err(|_| AllocError { size: memory_size })?;
        memory.resize(memory_size, 0);

        Ok(Self {
            program,
            registers: [0; REGISTER_COUNT],
            memory,
            output,
        })
    }

    /// Consume the context, releasing its memory, and return the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// The output sink.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// The program this context executes.
    pub fn program(&self) -> &'p Program {
        self.program
    }

    /// Index of the next instruction to execute.
    pub fn pc(&self) -> usize {
        // Every write to the PC is range-checked, so it is never negative.
        self.registers[Register::Pc.index()] as usize
    }

    /// Current value of `reg`.
    pub fn register(&self, reg: Register) -> i32 {
        self.registers[reg.index()]
    }

    /// The whole register file, in `Register::index` order.
    pub fn registers(&self) -> &[i32; REGISTER_COUNT] {
        &self.registers
    }

    /// The memory block.
    pub fn memory(&self) -> &[i32] {
        &self.memory
    }

    /// True once the PC has reached the end of the program.
    pub fn is_complete(&self) -> bool {
        self.pc() == self.program.len()
    }

    /// Write `value` to `reg`.
    ///
    /// A write to the PC is followed by the usual increment, so the value
    /// plus one must land in `[0, program size]`. The check happens before
    /// the write.
    pub(crate) fn write(&mut self, reg: Register, value: i32, at: usize) -> Result<(), Fault> {
        if reg == Register::Pc {
            let next = i64::from(value) + 1;
            if next < 0 || next > self.program.len() as i64 {
                return Err(Fault::PcOutOfRange { at, pc: next });
            }
        }
        self.registers[reg.index()] = value;
        Ok(())
    }

    /// Validate a memory offset.
    pub(crate) fn mem_index(&self, addr: i32, at: usize) -> Result<usize, Fault> {
        usize::try_from(addr)
            .ok()
            .filter(|&i| i < self.memory.len())
            .ok_or(Fault::MemoryOutOfRange {
                at,
                addr,
                size: self.memory.len(),
            })
    }

    /// Validate a jump target.
    pub(crate) fn jump_target(&self, target: i32, at: usize) -> Result<usize, Fault> {
        usize::try_from(target)
            .ok()
            .filter(|&i| i < self.program.len())
            .ok_or(Fault::JumpOutOfRange {
                at,
                target,
                size: self.program.len(),
            })
    }

    /// Fetch and decode the instruction at the current PC.
    ///
    /// The PC is bounds-checked before indexing the program.
    pub(crate) fn fetch(&self) -> Result<(usize, Instruction), Fault> {
        let pc = self.registers[Register::Pc.index()];
        let (at, raw) = usize::try_from(pc)
            .ok()
            .and_then(|i| self.program.raw(i).map(|&raw| (i, raw)))
            .ok_or(Fault::PcOutOfRange {
                at: pc.max(0) as usize,
                pc: i64::from(pc),
            })?;

        let instr = Instruction::decode(raw).map_err(|e| match e {
            DecodeError::InvalidRegister(register) => Fault::InvalidRegister { at, register },
            _ => Fault::InvalidOpcode {
                at,
                opcode: raw.opcode,
            },
        })?;
        Ok((at, instr))
    }
}
