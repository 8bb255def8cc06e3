//! Step function, run loop, and opcode dispatch for the TLR machine.

use std::io::Write;

use tracing::{debug, trace, warn};

use crate::context::Context;
use crate::error::Fault;
use tlr_common::{Instruction, Register};

/// How the PC moves after an instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Advance to the next instruction.
    Next,
    /// Continue at the given index. No increment.
    Jump(usize),
}

/// Where a bounded run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// The PC reached the end of the program.
    Completed,
    /// The step budget ran out before completion.
    Suspended,
}

impl<'p, W: Write> Context<'p, W> {
    /// Execute exactly one instruction.
    ///
    /// On success the PC has either advanced by one or moved to a jump
    /// target. On a fault the PC is left on the faulting instruction;
    /// register or memory writes made earlier in the same step are not
    /// rolled back.
    pub fn step(&mut self) -> Result<(), Fault> {
        let (at, instr) = self.fetch()?;
        trace!(pc = at, %instr, "step");

        match self.dispatch(at, instr)? {
            Flow::Next => self.registers[Register::Pc.index()] += 1,
            Flow::Jump(target) => self.registers[Register::Pc.index()] = target as i32,
        }
        Ok(())
    }

    /// Run until the PC reaches the end of the program or a step faults.
    ///
    /// There is no step limit: a program that never reaches its end runs
    /// forever. Use [`Context::run_for`] to bound execution.
    pub fn run(&mut self) -> Result<(), Fault> {
        self.run_until(None).map(|_| ())
    }

    /// Run for at most `max_steps` steps.
    pub fn run_for(&mut self, max_steps: u64) -> Result<RunState, Fault> {
        self.run_until(Some(max_steps))
    }

    fn run_until(&mut self, limit: Option<u64>) -> Result<RunState, Fault> {
        debug!(
            program_len = self.program.len(),
            memory_size = self.memory.len(),
            pc = self.pc(),
            "run started"
        );

        let mut steps: u64 = 0;
        loop {
            // Checked before every fetch, so an empty program completes
            // without executing anything.
            if self.is_complete() {
                debug!(steps, "run completed");
                return Ok(RunState::Completed);
            }
            if limit.is_some_and(|max| steps >= max) {
                debug!(steps, pc = self.pc(), "run suspended");
                return Ok(RunState::Suspended);
            }
            if let Err(fault) = self.step() {
                warn!(%fault, steps, "run halted on fault");
                return Err(fault);
            }
            steps += 1;
        }
    }

    fn dispatch(&mut self, at: usize, instr: Instruction) -> Result<Flow, Fault> {
        match instr {
            Instruction::Nop => {}
            Instruction::Print { src } => self.exec_print(src, at)?,
            Instruction::Set { dest, imm } => self.write(dest, imm, at)?,
            Instruction::Add { src, dest } => {
                let sum = self.register(dest).wrapping_add(self.register(src));
                self.write(dest, sum, at)?;
            }
            Instruction::Sub { src, dest } => {
                let diff = self.register(src).wrapping_sub(self.register(dest));
                self.write(dest, diff, at)?;
            }
            Instruction::Load { dest, addr } => {
                let index = self.mem_index(addr, at)?;
                let value = self.memory[index];
                self.write(dest, value, at)?;
            }
            Instruction::Store { src, addr } => {
                let index = self.mem_index(addr, at)?;
                self.memory[index] = self.register(src);
            }
            Instruction::Jgt { src, dest, target } => {
                let target = self.jump_target(target, at)?;
                if self.register(src) > self.register(dest) {
                    return Ok(Flow::Jump(target));
                }
            }
            Instruction::Jeq { src, dest, target } => {
                let target = self.jump_target(target, at)?;
                if self.register(dest) == self.register(src) {
                    return Ok(Flow::Jump(target));
                }
            }
            Instruction::Ji { dest } => {
                let target = self.jump_target(self.register(dest), at)?;
                return Ok(Flow::Jump(target));
            }
        }
        Ok(Flow::Next)
    }

    fn exec_print(&mut self, src: Register, at: usize) -> Result<(), Fault> {
        let value = self.register(src);
        writeln!(self.output, "{value}").map_err(|e| Fault::Output {
            at,
            kind: e.kind(),
        })
    }
}
