//! CPU execution engine for the handheld.
//!
//! Executes decoded instructions with exact per-cycle timing. Every cycle
//! records a [`TraceSample`] and notifies the attached device (if any) with
//! the value X holds during that cycle.

use crate::cpu::Registers;
use crate::cpu::decode::{Instruction, Program};
use crate::crt::{NullDevice, RasterDevice};
use crate::trace::TraceSample;
use serde::{Serialize, Deserialize};

/// CPU execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CpuState {
    /// Instructions remain to be executed.
    Running,
    /// The program counter ran past the last instruction.
    Halted,
}

/// The handheld CPU.
///
/// The CPU never owns a device. A device is lent to each `*_on` call, so
/// the caller can inspect it between calls; the plain `step`/`run` methods
/// execute with no device attached.
#[derive(Clone, Serialize, Deserialize)]
pub struct Cpu {
    /// CPU registers.
    pub regs: Registers,
    /// Current execution state.
    pub state: CpuState,
    /// One sample per executed cycle; `trace[i].cycle == i + 1`.
    trace: Vec<TraceSample>,
    /// Last executed instruction (for debugging).
    last_instr: Option<Instruction>,
}

impl Cpu {
    /// Create a CPU in its power-on state.
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            state: CpuState::Running,
            trace: Vec::new(),
            last_instr: None,
        }
    }

    /// Reset the CPU to its power-on state, discarding the trace.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.state = CpuState::Running;
        self.trace.clear();
        self.last_instr = None;
    }

    /// Execute one whole instruction with no device attached.
    ///
    /// Returns the executed instruction, or `None` once the program is
    /// exhausted.
    pub fn step(&mut self, program: &Program) -> Option<Instruction> {
        self.step_on(program, &mut NullDevice)
    }

    /// Run until the program is exhausted, with no device attached.
    ///
    /// Returns the number of instructions executed.
    pub fn run(&mut self, program: &Program) -> u64 {
        self.run_on(program, &mut NullDevice)
    }

    /// Run at most `max_instructions` instructions, with no device attached.
    pub fn run_limited(&mut self, program: &Program, max_instructions: u64) -> u64 {
        self.run_limited_on(program, max_instructions, &mut NullDevice)
    }

    /// Execute one whole instruction, notifying `device` every cycle.
    pub fn step_on<D>(&mut self, program: &Program, device: &mut D) -> Option<Instruction>
    where
        D: RasterDevice + ?Sized,
    {
        let Some(instr) = program.get(self.regs.pc) else {
            self.halt(program);
            return None;
        };

        tracing::debug!(pc = self.regs.pc, %instr, x = self.regs.x, "execute");

        for _ in 0..instr.cycles() {
            self.tick(device);
        }

        if let Instruction::Addx(amount) = instr {
            self.regs.x += amount;
        }

        self.regs.advance_pc();
        self.last_instr = Some(instr);

        if self.regs.pc >= program.len() {
            self.halt(program);
        } else {
            self.state = CpuState::Running;
        }

        Some(instr)
    }

    /// Run until the program is exhausted, notifying `device` every cycle.
    pub fn run_on<D>(&mut self, program: &Program, device: &mut D) -> u64
    where
        D: RasterDevice + ?Sized,
    {
        let mut executed = 0;

        while self.step_on(program, device).is_some() {
            executed += 1;
        }

        executed
    }

    /// Run at most `max_instructions` instructions, notifying `device`
    /// every cycle.
    ///
    /// State persists, so a later call resumes at the next instruction.
    /// Returns the number of instructions executed.
    pub fn run_limited_on<D>(&mut self, program: &Program, max_instructions: u64, device: &mut D) -> u64
    where
        D: RasterDevice + ?Sized,
    {
        let mut executed = 0;

        while executed < max_instructions && self.step_on(program, device).is_some() {
            executed += 1;
        }

        executed
    }

    /// One cycle: sample, notify, then advance the cycle counter.
    fn tick<D: RasterDevice + ?Sized>(&mut self, device: &mut D) {
        let sample = TraceSample::new(self.regs.cycle, self.regs.signal_strength());
        tracing::trace!(cycle = sample.cycle, x = self.regs.x, signal = sample.signal_strength, "cycle");
        self.trace.push(sample);

        device.draw_and_advance(self.regs.x);

        self.regs.advance_cycle();
    }

    fn halt(&mut self, program: &Program) {
        if self.state != CpuState::Halted {
            tracing::info!(
                instructions = program.len(),
                cycles = self.trace.len(),
                x = self.regs.x,
                "program finished"
            );
        }
        self.state = CpuState::Halted;
    }

    /// Current value of the X register.
    pub fn x(&self) -> i64 {
        self.regs.x
    }

    /// The cycle that will execute next (1-based).
    pub fn cycle(&self) -> u64 {
        self.regs.cycle
    }

    /// Index of the next instruction.
    pub fn pc(&self) -> usize {
        self.regs.pc
    }

    /// X × cycle for the cycle that will execute next.
    pub fn signal_strength(&self) -> i64 {
        self.regs.signal_strength()
    }

    /// Every sample recorded so far.
    pub fn trace(&self) -> &[TraceSample] {
        &self.trace
    }

    /// Get the last executed instruction.
    pub fn last_instruction(&self) -> Option<Instruction> {
        self.last_instr
    }

    /// Check if the CPU has run off the end of its program.
    pub fn is_halted(&self) -> bool {
        self.state == CpuState::Halted
    }

    /// Check if the CPU is running.
    pub fn is_running(&self) -> bool {
        self.state == CpuState::Running
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("state", &self.state)
            .field("regs", &self.regs)
            .field("trace_len", &self.trace.len())
            .finish()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn instruction() -> impl Strategy<Value = Instruction> {
        prop_oneof![
            Just(Instruction::Noop),
            (-50i64..50).prop_map(Instruction::Addx),
        ]
    }

    proptest! {
        #[test]
        fn trace_has_one_sample_per_cycle(
            instrs in prop::collection::vec(instruction(), 0..200)
        ) {
            let program = Program::new(instrs);
            let mut cpu = Cpu::new();
            cpu.run(&program);

            prop_assert_eq!(cpu.trace().len() as u64, program.total_cycles());
            for (i, sample) in cpu.trace().iter().enumerate() {
                prop_assert_eq!(sample.cycle, i as u64 + 1);
            }
            prop_assert_eq!(cpu.cycle(), program.total_cycles() + 1);
        }

        #[test]
        fn addx_cycles_use_previous_x(
            instrs in prop::collection::vec(instruction(), 1..100)
        ) {
            let program = Program::new(instrs.clone());
            let mut cpu = Cpu::new();
            let mut x = 1i64;

            for instr in &instrs {
                let before = cpu.trace().len();
                cpu.step(&program);
                for sample in &cpu.trace()[before..] {
                    prop_assert_eq!(sample.signal_strength, x * sample.cycle as i64);
                }
                if let Instruction::Addx(n) = instr {
                    x += n;
                }
                prop_assert_eq!(cpu.x(), x);
            }
        }

        #[test]
        fn split_budgets_match_one_run(
            instrs in prop::collection::vec(instruction(), 0..100),
            budgets in prop::collection::vec(0u64..8, 1..20)
        ) {
            let program = Program::new(instrs);

            let mut stepped = Cpu::new();
            for budget in budgets {
                stepped.run_limited(&program, budget);
            }
            stepped.run(&program);

            let mut whole = Cpu::new();
            whole.run(&program);

            prop_assert_eq!(stepped.trace(), whole.trace());
            prop_assert_eq!(&stepped.regs, &whole.regs);
        }
    }
}
