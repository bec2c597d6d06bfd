//! Handheld CPU registers.
//!
//! The handheld has a single general register and two counters:
//! - X: the signed register that `addx` adds to (starts at 1)
//! - cycle: the 1-based number of the cycle currently in progress
//! - pc: index of the next instruction to execute

use serde::{Serialize, Deserialize};

/// Initial value of the X register.
pub const X_INITIAL: i64 = 1;

/// The handheld register file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers {
    /// X: the only general register.
    pub x: i64,

    /// Cycle counter, 1-based. Never decreases.
    pub cycle: u64,

    /// Program counter. Never decreases.
    pub pc: usize,
}

impl Registers {
    /// Create registers in their power-on state.
    pub fn new() -> Self {
        Self {
            x: X_INITIAL,
            cycle: 1,
            pc: 0,
        }
    }

    /// Reset all registers to power-on state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Signal strength of the cycle in progress: X × cycle.
    pub fn signal_strength(&self) -> i64 {
        self.x * self.cycle as i64
    }

    /// Move on to the next cycle.
    #[inline]
    pub fn advance_cycle(&mut self) {
        self.cycle += 1;
    }

    /// Move on to the next instruction.
    #[inline]
    pub fn advance_pc(&mut self) {
        self.pc += 1;
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
