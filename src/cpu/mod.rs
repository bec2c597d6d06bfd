//! CPU emulation for the handheld.
//!
//! This module implements the handheld's signal CPU:
//! - one signed register X
//! - a 1-based cycle counter that every executed cycle advances
//! - a two-instruction set: `noop` (1 cycle) and `addx` (2 cycles)

pub mod registers;
pub mod decode;
pub mod execute;

pub use registers::Registers;
pub use decode::{Instruction, Program, DecodeError, decode_line, decode_program};
pub use execute::{Cpu, CpuState};
