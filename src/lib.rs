//! # Handheld Emulator
//!
//! A cycle-accurate emulator of the handheld device's signal CPU and the
//! 40×6 CRT it drives.
//!
//! The CPU runs a tiny program of `noop` and `addx` instructions. Every
//! cycle it records its signal strength and tells the CRT where the
//! sprite is, so the screen lights up in lockstep with execution.

pub mod cpu;
pub mod crt;
pub mod trace;
pub mod program;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use cpu::{Cpu, CpuState, Registers, Instruction, Program, DecodeError, decode_program};
pub use crt::{Crt, RasterDevice, NullDevice, LoggingDevice};
pub use trace::{TraceSample, SampleWindow, ReportError, signal_strength_sum};
pub use program::{load_program, save_program, listing, ProgramError};

#[cfg(feature = "tui")]
pub use tui::run_debugger;
