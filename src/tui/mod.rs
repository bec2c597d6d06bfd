//! TUI debugger for the handheld emulator.
//!
//! Provides an interactive terminal-based debugger with:
//! - Live CRT view with the beam position highlighted
//! - Register and cycle counters
//! - Step/run/breakpoint controls
//! - Program listing and recent trace samples

mod app;
mod ui;

pub use app::{DebuggerApp, run_debugger};
