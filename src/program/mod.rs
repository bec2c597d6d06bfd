//! Program files and listings.
//!
//! This module provides:
//! - Loading and saving program text files
//! - An annotated listing (program counter, cycles, instruction)

pub mod source;
pub mod listing;

pub use source::{load_program, save_program, ProgramError};
pub use listing::{listing, listing_line};
