//! Program text files.
//!
//! The format is one instruction per line:
//! - `noop`
//! - `addx <signed integer>`
//!
//! A final trailing newline is allowed; blank lines inside the program are
//! an error.

use crate::cpu::decode::{decode_program, DecodeError, Program};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Load and decode a program file from disk.
pub fn load_program<P: AsRef<Path>>(path: P) -> Result<Program, ProgramError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .map_err(|e| ProgramError::IoError(format!("{}: {}", path.display(), e)))?;

    let program = decode_program(&source)?;
    tracing::info!(path = %path.display(), instructions = program.len(), "loaded program");
    Ok(program)
}

/// Save a program to disk, one canonical instruction per line.
pub fn save_program<P: AsRef<Path>>(path: P, program: &Program) -> Result<(), ProgramError> {
    let path = path.as_ref();
    let io_error = |e: std::io::Error| ProgramError::IoError(format!("{}: {}", path.display(), e));

    let mut file = std::fs::File::create(path).map_err(io_error)?;

    for instr in program.iter() {
        writeln!(file, "{}", instr).map_err(io_error)?;
    }

    Ok(())
}

/// Errors that can occur while loading or saving programs.
#[derive(Debug, Clone, Error)]
pub enum ProgramError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("decode error: {0}")]
    DecodeError(#[from] DecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::Instruction;

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("handheld-{}-save.txt", std::process::id()));
        let program = Program::new(vec![Instruction::Noop, Instruction::Addx(-7)]);

        save_program(&path, &program).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "noop\naddx -7\n");

        let loaded = load_program(&path).unwrap();
        assert_eq!(loaded, program);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_program("/nonexistent/handheld/program.txt");
        assert!(matches!(result, Err(ProgramError::IoError(_))));
    }

    #[test]
    fn test_save_error_names_path() {
        let path = std::path::Path::new("/nonexistent/handheld/out.txt");
        let program = Program::new(vec![Instruction::Noop]);

        match save_program(path, &program) {
            Err(ProgramError::IoError(msg)) => {
                assert!(msg.starts_with("/nonexistent/handheld/out.txt: "), "{}", msg);
            }
            other => panic!("expected IoError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_bad_program() {
        let path = std::env::temp_dir().join(format!("handheld-{}-bad.txt", std::process::id()));
        std::fs::write(&path, "noop\nmul 5\n").unwrap();

        let result = load_program(&path);
        assert!(matches!(
            result,
            Err(ProgramError::DecodeError(DecodeError::UnknownOpcode { line: 2, .. }))
        ));

        std::fs::remove_file(&path).unwrap();
    }
}
