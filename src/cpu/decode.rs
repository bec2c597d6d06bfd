//! Instruction decoder for the handheld CPU.
//!
//! Programs are plain text, one instruction per line:
//! ```text
//! noop
//! addx 3
//! addx -5
//! ```

use serde::{Serialize, Deserialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Decoded handheld instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// Do nothing for one cycle.
    Noop,

    /// After two cycles, X := X + amount.
    Addx(i64),
}

impl Instruction {
    /// Number of cycles the instruction occupies.
    pub const fn cycles(&self) -> u64 {
        match self {
            Instruction::Noop => 1,
            Instruction::Addx(_) => 2,
        }
    }

    /// The opcode as it appears in program text.
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Noop => "noop",
            Instruction::Addx(_) => "addx",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Noop => write!(f, "noop"),
            Instruction::Addx(amount) => write!(f, "addx {}", amount),
        }
    }
}

impl FromStr for Instruction {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_line(s, 1)
    }
}

/// A decoded program: an immutable, ordered list of instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Wrap an already decoded instruction list.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction at a program counter, if any.
    pub fn get(&self, pc: usize) -> Option<Instruction> {
        self.instructions.get(pc).copied()
    }

    /// Iterate over the instructions in order.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }

    /// All instructions as a slice.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Cycles needed to run the whole program.
    pub fn total_cycles(&self) -> u64 {
        self.instructions.iter().map(Instruction::cycles).sum()
    }
}

impl FromStr for Program {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_program(s)
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions)
    }
}

/// Decode one line of program text.
///
/// `line_num` is 1-based and only used for error reporting.
pub fn decode_line(line: &str, line_num: usize) -> Result<Instruction, DecodeError> {
    let mut tokens = line.split_whitespace();

    let opcode = tokens.next().ok_or(DecodeError::EmptyLine { line: line_num })?;
    let operand = tokens.next();

    if let Some(extra) = tokens.next() {
        return Err(DecodeError::UnexpectedOperand {
            line: line_num,
            operand: extra.to_string(),
        });
    }

    match opcode {
        "noop" => match operand {
            None => Ok(Instruction::Noop),
            Some(op) => Err(DecodeError::UnexpectedOperand {
                line: line_num,
                operand: op.to_string(),
            }),
        },
        "addx" => {
            let op = operand.ok_or_else(|| DecodeError::MissingOperand {
                line: line_num,
                opcode: opcode.to_string(),
            })?;
            let amount = op.parse::<i64>().map_err(|source| DecodeError::InvalidOperand {
                line: line_num,
                operand: op.to_string(),
                source,
            })?;
            Ok(Instruction::Addx(amount))
        }
        _ => Err(DecodeError::UnknownOpcode {
            line: line_num,
            opcode: opcode.to_string(),
        }),
    }
}

/// Decode a whole program.
///
/// Fails on the first bad line; no partial program is returned.
pub fn decode_program(source: &str) -> Result<Program, DecodeError> {
    let instructions = source
        .lines()
        .enumerate()
        .map(|(idx, line)| decode_line(line, idx + 1))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(instructions = instructions.len(), "decoded program");
    Ok(Program::new(instructions))
}

/// Errors that can occur during instruction decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("line {line}: unrecognized instruction `{opcode}`")]
    UnknownOpcode { line: usize, opcode: String },

    #[error("line {line}: `{opcode}` requires an operand")]
    MissingOperand { line: usize, opcode: String },

    #[error("line {line}: invalid operand `{operand}`: {source}")]
    InvalidOperand {
        line: usize,
        operand: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: unexpected operand `{operand}`")]
    UnexpectedOperand { line: usize, operand: String },

    #[error("line {line}: empty line")]
    EmptyLine { line: usize },
}

impl DecodeError {
    /// The 1-based line the error was found on.
    pub fn line(&self) -> usize {
        match self {
            DecodeError::UnknownOpcode { line, .. }
            | DecodeError::MissingOperand { line, .. }
            | DecodeError::InvalidOperand { line, .. }
            | DecodeError::UnexpectedOperand { line, .. }
            | DecodeError::EmptyLine { line } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_noop() {
        assert_eq!(decode_line("noop", 1).unwrap(), Instruction::Noop);
        assert_eq!(decode_line("  noop  ", 1).unwrap(), Instruction::Noop);
    }

    #[test]
    fn test_decode_addx() {
        assert_eq!(decode_line("addx 15", 1).unwrap(), Instruction::Addx(15));
        assert_eq!(decode_line("addx -35", 1).unwrap(), Instruction::Addx(-35));
        assert_eq!(decode_line("addx +2", 1).unwrap(), Instruction::Addx(2));
    }

    #[test]
    fn test_unknown_opcode() {
        let err = decode_line("mul 5", 7).unwrap_err();
        assert_eq!(err, DecodeError::UnknownOpcode { line: 7, opcode: "mul".into() });
        assert_eq!(err.line(), 7);
    }

    #[test]
    fn test_operand_errors() {
        assert!(matches!(
            decode_line("addx", 2),
            Err(DecodeError::MissingOperand { line: 2, .. })
        ));
        assert!(matches!(
            decode_line("addx five", 3),
            Err(DecodeError::InvalidOperand { line: 3, .. })
        ));
        assert!(matches!(
            decode_line("noop 1", 4),
            Err(DecodeError::UnexpectedOperand { line: 4, .. })
        ));
        assert!(matches!(
            decode_line("addx 1 2", 5),
            Err(DecodeError::UnexpectedOperand { line: 5, .. })
        ));
        assert_eq!(decode_line("   ", 6), Err(DecodeError::EmptyLine { line: 6 }));
    }

    #[test]
    fn test_decode_program() {
        let program = decode_program("noop\naddx 3\naddx -5\n").unwrap();
        assert_eq!(
            program.instructions(),
            &[Instruction::Noop, Instruction::Addx(3), Instruction::Addx(-5)]
        );
        assert_eq!(program.total_cycles(), 5);
    }

    #[test]
    fn test_decode_program_is_atomic() {
        let err = decode_program("noop\naddx 3\nmul 5\nnoop").unwrap_err();
        assert_eq!(err.line(), 3);

        let parsed: Result<Program, _> = "noop\nmul 5".parse();
        assert!(parsed.is_err());
    }

    #[test]
    fn test_decode_example_program() {
        let program = decode_program(include_str!("../../programs/example.txt")).unwrap();
        assert_eq!(program.len(), 146);
        assert_eq!(program.get(0), Some(Instruction::Addx(15)));
        assert_eq!(program.get(143), Some(Instruction::Noop));
    }

    #[test]
    fn test_decode_is_deterministic() {
        let source = include_str!("../../programs/example.txt");
        assert_eq!(decode_program(source).unwrap(), decode_program(source).unwrap());
    }

    #[test]
    fn test_display_roundtrip() {
        for instr in [Instruction::Noop, Instruction::Addx(0), Instruction::Addx(-21)] {
            let text = instr.to_string();
            assert_eq!(text.parse::<Instruction>().unwrap(), instr);
        }
    }
}
