//! Annotated program listings.
//!
//! Each line shows the program counter, the cycles the instruction will
//! occupy when the program runs from the start, and the instruction:
//! ```text
//! 000  c1-2      addx 15
//! 009  c19       noop
//! ```

use crate::cpu::decode::{Instruction, Program};

/// Format one listing line for the instruction at `pc` whose first cycle
/// is `first_cycle`.
pub fn listing_line(pc: usize, first_cycle: u64, instr: &Instruction) -> String {
    let cycles = match instr.cycles() {
        1 => format!("c{}", first_cycle),
        n => format!("c{}-{}", first_cycle, first_cycle + n - 1),
    };
    format!("{:03}  {:<10}{}", pc, cycles, instr)
}

/// List a whole program.
pub fn listing(program: &Program) -> String {
    let mut output = String::new();
    output.push_str("; Handheld program listing\n");
    output.push_str(&format!(
        "; {} instructions, {} cycles\n\n",
        program.len(),
        program.total_cycles()
    ));

    let mut cycle = 1;
    for (pc, instr) in program.iter().enumerate() {
        output.push_str(&listing_line(pc, cycle, instr));
        output.push('\n');
        cycle += instr.cycles();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::decode::decode_program;

    #[test]
    fn test_listing_line() {
        assert_eq!(listing_line(3, 5, &Instruction::Addx(-3)), "003  c5-6      addx -3");
        assert_eq!(listing_line(0, 1, &Instruction::Noop), "000  c1        noop");
    }

    #[test]
    fn test_listing_tracks_cycles() {
        let program = decode_program("noop\naddx 3\naddx -5").unwrap();
        let text = listing(&program);
        assert!(text.contains("3 instructions, 5 cycles"));
        assert!(text.contains("001  c2-3      addx 3"));
        assert!(text.contains("002  c4-5      addx -5"));
    }
}
