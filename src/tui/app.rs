//! Debugger application state and logic.

use crate::{Cpu, Crt, Program};
use crate::program::listing_line;
use std::collections::HashSet;

/// Debugger application state.
pub struct DebuggerApp {
    /// The CPU being debugged.
    pub cpu: Cpu,
    /// The screen the CPU draws on.
    pub crt: Crt,
    /// The program being executed.
    pub program: Program,
    /// Breakpoints (by program counter).
    pub breakpoints: HashSet<usize>,
    /// Is the debugger running continuously?
    pub running: bool,
    /// Should we quit?
    pub should_quit: bool,
    /// Status message to display.
    pub status: String,
    /// First cycle of each instruction, indexed by program counter.
    first_cycles: Vec<u64>,
}

impl DebuggerApp {
    /// Create a new debugger for a program.
    pub fn new(program: Program) -> Self {
        let mut cycle = 1;
        let first_cycles = program
            .iter()
            .map(|instr| {
                let first = cycle;
                cycle += instr.cycles();
                first
            })
            .collect();

        Self {
            cpu: Cpu::new(),
            crt: Crt::new(),
            program,
            breakpoints: HashSet::new(),
            running: false,
            should_quit: false,
            status: "Ready. Press 's' to step, 'r' to run, 'q' to quit.".into(),
            first_cycles,
        }
    }

    /// Step one instruction.
    pub fn step(&mut self) {
        let pc = self.cpu.pc();
        match self.cpu.step_on(&self.program, &mut self.crt) {
            Some(instr) => {
                self.status = format!("PC={:03}: {}  X={}", pc, instr, self.cpu.x());
            }
            None => {
                self.status = format!("Halted after {} cycles", self.cpu.trace().len());
                self.running = false;
            }
        }
    }

    /// Run until halt or breakpoint.
    pub fn run(&mut self) {
        self.running = true;
        self.status = "Running...".into();
    }

    /// Run one iteration of continuous execution.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        if self.cpu.is_halted() {
            self.running = false;
            self.status = format!("Halted after {} cycles", self.cpu.trace().len());
            return;
        }

        self.step();

        let pc = self.cpu.pc();
        if self.running && self.breakpoints.contains(&pc) {
            self.running = false;
            self.status = format!("Breakpoint at PC={:03}", pc);
        }
    }

    /// Toggle breakpoint at the current PC.
    pub fn toggle_breakpoint(&mut self) {
        let pc = self.cpu.pc();
        if self.breakpoints.remove(&pc) {
            self.status = format!("Removed breakpoint at PC={:03}", pc);
        } else {
            self.breakpoints.insert(pc);
            self.status = format!("Set breakpoint at PC={:03}", pc);
        }
    }

    /// Reset CPU and screen to their initial state.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.crt.clear();
        self.running = false;
        self.status = "Reset. Ready.".into();
    }

    /// Get the listing around the current PC.
    pub fn get_listing(&self, lines: usize) -> Vec<(usize, String, bool)> {
        let pc = self.cpu.pc();
        let start = pc.saturating_sub(lines / 2);

        (start..start + lines)
            .filter_map(|addr| {
                let instr = self.program.get(addr)?;
                let line = listing_line(addr, self.first_cycles[addr], &instr);
                Some((addr, line, addr == pc))
            })
            .collect()
    }
}

/// Run the debugger with a program.
pub fn run_debugger(program: Program) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;
    use std::time::Duration;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = DebuggerApp::new(program);

    loop {
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => app.should_quit = true,
                        KeyCode::Char('s') => {
                            app.running = false;
                            app.step();
                        }
                        KeyCode::Char('r') => app.run(),
                        KeyCode::Char('p') => {
                            app.running = false;
                            app.status = "Paused.".into();
                        }
                        KeyCode::Char('b') => app.toggle_breakpoint(),
                        KeyCode::Char('x') => app.reset(),
                        _ => {}
                    }
                }
            }
        }

        if app.running {
            app.tick();
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode_program;

    fn app() -> DebuggerApp {
        DebuggerApp::new(decode_program(include_str!("../../programs/example.txt")).unwrap())
    }

    #[test]
    fn test_step_draws_on_crt() {
        let mut app = app();
        app.step();
        assert_eq!(app.crt.position(), (2, 0));
        assert_eq!(app.cpu.pc(), 1);
        assert!(app.status.contains("addx 15"));
    }

    #[test]
    fn test_breakpoint_stops_run() {
        let mut app = app();
        app.breakpoints.insert(3);
        app.run();
        while app.running {
            app.tick();
        }
        assert_eq!(app.cpu.pc(), 3);
        assert!(app.status.contains("Breakpoint"));
    }

    #[test]
    fn test_run_to_halt_and_reset() {
        let mut app = app();
        app.run();
        while app.running {
            app.tick();
        }
        assert!(app.cpu.is_halted());
        assert_eq!(app.crt.row(0), "##..##..##..##..##..##..##..##..##..##..");

        app.reset();
        assert_eq!(app.cpu.pc(), 0);
        assert_eq!(app.crt.lit_count(), 0);
    }

    #[test]
    fn test_listing_window() {
        let app = app();
        let listing = app.get_listing(5);
        assert_eq!(listing.len(), 5);
        assert!(listing[0].2);
        assert!(listing[0].1.starts_with("000  c1-2"));
    }
}
