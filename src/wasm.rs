//! WebAssembly bindings for the handheld emulator.
//!
//! This module provides JavaScript-friendly wrappers around the core emulator.

use wasm_bindgen::prelude::*;
use crate::{Cpu, Crt, Program, decode_program};
use crate::trace::signal_strength_sum;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly machine: a CPU wired to a CRT.
#[wasm_bindgen]
pub struct WasmMachine {
    cpu: Cpu,
    crt: Crt,
    program: Program,
}

#[wasm_bindgen]
impl WasmMachine {
    /// Create a new machine with an empty program.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            crt: Crt::new(),
            program: Program::default(),
        }
    }

    /// Load a program from source text. Returns the instruction count.
    #[wasm_bindgen]
    pub fn load(&mut self, source: &str) -> Result<usize, JsError> {
        let program = decode_program(source)
            .map_err(|e| JsError::new(&e.to_string()))?;

        let len = program.len();
        self.program = program;
        self.reset();

        Ok(len)
    }

    /// Step one instruction. Returns its text, or an error once halted.
    #[wasm_bindgen]
    pub fn step(&mut self) -> Result<String, JsError> {
        self.cpu
            .step_on(&self.program, &mut self.crt)
            .map(|instr| instr.to_string())
            .ok_or_else(|| JsError::new("program finished"))
    }

    /// Run at most `budget` instructions (0 runs to completion).
    /// Returns the number executed.
    #[wasm_bindgen]
    pub fn run(&mut self, budget: u32) -> u32 {
        let executed = if budget == 0 {
            self.cpu.run_on(&self.program, &mut self.crt)
        } else {
            self.cpu.run_limited_on(&self.program, u64::from(budget), &mut self.crt)
        };
        executed as u32
    }

    /// Reset CPU and screen, keeping the loaded program.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.crt.clear();
    }

    /// Check if the program has finished.
    #[wasm_bindgen]
    pub fn is_halted(&self) -> bool {
        self.cpu.is_halted()
    }

    /// Get the X register.
    #[wasm_bindgen]
    pub fn x(&self) -> i64 {
        self.cpu.x()
    }

    /// Get the cycle that will execute next.
    #[wasm_bindgen]
    pub fn cycle(&self) -> u64 {
        self.cpu.cycle()
    }

    /// Get the program counter.
    #[wasm_bindgen]
    pub fn pc(&self) -> usize {
        self.cpu.pc()
    }

    /// Get the rendered screen.
    #[wasm_bindgen]
    pub fn screen(&self) -> String {
        self.crt.render()
    }

    /// Screen rows, top to bottom, as an array of strings.
    #[wasm_bindgen]
    pub fn rows(&self) -> js_sys::Array {
        self.crt.lines().iter().map(|row| JsValue::from_str(row)).collect()
    }

    /// Signal strength of every executed cycle, indexed from cycle 1.
    #[wasm_bindgen]
    pub fn trace(&self) -> js_sys::Array {
        self.cpu
            .trace()
            .iter()
            .map(|sample| JsValue::from(sample.signal_strength))
            .collect()
    }

    /// Sum of the sampled signal strengths.
    #[wasm_bindgen]
    pub fn signal_sum(&self) -> Result<i64, JsError> {
        signal_strength_sum(self.cpu.trace())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// CPU state (registers, state flag, trace) as JSON.
    #[wasm_bindgen]
    pub fn state_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.cpu)
            .map_err(|e| JsError::new(&e.to_string()))
    }
}

impl Default for WasmMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode source text and return the instruction count.
#[wasm_bindgen]
pub fn wasm_decode(source: &str) -> Result<usize, JsError> {
    let program = decode_program(source)
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(program.len())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_trace_array() {
        let mut machine = WasmMachine::new();
        machine.load("noop\naddx 3\naddx -5").unwrap();
        machine.run(0);

        let trace = machine.trace();
        assert_eq!(trace.length(), 5);
        assert_eq!(trace.get(3), JsValue::from(4i64 * 4));
        assert_eq!(trace.get(4), JsValue::from(5i64 * 4));
    }

    #[wasm_bindgen_test]
    fn test_rows_array() {
        let mut machine = WasmMachine::new();
        machine.load("noop\nnoop").unwrap();
        machine.run(0);

        let rows = machine.rows();
        assert_eq!(rows.length(), 6);
        assert_eq!(rows.get(0).as_string().unwrap(), format!("##{}", ".".repeat(38)));
    }
}
