//! WASM API for the simulator.
//!
//! Provides JavaScript-callable interfaces for CPU control, state inspection
//! and disassembly of the instruction at an address.

use crate::disassembler::decoder::decode_instruction;
use crate::disassembler::formatter::format_instruction;
use crate::{Bus, ChipVariant, Cpu, FlatMemory, RunOptions};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<crate::ExecutionError> for JsError {
    fn from(err: crate::ExecutionError) -> Self {
        JsError::new(&err.to_string())
    }
}

/// Simulator interface for JavaScript
#[wasm_bindgen]
pub struct Simulator {
    cpu: Cpu<FlatMemory>,
    on_step: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl Simulator {
    /// Create a simulator for `"6502"`/`"nmos"` or `"65c02"`/`"cmos"`
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str) -> Result<Simulator, JsError> {
        let variant: ChipVariant = variant
            .parse()
            .map_err(|e: crate::ParseVariantError| JsError::new(&e.to_string()))?;

        Ok(Simulator {
            cpu: Cpu::new(variant, FlatMemory::new()),
            on_step: None,
        })
    }

    /// Variant name, e.g. `"65C02"`
    #[wasm_bindgen(getter)]
    pub fn variant(&self) -> String {
        self.cpu.variant().to_string()
    }

    /// Register a callback invoked with the new PC after every step
    pub fn set_step_callback(&mut self, callback: Option<js_sys::Function>) {
        self.on_step = callback;
    }

    /// Copy a program into memory and point PC at it
    pub fn load_program(&mut self, program: &[u8], start_addr: u16) {
        self.cpu.memory_mut().load(start_addr, program);
        self.cpu.set_pc(start_addr);
    }

    /// Store `target` at $FFFC/$FFFD for the next reset
    pub fn set_reset_vector(&mut self, target: u16) {
        self.cpu.memory_mut().set_reset_vector(target);
    }

    /// Reset the CPU; memory is kept
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Execute a single instruction and return its cycle count
    pub fn step(&mut self) -> Result<u32, JsError> {
        let cycles = self.cpu.step()?;
        if let Some(callback) = &self.on_step {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from(self.cpu.pc()));
        }
        Ok(cycles)
    }

    /// Run up to `max_instructions` instructions, stopping early at BRK.
    /// Returns the number executed.
    pub fn run(&mut self, max_instructions: u32) -> Result<u32, JsError> {
        let options = RunOptions::default()
            .with_stop_on_break(true)
            .with_max_instructions(max_instructions as u64);
        let summary = self.cpu.run(&options, |_| false)?;
        Ok(summary.instructions as u32)
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    // Flag getters
    #[wasm_bindgen(getter)]
    pub fn flag_n(&self) -> bool {
        self.cpu.flag_n()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_v(&self) -> bool {
        self.cpu.flag_v()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_d(&self) -> bool {
        self.cpu.flag_d()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_i(&self) -> bool {
        self.cpu.flag_i()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_z(&self) -> bool {
        self.cpu.flag_z()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_c(&self) -> bool {
        self.cpu.flag_c()
    }

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    // Memory access methods. These never advance the cycle count.

    pub fn read_byte(&self, addr: u16) -> u8 {
        self.cpu.memory().peek(addr)
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().poke(addr, value);
    }

    /// Read a 256-byte page from memory (for efficient display)
    pub fn get_memory_page(&self, page: u8) -> Vec<u8> {
        let start = (page as usize) << 8;
        self.cpu.memory().as_slice()[start..start + 256].to_vec()
    }

    /// Disassemble the instruction at `addr` as `"MNE operand"`
    pub fn disassemble_at(&self, addr: u16) -> String {
        let memory = self.cpu.memory();
        let bytes = [
            memory.peek(addr),
            memory.peek(addr.wrapping_add(1)),
            memory.peek(addr.wrapping_add(2)),
        ];
        decode_instruction(self.cpu.opcode_table(), &bytes, addr)
            .map(|instr| format_instruction(&instr))
            .unwrap_or_default()
    }
}
