//! # sim6502
//!
//! A cycle-accurate instruction-set simulator for the MOS 6502 (NMOS) and the
//! WDC 65C02 (CMOS).
//!
//! Every clock cycle the real chip spends is a counted access on the
//! [`Bus`], dummy reads and writes included, so the bus sees the same
//! sequence of addresses and values the silicon would put on its pins.
//! Register and flag results, the divergent decimal-mode arithmetic and the
//! 65C02's changed timing all follow the selected [`ChipVariant`].
//!
//! ## Quick Start
//!
//! ```rust
//! use sim6502::{ChipVariant, Cpu, FlatMemory};
//!
//! let mut memory = FlatMemory::new();
//! memory.set_reset_vector(0x8000);
//! // SED; SEC; LDA #$12; SBC #$21
//! memory.load(0x8000, &[0xF8, 0x38, 0xA9, 0x12, 0xE9, 0x21]);
//!
//! let mut cpu = Cpu::new(ChipVariant::Cmos65C02, memory);
//! for _ in 0..4 {
//!     cpu.step().unwrap();
//! }
//!
//! assert_eq!(cpu.a(), 0x91);
//! assert!(!cpu.flag_c());
//! // 2 + 2 + 2 + 3 (the 65C02 spends an extra cycle in decimal mode)
//! assert_eq!(cpu.cycles(), 9);
//! ```
//!
//! ## Architecture
//!
//! - **Table-driven dispatch**: each opcode byte maps to an
//!   [`OpcodeDefinition`] holding a decoder (the addressing mode's bus
//!   cycles) and an execute routine (the instruction's own cycles)
//! - **Variant quirks resolved at table build**: no runtime branching on the
//!   chip in the dispatch loop
//! - **Bus-counted timing**: [`Bus::begin_transaction`] and
//!   [`Bus::end_transaction`] measure each instruction
//!
//! ## Modules
//!
//! - `cpu` - execution engine, run loop and interrupts
//! - `registers` - register file and status flags
//! - `memory` - the `Bus` trait and `FlatMemory`
//! - `opcodes` - per-variant opcode tables
//! - `addressing` - addressing mode enumeration
//! - `variant` - chip selection
//! - `debug` - bus logging and instruction tracing
//! - `disassembler` - machine code to assembly text
//! - `pacing` - optional wall-clock throttling
//! - `conformance` - single-step test vector runner (feature `conformance`)
//! - `wasm` - JavaScript bindings (feature `wasm`)

pub mod addressing;
pub mod cpu;
pub mod debug;
pub mod disassembler;
pub mod memory;
pub mod opcodes;
pub mod pacing;
pub mod registers;
pub mod variant;

#[cfg(feature = "conformance")]
pub mod conformance;

#[cfg(feature = "wasm")]
pub mod wasm;

// Internal decode and execute routines (not part of public API)
mod decoder;
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::{Cpu, PostExecuteHook, PreExecuteHook, RunOptions, RunSummary, StopReason};
pub use instructions::control::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
pub use memory::{Bus, FlatMemory};
pub use opcodes::{opcode_table, Access, OpcodeDefinition, OpcodeTable};
pub use registers::Registers;
pub use variant::{ChipVariant, ParseVariantError};

/// Errors that stop instruction execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// An NMOS opcode outside the documented instruction set.
    IllegalOpcode { pc: u16, opcode: u8 },

    /// A 65C02 instruction the simulator does not model (WAI, STP).
    UnsupportedInstruction {
        pc: u16,
        opcode: u8,
        mnemonic: &'static str,
    },
}

impl ExecutionError {
    /// Address of the opcode that failed.
    pub fn pc(&self) -> u16 {
        match self {
            ExecutionError::IllegalOpcode { pc, .. } | ExecutionError::UnsupportedInstruction { pc, .. } => *pc,
        }
    }

    pub fn opcode(&self) -> u8 {
        match self {
            ExecutionError::IllegalOpcode { opcode, .. }
            | ExecutionError::UnsupportedInstruction { opcode, .. } => *opcode,
        }
    }
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::IllegalOpcode { pc, opcode } => {
                write!(f, "Illegal opcode 0x{:02X} at ${:04X}", opcode, pc)
            }
            ExecutionError::UnsupportedInstruction { pc, opcode, mnemonic } => {
                write!(
                    f,
                    "Unsupported instruction {} (0x{:02X}) at ${:04X}",
                    mnemonic, opcode, pc
                )
            }
        }
    }
}

impl std::error::Error for ExecutionError {}
