//! # Disassembler
//!
//! Turns machine code back into assembly text using the same opcode tables
//! the engine executes from, so the 65C02 additions disassemble only when
//! the 65C02 table is selected.
//!
//! - [`decoder`] splits bytes into [`Instruction`] records.
//! - [`formatter`] renders them in conventional 6502 syntax.
//!
//! ```
//! use sim6502::disassembler::{disassemble, formatter::format_instruction};
//! use sim6502::ChipVariant;
//!
//! let code = [0xA9, 0x42, 0x80, 0xFE];
//! let text: Vec<String> = disassemble(ChipVariant::Cmos65C02, &code, 0x8000)
//!     .iter()
//!     .map(format_instruction)
//!     .collect();
//!
//! assert_eq!(text, ["LDA #$42", "BRA $8002"]);
//! ```

pub mod decoder;
pub mod formatter;

use crate::addressing::AddressingMode;
use crate::opcodes::opcode_table;
use crate::variant::ChipVariant;

/// Mnemonic used for bytes that do not decode to an instruction.
pub const DATA_BYTE: &str = ".byte";

/// A single disassembled instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Address of the opcode byte
    pub address: u16,

    pub opcode: u8,

    /// Instruction mnemonic, or [`DATA_BYTE`] for undecodable bytes
    pub mnemonic: &'static str,

    pub addressing_mode: AddressingMode,

    /// Operand bytes in memory order (0-2)
    pub operand_bytes: Vec<u8>,

    /// Opcode plus operand bytes
    pub size_bytes: u8,

    /// Base cycle cost (excluding page-crossing, branch and decimal penalties)
    pub base_cycles: u8,
}

impl Instruction {
    fn data_byte(address: u16, byte: u8) -> Self {
        Self {
            address,
            opcode: byte,
            mnemonic: DATA_BYTE,
            addressing_mode: AddressingMode::Implicit,
            operand_bytes: vec![byte],
            size_bytes: 1,
            base_cycles: 0,
        }
    }
}

/// Disassembles `bytes` as if loaded at `origin`.
///
/// NMOS illegal opcodes and instructions cut off by the end of the slice
/// come out as single [`DATA_BYTE`] entries.
pub fn disassemble(variant: ChipVariant, bytes: &[u8], origin: u16) -> Vec<Instruction> {
    let table = opcode_table(variant);
    let mut instructions = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let address = origin.wrapping_add(offset as u16);
        let instr = decoder::decode_instruction(table, &bytes[offset..], address)
            .unwrap_or_else(|| Instruction::data_byte(address, bytes[offset]));

        offset += instr.size_bytes as usize;
        instructions.push(instr);
    }

    instructions
}
