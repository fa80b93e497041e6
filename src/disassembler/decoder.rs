//! Instruction decoder for the disassembler

use crate::disassembler::Instruction;
use crate::opcodes::{OpcodeDefinition, OpcodeTable};

/// Builds the record for `def` from the bytes following its opcode.
///
/// `bytes` must hold at least `def.size_bytes` bytes, opcode included.
pub(crate) fn from_definition(def: &OpcodeDefinition, bytes: &[u8], address: u16) -> Instruction {
    Instruction {
        address,
        opcode: def.opcode,
        mnemonic: def.mnemonic,
        addressing_mode: def.addressing_mode,
        operand_bytes: bytes[1..def.size_bytes as usize].to_vec(),
        size_bytes: def.size_bytes,
        base_cycles: def.base_cycles,
    }
}

/// Decodes the instruction at the start of `bytes`.
///
/// Returns `None` for an NMOS illegal opcode, or when the slice ends before
/// the instruction's operand bytes do.
pub fn decode_instruction(table: &OpcodeTable, bytes: &[u8], address: u16) -> Option<Instruction> {
    let def = table.get(*bytes.first()?);

    if def.is_illegal() || bytes.len() < def.size_bytes as usize {
        return None;
    }

    Some(from_definition(def, bytes, address))
}
