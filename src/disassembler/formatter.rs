//! Formatting functions for disassembled instructions

use crate::addressing::AddressingMode;
use crate::disassembler::{Instruction, DATA_BYTE};

/// Formats an instruction as assembly text, e.g. `LDA ($40),Y`.
pub fn format_instruction(instr: &Instruction) -> String {
    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

/// Branch target of a displacement byte, relative to the end of an
/// instruction of `size` bytes at `address`.
fn branch_target(address: u16, size: u8, offset: u8) -> u16 {
    address
        .wrapping_add(size as u16)
        .wrapping_add(offset as i8 as i16 as u16)
}

/// Formats the operand field alone. Missing operand bytes print as `??`.
pub fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    if instr.mnemonic == DATA_BYTE {
        return format!("${:02X}", instr.opcode);
    }

    let byte = |i: usize| instr.operand_bytes.get(i).copied();
    let zp = byte(0).map_or_else(|| "??".to_string(), |b| format!("{:02X}", b));
    let word = match (byte(0), byte(1)) {
        (Some(lo), Some(hi)) => format!("{:04X}", u16::from_le_bytes([lo, hi])),
        _ => "????".to_string(),
    };

    match instr.addressing_mode {
        Implicit | Stack => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${}", zp),
        ZeroPage => format!("${}", zp),
        ZeroPageX => format!("${},X", zp),
        ZeroPageY => format!("${},Y", zp),
        IndirectX => format!("(${},X)", zp),
        IndirectY => format!("(${}),Y", zp),
        ZeroPageIndirect => format!("(${})", zp),
        Absolute => format!("${}", word),
        AbsoluteX => format!("${},X", word),
        AbsoluteY => format!("${},Y", word),
        Indirect => format!("(${})", word),
        AbsoluteIndexedIndirect => format!("(${},X)", word),
        Relative => match byte(0) {
            Some(offset) => format!("${:04X}", branch_target(instr.address, 2, offset)),
            None => "$????".to_string(),
        },
        ZeroPageRelative => match byte(1) {
            Some(offset) => format!("${},${:04X}", zp, branch_target(instr.address, 3, offset)),
            None => format!("${},$????", zp),
        },
    }
}
