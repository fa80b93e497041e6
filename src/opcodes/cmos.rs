//! WDC 65C02 opcode table.
//!
//! Starts from the documented NMOS set and layers the 65C02 changes on top:
//!
//! - new instructions (BRA, PHX/PHY/PLX/PLY, STZ, TRB/TSB, INC A/DEC A, the
//!   extra BIT forms, `(zp)` addressing, `JMP (abs,X)`)
//! - the Rockwell bit instructions WDC adopted (RMBn, SMBn, BBRn, BBSn)
//! - WAI and STP, which the simulator refuses to run
//! - changed timing: `JMP (abs)` takes 6 cycles, and abs,X shifts only pay
//!   the fix-up cycle on a page cross (INC/DEC abs,X kept the old timing)
//! - every remaining byte is a NOP of a documented length and duration

use super::{Access, OpcodeTable, TableBuilder};
use crate::addressing::AddressingMode;
use crate::decoder;
use crate::instructions::{alu, bits, branches, control, inc_dec, load_store, shifts, stack};
use crate::variant::Cmos;

const BIT_MNEMONICS: [[&str; 8]; 4] = [
    ["RMB0", "RMB1", "RMB2", "RMB3", "RMB4", "RMB5", "RMB6", "RMB7"],
    ["SMB0", "SMB1", "SMB2", "SMB3", "SMB4", "SMB5", "SMB6", "SMB7"],
    ["BBR0", "BBR1", "BBR2", "BBR3", "BBR4", "BBR5", "BBR6", "BBR7"],
    ["BBS0", "BBS1", "BBS2", "BBS3", "BBS4", "BBS5", "BBS6", "BBS7"],
];

pub(super) fn build() -> OpcodeTable {
    use AddressingMode::*;
    use Access::*;

    let mut t = TableBuilder::<Cmos>::new();

    // Every byte the 65C02 leaves unassigned is a NOP. Register them first
    // so the real instructions below overwrite their slots.
    for opcode in 0..=255u8 {
        match opcode & 0x0F {
            0x02 => {
                t.op(opcode, "NOP", Immediate, Read, 2, control::nop_read);
            }
            0x03 | 0x0B => {
                t.custom(opcode, "NOP", Implicit, Control, 1, decoder::deferred, control::nop);
            }
            _ => {}
        }
    }
    t.op(0x44, "NOP", ZeroPage, Read, 3, control::nop_read)
        .op(0x54, "NOP", ZeroPageX, Read, 4, control::nop_read)
        .op(0xD4, "NOP", ZeroPageX, Read, 4, control::nop_read)
        .op(0xF4, "NOP", ZeroPageX, Read, 4, control::nop_read)
        .op(0xDC, "NOP", Absolute, Read, 4, control::nop_read)
        .op(0xFC, "NOP", Absolute, Read, 4, control::nop_read)
        .op(0x5C, "NOP", Absolute, Read, 8, control::nop_5c);

    t.documented();

    // Timing the 65C02 changed
    t.op(0x6C, "JMP", Indirect, Control, 6, control::jmp)
        .op(0x1E, "ASL", AbsoluteX, Modify, 6, shifts::asl::<Cmos>)
        .op(0x3E, "ROL", AbsoluteX, Modify, 6, shifts::rol::<Cmos>)
        .op(0x5E, "LSR", AbsoluteX, Modify, 6, shifts::lsr::<Cmos>)
        .op(0x7E, "ROR", AbsoluteX, Modify, 6, shifts::ror::<Cmos>)
        .custom(0xFE, "INC", AbsoluteX, Modify, 7, decoder::absolute_x_fixed::<Cmos>, inc_dec::inc::<Cmos>)
        .custom(0xDE, "DEC", AbsoluteX, Modify, 7, decoder::absolute_x_fixed::<Cmos>, inc_dec::dec::<Cmos>);

    // (zp) forms of the group-one instructions
    t.op(0x12, "ORA", ZeroPageIndirect, Read, 5, alu::ora)
        .op(0x32, "AND", ZeroPageIndirect, Read, 5, alu::and)
        .op(0x52, "EOR", ZeroPageIndirect, Read, 5, alu::eor)
        .op(0x72, "ADC", ZeroPageIndirect, Read, 5, alu::adc::<Cmos>)
        .op(0x92, "STA", ZeroPageIndirect, Write, 5, load_store::sta)
        .op(0xB2, "LDA", ZeroPageIndirect, Read, 5, load_store::lda)
        .op(0xD2, "CMP", ZeroPageIndirect, Read, 5, alu::cmp)
        .op(0xF2, "SBC", ZeroPageIndirect, Read, 5, alu::sbc::<Cmos>);

    // New instructions
    t.op(0x80, "BRA", Relative, Control, 3, branches::bra::<Cmos>)
        .op(0xDA, "PHX", Stack, Write, 3, stack::phx)
        .op(0x5A, "PHY", Stack, Write, 3, stack::phy)
        .op(0xFA, "PLX", Stack, Read, 4, stack::plx)
        .op(0x7A, "PLY", Stack, Read, 4, stack::ply)
        .op(0x64, "STZ", ZeroPage, Write, 3, load_store::stz)
        .op(0x74, "STZ", ZeroPageX, Write, 4, load_store::stz)
        .op(0x9C, "STZ", Absolute, Write, 4, load_store::stz)
        .op(0x9E, "STZ", AbsoluteX, Write, 5, load_store::stz)
        .op(0x04, "TSB", ZeroPage, Modify, 5, bits::tsb::<Cmos>)
        .op(0x0C, "TSB", Absolute, Modify, 6, bits::tsb::<Cmos>)
        .op(0x14, "TRB", ZeroPage, Modify, 5, bits::trb::<Cmos>)
        .op(0x1C, "TRB", Absolute, Modify, 6, bits::trb::<Cmos>)
        .op(0x1A, "INC", Accumulator, Read, 2, inc_dec::inc_a)
        .op(0x3A, "DEC", Accumulator, Read, 2, inc_dec::dec_a)
        .op(0x89, "BIT", Immediate, Read, 2, alu::bit_immediate)
        .op(0x34, "BIT", ZeroPageX, Read, 4, alu::bit)
        .op(0x3C, "BIT", AbsoluteX, Read, 4, alu::bit)
        .op(0x7C, "JMP", AbsoluteIndexedIndirect, Control, 6, control::jmp)
        .custom(0xCB, "WAI", Implicit, Control, 3, decoder::deferred, control::wai)
        .custom(0xDB, "STP", Implicit, Control, 3, decoder::deferred, control::stp);

    // Bit n lives in bits 4-6 of the opcode
    for n in 0..8u8 {
        let row = n << 4;
        t.op(0x07 | row, BIT_MNEMONICS[0][n as usize], ZeroPage, Modify, 5, bits::rmb::<Cmos>)
            .op(0x87 | row, BIT_MNEMONICS[1][n as usize], ZeroPage, Modify, 5, bits::smb::<Cmos>)
            .op(0x0F | row, BIT_MNEMONICS[2][n as usize], ZeroPageRelative, Control, 5, bits::bbr::<Cmos>)
            .op(0x8F | row, BIT_MNEMONICS[3][n as usize], ZeroPageRelative, Control, 5, bits::bbs::<Cmos>);
    }

    t.build()
}
