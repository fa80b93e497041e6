//! NMOS 6502 opcode table.
//!
//! Only the documented instruction set. The 105 remaining bytes (the
//! undocumented opcodes such as LAX, SAX, DCP and the JAM/KIL lock-ups) stay
//! as traps that stop execution with an illegal-opcode error.

use super::{OpcodeTable, TableBuilder};
use crate::variant::Nmos;

pub(super) fn build() -> OpcodeTable {
    let mut table = TableBuilder::<Nmos>::new();
    table.documented();
    table.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addressing::AddressingMode;

    #[test]
    fn test_undocumented_bytes_trap() {
        let table = build();
        for opcode in [0x02, 0x03, 0x1A, 0x80, 0xA7, 0xCB, 0xFF] {
            assert!(table[opcode].is_illegal(), "${:02X}", opcode);
            assert_eq!(table[opcode].addressing_mode, AddressingMode::Implicit);
            assert_eq!(table[opcode].size_bytes, 1);
        }
    }

    #[test]
    fn test_indirect_jump_timing() {
        assert_eq!(build()[0x6C].base_cycles, 5);
    }
}
