//! Fuzz target for the disassembler.
//!
//! Feeds arbitrary byte sequences to both chips' disassemblers and checks
//! that the listing covers the input exactly.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sim6502::disassembler::{disassemble, formatter::format_instruction};
use sim6502::ChipVariant;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    origin: u16,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    for variant in ChipVariant::ALL {
        let instructions = disassemble(variant, &input.bytes, input.origin);

        let mut total_size: usize = 0;
        let mut expected_address = input.origin;

        for instr in &instructions {
            assert_eq!(instr.address, expected_address);
            assert!(instr.size_bytes >= 1 && instr.size_bytes <= 3);
            assert!(instr.operand_bytes.len() <= instr.size_bytes as usize);
            assert!(!format_instruction(instr).is_empty());

            total_size += instr.size_bytes as usize;
            expected_address = expected_address.wrapping_add(instr.size_bytes as u16);
        }

        assert_eq!(total_size, input.bytes.len());
    }
});
