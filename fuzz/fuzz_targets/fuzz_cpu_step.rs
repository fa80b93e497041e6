//! Fuzz target for single-instruction execution.
//!
//! Builds an arbitrary register file and memory image, then steps one
//! instruction on the selected chip and checks the result is consistent.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sim6502::debug::BusLog;
use sim6502::{Bus, ChipVariant, Cpu, ExecutionError, FlatMemory};

#[derive(Debug, Arbitrary)]
struct FuzzRegisters {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    status: u8,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cmos: bool,
    registers: FuzzRegisters,

    /// Bytes at PC (opcode and operands)
    instruction_bytes: [u8; 3],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    irq_vector: u16,
}

fuzz_target!(|input: FuzzInput| {
    let variant = if input.cmos {
        ChipVariant::Cmos65C02
    } else {
        ChipVariant::Nmos6502
    };

    let mut memory = FlatMemory::new();
    memory.load(0x0000, &input.zero_page);
    memory.load(0x0100, &input.stack_page);
    memory.load(0xFFFE, &input.irq_vector.to_le_bytes());
    for (i, &byte) in input.instruction_bytes.iter().enumerate() {
        memory.poke(input.registers.pc.wrapping_add(i as u16), byte);
    }

    let mut cpu = Cpu::new(variant, BusLog::new(memory));
    let regs = &input.registers;
    cpu.set_pc(regs.pc);
    cpu.set_sp(regs.sp);
    cpu.set_a(regs.a);
    cpu.set_x(regs.x);
    cpu.set_y(regs.y);
    cpu.set_status(regs.status);

    match cpu.step() {
        Ok(cycles) => {
            // Every cycle is exactly one bus access.
            assert_eq!(cycles as usize, cpu.memory().accesses().len());
            assert_eq!(cpu.cycles(), cycles as u64);
            assert!((1..=8).contains(&cycles));
        }
        Err(err) => {
            assert_eq!(err.pc(), regs.pc);
            assert_eq!(cpu.pc(), regs.pc);
            if let ExecutionError::IllegalOpcode { .. } = err {
                assert_eq!(variant, ChipVariant::Nmos6502);
            }
        }
    }

    assert_eq!(cpu.status() & 0x30, 0x20);
});
