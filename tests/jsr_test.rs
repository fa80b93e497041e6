//! Tests for JSR and RTS.
//!
//! JSR pushes the address of its own last byte, high byte first; RTS pops it
//! and resumes one past it.

use sim6502::{Bus, ChipVariant, Cpu, FlatMemory};

fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.set_reset_vector(0x8000);
    Cpu::new(ChipVariant::Nmos6502, memory)
}

#[test]
fn test_jsr_pushes_return_address_minus_one() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x20, 0x00, 0x90]); // JSR $9000

    assert_eq!(cpu.step().unwrap(), 6);

    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.sp(), 0xFB);
    assert_eq!(cpu.memory().peek(0x01FD), 0x80);
    assert_eq!(cpu.memory().peek(0x01FC), 0x02);
}

#[test]
fn test_jsr_rts_round_trip() {
    for variant in ChipVariant::ALL {
        let mut memory = FlatMemory::new();
        memory.set_reset_vector(0x8000);
        memory.load(0x8000, &[0x20, 0x00, 0x90, 0xEA]); // JSR $9000; NOP
        memory.load(0x9000, &[0xA9, 0x42, 0x60]); // LDA #$42; RTS
        let mut cpu = Cpu::new(variant, memory);

        cpu.step().unwrap();
        cpu.step().unwrap();
        assert_eq!(cpu.step().unwrap(), 6, "RTS");

        assert_eq!(cpu.pc(), 0x8003);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.a(), 0x42);
        assert_eq!(cpu.cycles(), 14);
    }
}

#[test]
fn test_nested_subroutines() {
    let mut cpu = setup_cpu();
    let memory = cpu.memory_mut();
    memory.load(0x8000, &[0x20, 0x00, 0x90]); // JSR $9000
    memory.load(0x9000, &[0x20, 0x00, 0xA0, 0x60]); // JSR $A000; RTS
    memory.load(0xA000, &[0xE8, 0x60]); // INX; RTS

    for _ in 0..5 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.x(), 1);
    assert_eq!(cpu.sp(), 0xFD);
}

#[test]
fn test_jsr_stack_wraps() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x20, 0x00, 0x90]);
    cpu.set_sp(0x00);

    cpu.step().unwrap();

    assert_eq!(cpu.sp(), 0xFE);
    assert_eq!(cpu.memory().peek(0x0100), 0x80);
    assert_eq!(cpu.memory().peek(0x01FF), 0x02);
}

#[test]
fn test_rts_from_crafted_stack() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x60]);
    cpu.memory_mut().load(0x01FE, &[0xFF, 0x12]);
    cpu.set_sp(0xFD);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x1300);
    assert_eq!(cpu.sp(), 0xFF);
}
