//! Tests for JMP in its absolute, indirect and 65C02 indexed indirect forms.
//!
//! The NMOS indirect jump never carries into the pointer's high byte; the
//! 65C02 fixed that and pays an extra cycle.

use sim6502::{ChipVariant, Cpu, FlatMemory};

fn setup_cpu(variant: ChipVariant) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.set_reset_vector(0x8000);
    Cpu::new(variant, memory)
}

#[test]
fn test_jmp_absolute() {
    for variant in ChipVariant::ALL {
        let mut cpu = setup_cpu(variant);
        cpu.memory_mut().load(0x8000, &[0x4C, 0x34, 0x12]);

        assert_eq!(cpu.step().unwrap(), 3);
        assert_eq!(cpu.pc(), 0x1234);
    }
}

#[test]
fn test_jmp_indirect() {
    let mut cpu = setup_cpu(ChipVariant::Nmos6502);
    cpu.memory_mut().load(0x8000, &[0x6C, 0x00, 0x20]);
    cpu.memory_mut().load(0x2000, &[0x78, 0x56]);

    assert_eq!(cpu.step().unwrap(), 5);
    assert_eq!(cpu.pc(), 0x5678);
}

#[test]
fn test_jmp_indirect_page_boundary() {
    let program = [0x6C, 0xFF, 0x10]; // JMP ($10FF)

    let mut nmos = setup_cpu(ChipVariant::Nmos6502);
    let mut cmos = setup_cpu(ChipVariant::Cmos65C02);
    for cpu in [&mut nmos, &mut cmos] {
        let memory = cpu.memory_mut();
        memory.load(0x8000, &program);
        memory.load(0x10FF, &[0x34]);
        memory.load(0x1000, &[0x12]);
        memory.load(0x1100, &[0x56]);
    }

    // NMOS wraps to $1000 for the high byte
    assert_eq!(nmos.step().unwrap(), 5);
    assert_eq!(nmos.pc(), 0x1234);

    assert_eq!(cmos.step().unwrap(), 6);
    assert_eq!(cmos.pc(), 0x5634);
}

#[test]
fn test_jmp_indirect_takes_six_cycles_on_65c02() {
    let mut cpu = setup_cpu(ChipVariant::Cmos65C02);
    cpu.memory_mut().load(0x8000, &[0x6C, 0x00, 0x20]);
    cpu.memory_mut().load(0x2000, &[0x78, 0x56]);

    assert_eq!(cpu.step().unwrap(), 6);
    assert_eq!(cpu.pc(), 0x5678);
}

#[test]
fn test_jmp_absolute_indexed_indirect() {
    let mut cpu = setup_cpu(ChipVariant::Cmos65C02);
    // JMP ($3000,X) with X=4 reads the pointer at $3004
    cpu.memory_mut().load(0x8000, &[0x7C, 0x00, 0x30]);
    cpu.memory_mut().load(0x3004, &[0xCD, 0xAB]);
    cpu.set_x(0x04);

    assert_eq!(cpu.step().unwrap(), 6);
    assert_eq!(cpu.pc(), 0xABCD);
}

#[test]
fn test_jmp_absolute_indexed_indirect_is_illegal_on_nmos() {
    let mut cpu = setup_cpu(ChipVariant::Nmos6502);
    cpu.memory_mut().load(0x8000, &[0x7C, 0x00, 0x30]);

    let err = cpu.step().unwrap_err();
    assert_eq!(err.opcode(), 0x7C);
    assert_eq!(cpu.pc(), 0x8000);
}

#[test]
fn test_jmp_does_not_touch_flags() {
    let mut cpu = setup_cpu(ChipVariant::Nmos6502);
    cpu.memory_mut().load(0x8000, &[0x4C, 0x00, 0x90]);
    cpu.set_status(0xCF);

    cpu.step().unwrap();
    assert_eq!(cpu.status(), 0xEF);
}
