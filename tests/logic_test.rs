//! Tests for AND, ORA, EOR, the compares, BIT and the flag instructions.

use sim6502::{ChipVariant, Cpu, FlatMemory};

fn setup_cpu(program: &[u8]) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.set_reset_vector(0x8000);
    memory.load(0x8000, program);
    Cpu::new(ChipVariant::Nmos6502, memory)
}

#[test]
fn test_and_ora_eor() {
    // AND #$0F; ORA #$80; EOR #$FF
    let mut cpu = setup_cpu(&[0x29, 0x0F, 0x09, 0x80, 0x49, 0xFF]);
    cpu.set_a(0xF3);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x03);
    assert!(!cpu.flag_n());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x83);
    assert!(cpu.flag_n());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x7C);
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_and_zero_result() {
    let mut cpu = setup_cpu(&[0x29, 0xF0]);
    cpu.set_a(0x0F);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_compare_outcomes() {
    // CMP #value with A = $40
    for (value, carry, zero, negative) in [
        (0x30, true, false, false),
        (0x40, true, true, false),
        (0x50, false, false, true),
    ] {
        let mut cpu = setup_cpu(&[0xC9, value]);
        cpu.set_a(0x40);

        cpu.step().unwrap();

        assert_eq!(cpu.flag_c(), carry, "CMP #${:02X}", value);
        assert_eq!(cpu.flag_z(), zero, "CMP #${:02X}", value);
        assert_eq!(cpu.flag_n(), negative, "CMP #${:02X}", value);
        assert_eq!(cpu.a(), 0x40);
    }
}

#[test]
fn test_cpx_cpy() {
    let mut cpu = setup_cpu(&[0xE0, 0x10, 0xC0, 0x20]);
    cpu.set_x(0x10);
    cpu.set_y(0x10);

    cpu.step().unwrap();
    assert!(cpu.flag_z() && cpu.flag_c());

    cpu.step().unwrap();
    assert!(!cpu.flag_z() && !cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_compare_is_unsigned() {
    let mut cpu = setup_cpu(&[0xC9, 0x01]);
    cpu.set_a(0xFF);

    cpu.step().unwrap();
    assert!(cpu.flag_c(), "$FF >= $01 unsigned");
}

#[test]
fn test_bit_copies_operand_bits() {
    let mut cpu = setup_cpu(&[0x24, 0x10, 0x2C, 0x00, 0x20]);
    cpu.set_a(0x01);
    cpu.memory_mut().load(0x0010, &[0xC0]);
    cpu.memory_mut().load(0x2000, &[0x01]);

    assert_eq!(cpu.step().unwrap(), 3);
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(cpu.flag_z());

    assert_eq!(cpu.step().unwrap(), 4);
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.a(), 0x01);
}

#[test]
fn test_flag_instructions() {
    // SEC; SED; SEI; CLC; CLD; CLI
    let mut cpu = setup_cpu(&[0x38, 0xF8, 0x78, 0x18, 0xD8, 0x58, 0xB8]);

    for _ in 0..3 {
        cpu.step().unwrap();
    }
    assert_eq!(cpu.status(), 0x2D);

    for _ in 0..3 {
        cpu.step().unwrap();
    }
    assert_eq!(cpu.status(), 0x20);

    // CLV
    cpu.set_flag_v(true);
    cpu.step().unwrap();
    assert!(!cpu.flag_v());
    assert_eq!(cpu.cycles(), 14);
}
