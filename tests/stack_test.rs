//! Tests for the stack instructions and the transfers touching S.
//!
//! PHP pushes the status with Break and Unused set; PLP drops both. The
//! stack pointer wraps within page one.

use sim6502::{Bus, ChipVariant, Cpu, FlatMemory};

fn setup_cpu(program: &[u8]) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.set_reset_vector(0x8000);
    memory.load(0x8000, program);
    Cpu::new(ChipVariant::Nmos6502, memory)
}

#[test]
fn test_pha_pla() {
    // PHA; LDA #$00; PLA
    let mut cpu = setup_cpu(&[0x48, 0xA9, 0x00, 0x68]);
    cpu.set_a(0x80);

    assert_eq!(cpu.step().unwrap(), 3);
    assert_eq!(cpu.sp(), 0xFC);
    assert_eq!(cpu.memory().peek(0x01FD), 0x80);

    cpu.step().unwrap();
    assert!(cpu.flag_z());

    assert_eq!(cpu.step().unwrap(), 4);
    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.sp(), 0xFD);
}

#[test]
fn test_php_sets_break_and_unused_in_pushed_copy() {
    let mut cpu = setup_cpu(&[0x08]);
    cpu.set_status(0x00);

    assert_eq!(cpu.step().unwrap(), 3);
    assert_eq!(cpu.memory().peek(0x01FD), 0x30);
    // The live register is unchanged
    assert_eq!(cpu.status(), 0x20);
}

#[test]
fn test_plp_ignores_break_and_unused() {
    let mut cpu = setup_cpu(&[0x28]);
    cpu.memory_mut().poke(0x01FE, 0xFF);

    assert_eq!(cpu.step().unwrap(), 4);
    assert_eq!(cpu.status(), 0xEF);
    assert!(cpu.flag_n() && cpu.flag_v() && cpu.flag_d());
    assert!(cpu.flag_i() && cpu.flag_z() && cpu.flag_c());
}

#[test]
fn test_php_plp_round_trip() {
    // PHP; CLC; SEI; PLP
    let mut cpu = setup_cpu(&[0x08, 0x18, 0x78, 0x28]);
    cpu.set_status(0xC3);

    for _ in 0..4 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.status(), 0xE3);
}

#[test]
fn test_stack_pointer_wraps() {
    // PHA at S=$00 writes $0100 and wraps to $FF
    let mut cpu = setup_cpu(&[0x48, 0x68, 0x68]);
    cpu.set_sp(0x00);
    cpu.set_a(0x42);

    cpu.step().unwrap();
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.memory().peek(0x0100), 0x42);

    // PLA at S=$FF reads $0100 again
    cpu.step().unwrap();
    assert_eq!(cpu.sp(), 0x00);
    assert_eq!(cpu.a(), 0x42);

    cpu.memory_mut().poke(0x0101, 0x07);
    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x07);
}

#[test]
fn test_txs_does_not_touch_flags() {
    let mut cpu = setup_cpu(&[0x9A, 0xBA]); // TXS; TSX
    cpu.set_x(0x00);
    cpu.set_flag_z(false);

    cpu.step().unwrap();
    assert_eq!(cpu.sp(), 0x00);
    assert!(!cpu.flag_z(), "TXS leaves flags alone");

    cpu.set_x(0x55);
    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z(), "TSX sets Z");
}
