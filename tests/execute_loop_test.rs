//! Execution loop tests
//!
//! Verifies stepping, error handling, the run loop's stop conditions,
//! cycle budgets and execution hooks.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use sim6502::{ChipVariant, Cpu, ExecutionError, FlatMemory, RunOptions, StopReason};

fn setup_cpu(variant: ChipVariant, program: &[u8]) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.set_reset_vector(0x8000);
    memory.load(0x8000, program);
    Cpu::new(variant, memory)
}

/// LDX #3; loop: DEX; BNE loop; BRK
const COUNTDOWN: [u8; 6] = [0xA2, 0x03, 0xCA, 0xD0, 0xFD, 0x00];

#[test]
fn test_step_returns_cycles_and_advances_pc() {
    let mut cpu = setup_cpu(ChipVariant::Nmos6502, &[0xEA]);

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.cycles(), 2);
    assert_eq!(cpu.instructions(), 1);
}

#[test]
fn test_illegal_opcode_on_nmos() {
    let mut cpu = setup_cpu(ChipVariant::Nmos6502, &[0x02]);

    match cpu.step() {
        Err(ExecutionError::IllegalOpcode { pc, opcode }) => {
            assert_eq!(pc, 0x8000);
            assert_eq!(opcode, 0x02);
        }
        other => panic!("Expected IllegalOpcode, got {:?}", other),
    }

    // PC stays on the opcode; the fetch cycle still counts
    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.cycles(), 1);
    assert_eq!(cpu.instructions(), 0);
}

#[test]
fn test_same_byte_is_a_nop_on_65c02() {
    let mut cpu = setup_cpu(ChipVariant::Cmos65C02, &[0x02, 0x55]);

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_wai_and_stp_are_unsupported() {
    for (opcode, mnemonic) in [(0xCB, "WAI"), (0xDB, "STP")] {
        let mut cpu = setup_cpu(ChipVariant::Cmos65C02, &[opcode]);

        let err = cpu.step().unwrap_err();
        assert_eq!(
            err,
            ExecutionError::UnsupportedInstruction {
                pc: 0x8000,
                opcode,
                mnemonic
            }
        );
        assert_eq!(
            err.to_string(),
            format!("Unsupported instruction {} (0x{:02X}) at $8000", mnemonic, opcode)
        );
        assert_eq!(cpu.pc(), 0x8000);
    }
}

#[test]
fn test_run_stops_on_break() {
    let mut cpu = setup_cpu(ChipVariant::Nmos6502, &COUNTDOWN);

    let options = RunOptions::default().with_stop_on_break(true);
    let summary = cpu.run(&options, |_| false).unwrap();

    assert_eq!(summary.reason, StopReason::Break);
    assert_eq!(summary.instructions, 7);
    // LDX 2, DEX 3x2, BNE taken 2x3, BNE not taken 2
    assert_eq!(summary.cycles, 16);
    assert_eq!(cpu.pc(), 0x8005, "PC is left on the BRK");
    assert_eq!(cpu.x(), 0);
}

#[test]
fn test_run_cancel_predicate() {
    let mut cpu = setup_cpu(ChipVariant::Nmos6502, &COUNTDOWN);

    let summary = cpu.run(&RunOptions::default(), |regs| regs.x == 1).unwrap();

    assert_eq!(summary.reason, StopReason::Cancelled);
    assert_eq!(summary.instructions, 4);
    assert_eq!(cpu.pc(), 0x8003);
}

#[test]
fn test_run_instruction_limit() {
    let mut cpu = setup_cpu(ChipVariant::Nmos6502, &COUNTDOWN);

    let options = RunOptions::default().with_max_instructions(3);
    let summary = cpu.run(&options, |_| false).unwrap();

    assert_eq!(summary.reason, StopReason::InstructionLimit);
    assert_eq!(summary.instructions, 3);
    assert_eq!(cpu.instructions(), 3);
}

#[test]
fn test_run_without_stop_on_break_executes_brk() {
    let mut cpu = setup_cpu(ChipVariant::Nmos6502, &COUNTDOWN);

    let options = RunOptions::default().with_max_instructions(8);
    cpu.run(&options, |_| false).unwrap();

    // BRK through a zeroed vector
    assert_eq!(cpu.pc(), 0x0000);
    assert!(cpu.flag_i());
}

#[test]
fn test_run_propagates_errors() {
    let mut cpu = setup_cpu(ChipVariant::Nmos6502, &[0xEA, 0xEA, 0xFF]);

    let err = cpu.run(&RunOptions::default(), |_| false).unwrap_err();

    assert_eq!(err, ExecutionError::IllegalOpcode { pc: 0x8002, opcode: 0xFF });
    assert_eq!(cpu.instructions(), 2);
}

#[test]
fn test_run_for_cycles_completes_whole_instructions() {
    let mut cpu = setup_cpu(ChipVariant::Nmos6502, &[0xEA; 8]);

    assert_eq!(cpu.run_for_cycles(10).unwrap(), 10);
    assert_eq!(cpu.pc(), 0x8005);

    // An odd budget overshoots by the rest of the last instruction
    assert_eq!(cpu.run_for_cycles(3).unwrap(), 4);
    assert_eq!(cpu.cycles(), 14);
}

#[test]
fn test_paced_run_takes_wall_clock_time() {
    let mut cpu = setup_cpu(ChipVariant::Cmos65C02, &[0x80, 0xFE]); // BRA *

    // 1000 branches of 3 cycles at 1 MHz is 3ms
    let options = RunOptions::default()
        .with_skip_timing(false)
        .with_clock_hz(1_000_000)
        .with_max_instructions(1000);

    let start = Instant::now();
    let summary = cpu.run(&options, |_| false).unwrap();

    assert_eq!(summary.cycles, 3000);
    assert!(start.elapsed() >= Duration::from_millis(2));
}

#[test]
fn test_execution_hooks() {
    let fetched = Rc::new(RefCell::new(Vec::new()));
    let completed = Rc::new(RefCell::new(0u32));

    let mut cpu = {
        let fetched = Rc::clone(&fetched);
        let completed = Rc::clone(&completed);
        setup_cpu(ChipVariant::Nmos6502, &[0xE8, 0xE8, 0x02]).with_hooks(
            move |_, pc| fetched.borrow_mut().push(pc),
            move |_| *completed.borrow_mut() += 1,
        )
    };

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert!(cpu.step().is_err());

    // The pre hook sees the failing fetch, the post hook does not
    assert_eq!(*fetched.borrow(), vec![0x8000, 0x8001, 0x8002]);
    assert_eq!(*completed.borrow(), 2);

    cpu.clear_hooks();
    cpu.set_pc(0x8000);
    cpu.step().unwrap();
    assert_eq!(fetched.borrow().len(), 3);
}

#[test]
fn test_post_hook_sees_updated_registers() {
    let seen = Rc::new(RefCell::new(Vec::new()));

    let mut cpu = setup_cpu(ChipVariant::Nmos6502, &[0xA9, 0x11, 0xA9, 0x22]);
    let sink = Rc::clone(&seen);
    cpu.set_post_execute(move |regs| sink.borrow_mut().push(regs.a));

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(*seen.borrow(), vec![0x11, 0x22]);
}
