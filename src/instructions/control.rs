//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump (absolute, indirect, and the 65C02's indexed indirect)
//! - JSR/RTS: Subroutine call and return
//! - BRK/RTI: Software interrupt and return from interrupt
//! - NOP: the documented NOP and the 65C02's reserved-opcode NOPs
//! - Traps for opcodes the simulator refuses to run
//!
//! It also holds the hardware interrupt sequence shared by NMI and IRQ,
//! which drives the bus exactly like BRK minus the signature byte.
//!
//! ## Stack Frames
//!
//! JSR pushes the address of its own last byte (return address - 1); RTS
//! adds one after popping. BRK and interrupts push the address to resume at,
//! followed by the status byte. Only BRK pushes it with the Break bit set.

use crate::decoder::Operand;
use crate::instructions::Context;
use crate::variant::Quirks;
use crate::ExecutionError;

/// NMI vector address.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector address.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector address.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Hardware interrupt sequence stored alongside an opcode table.
pub(crate) type InterruptFn = fn(&mut Context<'_>, u16);

/// Pushes the return address and status, masks IRQs and jumps through
/// `vector`.
fn enter_handler<Q: Quirks>(ctx: &mut Context<'_>, vector: u16, brk: bool) {
    let [pcl, pch] = ctx.regs.pc.to_le_bytes();
    ctx.push(pch);
    ctx.push(pcl);
    let status = ctx.regs.status_for_push(brk);
    ctx.push(status);

    ctx.regs.interrupt = true;
    if Q::CLEARS_DECIMAL_ON_INTERRUPT {
        ctx.regs.decimal = false;
    }

    let lo = ctx.read(vector);
    let hi = ctx.read(vector.wrapping_add(1));
    ctx.regs.pc = u16::from_le_bytes([lo, hi]);
}

/// NMI/IRQ entry: two dummy reads at PC, then the BRK-shaped frame with
/// Break clear. 7 cycles.
pub(crate) fn interrupt<Q: Quirks>(ctx: &mut Context<'_>, vector: u16) {
    ctx.dummy_read_pc();
    ctx.dummy_read_pc();
    enter_handler::<Q>(ctx, vector, false);
}

/// BRK. The implied decoder already read the signature byte; skip it so the
/// pushed address is BRK + 2.
pub(crate) fn brk<Q: Quirks>(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.pc = ctx.regs.pc.wrapping_add(1);
    enter_handler::<Q>(ctx, IRQ_VECTOR, true);
    log::debug!("BRK at ${:04X} -> ${:04X}", ctx.origin, ctx.regs.pc);
    Ok(())
}

pub(crate) fn rti(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.dummy_read_stack();
    let status = ctx.pop();
    ctx.regs.set_status(status);
    let lo = ctx.pop();
    let hi = ctx.pop();
    ctx.regs.pc = u16::from_le_bytes([lo, hi]);
    Ok(())
}

pub(crate) fn jmp(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.pc = operand.address();
    Ok(())
}

/// JSR interleaves its operand fetch with the stack traffic, so it takes a
/// deferred decode and drives every cycle itself:
/// low byte, stack dummy read, push PCH, push PCL, high byte.
pub(crate) fn jsr(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    let lo = ctx.fetch();
    ctx.dummy_read_stack();

    let [pcl, pch] = ctx.regs.pc.to_le_bytes();
    ctx.push(pch);
    ctx.push(pcl);

    let pc = ctx.regs.pc;
    let hi = ctx.read(pc);
    ctx.regs.pc = u16::from_le_bytes([lo, hi]);
    Ok(())
}

pub(crate) fn rts(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.dummy_read_stack();
    let lo = ctx.pop();
    let hi = ctx.pop();
    let ret = u16::from_le_bytes([lo, hi]);
    ctx.read(ret);
    ctx.regs.pc = ret.wrapping_add(1);
    Ok(())
}

pub(crate) fn nop(_ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    Ok(())
}

/// Reserved 65C02 opcodes that read their operand and discard it.
pub(crate) fn nop_read(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    ctx.load(operand);
    Ok(())
}

/// 65C02 `$5C`: three bytes, eight cycles. After the absolute operand it
/// reads `$FFxx` once and `$FFFF` four times.
pub(crate) fn nop_5c(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let [lo, _] = operand.address().to_le_bytes();
    ctx.read(0xFF00 | lo as u16);
    for _ in 0..4 {
        ctx.read(0xFFFF);
    }
    Ok(())
}

/// NMOS opcode outside the documented set. PC is left on the opcode.
pub(crate) fn illegal(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.pc = ctx.origin;
    Err(ExecutionError::IllegalOpcode {
        pc: ctx.origin,
        opcode: ctx.opcode,
    })
}

fn unsupported(ctx: &mut Context<'_>, mnemonic: &'static str) -> Result<(), ExecutionError> {
    ctx.regs.pc = ctx.origin;
    Err(ExecutionError::UnsupportedInstruction {
        pc: ctx.origin,
        opcode: ctx.opcode,
        mnemonic,
    })
}

/// WAI needs an external wake-up the simulator does not model.
pub(crate) fn wai(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    unsupported(ctx, "WAI")
}

/// STP halts the clock until reset.
pub(crate) fn stp(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    unsupported(ctx, "STP")
}
