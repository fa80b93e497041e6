//! # Increment and Decrement Instructions
//!
//! - INC/DEC: memory, read-modify-write
//! - INX/INY/DEX/DEY: index registers
//! - INC A/DEC A: accumulator (65C02)
//!
//! All set N and Z from the result and wrap at 8 bits. Carry and overflow
//! are never touched.

use crate::decoder::Operand;
use crate::instructions::Context;
use crate::variant::Quirks;
use crate::ExecutionError;

pub(crate) fn inc<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    ctx.modify::<Q>(operand, |regs, value| {
        let result = value.wrapping_add(1);
        regs.set_nz(result);
        result
    });
    Ok(())
}

pub(crate) fn dec<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    ctx.modify::<Q>(operand, |regs, value| {
        let result = value.wrapping_sub(1);
        regs.set_nz(result);
        result
    });
    Ok(())
}

pub(crate) fn inc_a(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.a = ctx.regs.a.wrapping_add(1);
    ctx.regs.set_nz(ctx.regs.a);
    Ok(())
}

pub(crate) fn dec_a(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.a = ctx.regs.a.wrapping_sub(1);
    ctx.regs.set_nz(ctx.regs.a);
    Ok(())
}

pub(crate) fn inx(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.x = ctx.regs.x.wrapping_add(1);
    ctx.regs.set_nz(ctx.regs.x);
    Ok(())
}

pub(crate) fn iny(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.y = ctx.regs.y.wrapping_add(1);
    ctx.regs.set_nz(ctx.regs.y);
    Ok(())
}

pub(crate) fn dex(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.x = ctx.regs.x.wrapping_sub(1);
    ctx.regs.set_nz(ctx.regs.x);
    Ok(())
}

pub(crate) fn dey(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.y = ctx.regs.y.wrapping_sub(1);
    ctx.regs.set_nz(ctx.regs.y);
    Ok(())
}
