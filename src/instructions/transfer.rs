//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA, TSX and TXS. Every transfer except TXS sets N and Z
//! from the copied value.

use crate::decoder::Operand;
use crate::instructions::Context;
use crate::ExecutionError;

pub(crate) fn tax(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.x = ctx.regs.a;
    ctx.regs.set_nz(ctx.regs.x);
    Ok(())
}

pub(crate) fn tay(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.y = ctx.regs.a;
    ctx.regs.set_nz(ctx.regs.y);
    Ok(())
}

pub(crate) fn txa(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.a = ctx.regs.x;
    ctx.regs.set_nz(ctx.regs.a);
    Ok(())
}

pub(crate) fn tya(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.a = ctx.regs.y;
    ctx.regs.set_nz(ctx.regs.a);
    Ok(())
}

pub(crate) fn tsx(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.x = ctx.regs.s;
    ctx.regs.set_nz(ctx.regs.x);
    Ok(())
}

/// TXS leaves the flags alone.
pub(crate) fn txs(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.s = ctx.regs.x;
    Ok(())
}
