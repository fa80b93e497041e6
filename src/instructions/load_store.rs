//! # Load and Store Instructions
//!
//! - LDA, LDX, LDY: load a register, set N and Z
//! - STA, STX, STY: store a register, flags untouched
//! - STZ: store zero (65C02)
//!
//! Stores take the store-class decoders, which always pay the index fix-up
//! cycle, so the routine itself is a single bus write.

use crate::decoder::Operand;
use crate::instructions::Context;
use crate::ExecutionError;

pub(crate) fn lda(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.a = ctx.load(operand);
    ctx.regs.set_nz(ctx.regs.a);
    Ok(())
}

pub(crate) fn ldx(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.x = ctx.load(operand);
    ctx.regs.set_nz(ctx.regs.x);
    Ok(())
}

pub(crate) fn ldy(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.y = ctx.load(operand);
    ctx.regs.set_nz(ctx.regs.y);
    Ok(())
}

pub(crate) fn sta(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.regs.a;
    ctx.write(operand.address(), value);
    Ok(())
}

pub(crate) fn stx(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.regs.x;
    ctx.write(operand.address(), value);
    Ok(())
}

pub(crate) fn sty(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.regs.y;
    ctx.write(operand.address(), value);
    Ok(())
}

pub(crate) fn stz(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    ctx.write(operand.address(), 0);
    Ok(())
}
