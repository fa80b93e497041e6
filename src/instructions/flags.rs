//! # Flag Instructions
//!
//! Set and clear the individually addressable status flags:
//! - CLC/SEC: Carry
//! - CLI/SEI: Interrupt disable
//! - CLD/SED: Decimal mode
//! - CLV: Overflow (there is no SEV)
//!
//! All are 2 cycles: the opcode fetch and the implied dummy read.

use crate::decoder::Operand;
use crate::instructions::Context;
use crate::ExecutionError;

pub(crate) fn clc(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.carry = false;
    Ok(())
}

pub(crate) fn sec(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.carry = true;
    Ok(())
}

pub(crate) fn cli(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.interrupt = false;
    Ok(())
}

pub(crate) fn sei(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.interrupt = true;
    Ok(())
}

pub(crate) fn cld(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.decimal = false;
    Ok(())
}

pub(crate) fn sed(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.decimal = true;
    Ok(())
}

pub(crate) fn clv(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.overflow = false;
    Ok(())
}
