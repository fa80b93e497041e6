//! # Stack Instructions
//!
//! - PHA/PHP: push accumulator/status (3 cycles)
//! - PLA/PLP: pull accumulator/status (4 cycles)
//! - PHX/PHY/PLX/PLY: index register forms (65C02)
//!
//! The stack lives in page one and grows downward; S points at the next free
//! slot. Pulls spend a cycle reading the current slot before incrementing S.

use crate::decoder::Operand;
use crate::instructions::Context;
use crate::ExecutionError;

pub(crate) fn pha(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.regs.a;
    ctx.push(value);
    Ok(())
}

pub(crate) fn phx(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.regs.x;
    ctx.push(value);
    Ok(())
}

pub(crate) fn phy(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.regs.y;
    ctx.push(value);
    Ok(())
}

/// PHP pushes with Break and Unused set.
pub(crate) fn php(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.regs.status_for_push(true);
    ctx.push(value);
    Ok(())
}

fn pull(ctx: &mut Context<'_>) -> u8 {
    ctx.dummy_read_stack();
    ctx.pop()
}

pub(crate) fn pla(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.a = pull(ctx);
    ctx.regs.set_nz(ctx.regs.a);
    Ok(())
}

pub(crate) fn plx(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.x = pull(ctx);
    ctx.regs.set_nz(ctx.regs.x);
    Ok(())
}

pub(crate) fn ply(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    ctx.regs.y = pull(ctx);
    ctx.regs.set_nz(ctx.regs.y);
    Ok(())
}

/// PLP drops Break and Unused from the pulled byte.
pub(crate) fn plp(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    let value = pull(ctx);
    ctx.regs.set_status(value);
    Ok(())
}
