//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR, each in an accumulator form and a
//! read-modify-write memory form. The bit shifted out lands in Carry; ROL
//! and ROR shift the old Carry in.

use crate::decoder::Operand;
use crate::instructions::Context;
use crate::registers::Registers;
use crate::variant::Quirks;
use crate::ExecutionError;

fn shift_left(regs: &mut Registers, value: u8) -> u8 {
    regs.carry = value & 0x80 != 0;
    let result = value << 1;
    regs.set_nz(result);
    result
}

fn shift_right(regs: &mut Registers, value: u8) -> u8 {
    regs.carry = value & 0x01 != 0;
    let result = value >> 1;
    regs.set_nz(result);
    result
}

fn rotate_left(regs: &mut Registers, value: u8) -> u8 {
    let result = (value << 1) | regs.carry as u8;
    regs.carry = value & 0x80 != 0;
    regs.set_nz(result);
    result
}

fn rotate_right(regs: &mut Registers, value: u8) -> u8 {
    let result = (value >> 1) | ((regs.carry as u8) << 7);
    regs.carry = value & 0x01 != 0;
    regs.set_nz(result);
    result
}

// ========== Accumulator ==========

pub(crate) fn asl_a(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    let a = ctx.regs.a;
    ctx.regs.a = shift_left(ctx.regs, a);
    Ok(())
}

pub(crate) fn lsr_a(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    let a = ctx.regs.a;
    ctx.regs.a = shift_right(ctx.regs, a);
    Ok(())
}

pub(crate) fn rol_a(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    let a = ctx.regs.a;
    ctx.regs.a = rotate_left(ctx.regs, a);
    Ok(())
}

pub(crate) fn ror_a(ctx: &mut Context<'_>, _operand: Operand) -> Result<(), ExecutionError> {
    let a = ctx.regs.a;
    ctx.regs.a = rotate_right(ctx.regs, a);
    Ok(())
}

// ========== Memory ==========

pub(crate) fn asl<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    ctx.modify::<Q>(operand, shift_left);
    Ok(())
}

pub(crate) fn lsr<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    ctx.modify::<Q>(operand, shift_right);
    Ok(())
}

pub(crate) fn rol<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    ctx.modify::<Q>(operand, rotate_left);
    Ok(())
}

pub(crate) fn ror<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    ctx.modify::<Q>(operand, rotate_right);
    Ok(())
}
