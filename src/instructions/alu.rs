//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Logical operations
//! - CMP, CPX, CPY: Comparisons
//! - BIT: Bit test (plus the 65C02 immediate form)
//!
//! The arithmetic itself lives in plain functions over [`Registers`] so the
//! two decimal-mode implementations can be checked exhaustively without a
//! bus.
//!
//! ## Decimal Mode
//!
//! In binary mode both chips behave identically. With D set they diverge:
//!
//! - **NMOS**: Z reflects the binary sum; N and V are taken from the
//!   intermediate result after the low-nibble fix-up. SBC sets every flag
//!   from the binary difference and only the accumulator is BCD-corrected.
//! - **65C02**: N and Z reflect the corrected result, and the instruction
//!   spends one extra cycle.

use crate::decoder::Operand;
use crate::instructions::Context;
use crate::registers::Registers;
use crate::variant::Quirks;
use crate::ExecutionError;

// ========== Arithmetic ==========

/// Two's-complement add with carry. Identical on both variants.
pub(crate) fn adc_binary(regs: &mut Registers, value: u8) {
    let sum = regs.a as u16 + value as u16 + regs.carry as u16;
    let result = sum as u8;

    regs.carry = sum > 0xFF;
    // Both operands had the same sign and the result does not
    regs.overflow = (regs.a ^ result) & (value ^ result) & 0x80 != 0;
    regs.a = result;
    regs.set_nz(result);
}

/// NMOS 6502 ADC.
pub(crate) fn adc_nmos(regs: &mut Registers, value: u8) {
    if !regs.decimal {
        adc_binary(regs, value);
        return;
    }

    let a = regs.a as u16;
    let m = value as u16;
    let c = regs.carry as u16;

    let mut lo = (a & 0x0F) + (m & 0x0F) + c;
    if lo > 0x09 {
        lo += 0x06;
    }
    let half_carry = if lo > 0x0F { 0x10 } else { 0 };
    let mut w = (lo & 0x0F) + (a & 0xF0) + (m & 0xF0) + half_carry;

    regs.zero = (a + m + c) & 0xFF == 0;
    regs.negative = w & 0x80 != 0;
    regs.overflow = (a ^ w) & 0x80 != 0 && (a ^ m) & 0x80 == 0;

    if w & 0x1F0 > 0x90 {
        w += 0x60;
    }
    regs.carry = w & 0xFF0 > 0xF0;
    regs.a = w as u8;
}

/// NMOS 6502 SBC.
pub(crate) fn sbc_nmos(regs: &mut Registers, value: u8) {
    let a = regs.a as i32;
    let m = value as i32;
    let borrow = if regs.carry { 0 } else { 1 };

    let diff = a - m - borrow;
    let binary = diff as u8;

    regs.carry = diff >= 0;
    regs.overflow = (a ^ m) & 0x80 != 0 && (a ^ diff) & 0x80 != 0;
    regs.set_nz(binary);

    if !regs.decimal {
        regs.a = binary;
        return;
    }

    let lo = (a & 0x0F) - (m & 0x0F) - borrow;
    let mut w = if lo & 0x10 != 0 {
        ((lo - 0x06) & 0x0F) | ((a & 0xF0) - (m & 0xF0) - 0x10)
    } else {
        (lo & 0x0F) | ((a & 0xF0) - (m & 0xF0))
    };
    if w & 0x100 != 0 {
        w -= 0x60;
    }
    regs.a = w as u8;
}

/// WDC 65C02 ADC.
pub(crate) fn adc_cmos(regs: &mut Registers, value: u8) {
    if !regs.decimal {
        adc_binary(regs, value);
        return;
    }

    let a = regs.a as u16;
    let m = value as u16;
    let mut overflow = (a ^ m) & 0x80 == 0;

    let mut w = (a & 0x0F) + (m & 0x0F) + regs.carry as u16;
    if w >= 0x0A {
        w = 0x10 | ((w + 0x06) & 0x0F);
    }
    w += (a & 0xF0) + (m & 0xF0);

    if w >= 0xA0 {
        regs.carry = true;
        overflow &= w < 0x180;
        w += 0x60;
    } else {
        regs.carry = false;
        overflow &= w >= 0x80;
    }

    regs.overflow = overflow;
    regs.a = w as u8;
    regs.set_nz(regs.a);
}

/// WDC 65C02 SBC.
pub(crate) fn sbc_cmos(regs: &mut Registers, value: u8) {
    if !regs.decimal {
        adc_binary(regs, !value);
        return;
    }

    let a = regs.a as i32;
    let m = value as i32;
    let mut overflow = (a ^ m) & 0x80 != 0;

    let mut lo = 0x0F + (a & 0x0F) - (m & 0x0F) + regs.carry as i32;
    let mut hi;
    if lo < 0x10 {
        lo -= 0x06;
        hi = 0;
    } else {
        lo -= 0x10;
        hi = 0x10;
    }
    hi += 0xF0 + (a & 0xF0) - (m & 0xF0);

    if hi < 0x100 {
        regs.carry = false;
        overflow &= hi >= 0x80;
        hi -= 0x60;
    } else {
        regs.carry = true;
        overflow &= hi < 0x180;
    }

    regs.overflow = overflow;
    regs.a = (hi + lo) as u8;
    regs.set_nz(regs.a);
}

/// Sets C, Z and N as `register - value` would, without storing it.
pub(crate) fn compare(regs: &mut Registers, register: u8, value: u8) {
    regs.carry = register >= value;
    regs.set_nz(register.wrapping_sub(value));
}

/// BIT: Z from `A & M`, N and V copied from bits 7 and 6 of the operand.
pub(crate) fn bit_test(regs: &mut Registers, value: u8) {
    regs.zero = regs.a & value == 0;
    regs.negative = value & 0x80 != 0;
    regs.overflow = value & 0x40 != 0;
}

// ========== Execute Routines ==========

pub(crate) fn adc<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.load(operand);
    Q::add(ctx.regs, value);
    if Q::DECIMAL_PENALTY_CYCLE && ctx.regs.decimal {
        ctx.dummy_read_pc();
    }
    Ok(())
}

pub(crate) fn sbc<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.load(operand);
    Q::subtract(ctx.regs, value);
    if Q::DECIMAL_PENALTY_CYCLE && ctx.regs.decimal {
        ctx.dummy_read_pc();
    }
    Ok(())
}

pub(crate) fn and(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.load(operand);
    ctx.regs.a &= value;
    ctx.regs.set_nz(ctx.regs.a);
    Ok(())
}

pub(crate) fn ora(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.load(operand);
    ctx.regs.a |= value;
    ctx.regs.set_nz(ctx.regs.a);
    Ok(())
}

pub(crate) fn eor(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.load(operand);
    ctx.regs.a ^= value;
    ctx.regs.set_nz(ctx.regs.a);
    Ok(())
}

pub(crate) fn cmp(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.load(operand);
    let a = ctx.regs.a;
    compare(ctx.regs, a, value);
    Ok(())
}

pub(crate) fn cpx(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.load(operand);
    let x = ctx.regs.x;
    compare(ctx.regs, x, value);
    Ok(())
}

pub(crate) fn cpy(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.load(operand);
    let y = ctx.regs.y;
    compare(ctx.regs, y, value);
    Ok(())
}

pub(crate) fn bit(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.load(operand);
    bit_test(ctx.regs, value);
    Ok(())
}

/// `BIT #imm` (65C02) only touches Z; there is no memory byte for N and V
/// to come from.
pub(crate) fn bit_immediate(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let value = ctx.load(operand);
    ctx.regs.zero = ctx.regs.a & value == 0;
    Ok(())
}
