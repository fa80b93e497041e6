//! # 65C02 Bit Manipulation
//!
//! - TSB/TRB: test and set/reset accumulator bits in memory
//! - RMBn/SMBn: reset/set bit n of a zero-page byte
//! - BBRn/BBSn: branch on bit n of a zero-page byte reset/set
//!
//! The bit number of the Rockwell-derived RMB/SMB/BBR/BBS families is encoded
//! in bits 4-6 of the opcode (`$07` is RMB0, `$17` is RMB1, ... `$F7` is SMB7).

use crate::decoder::Operand;
use crate::instructions::branches;
use crate::instructions::Context;
use crate::variant::Quirks;
use crate::ExecutionError;

#[inline]
fn bit_mask(opcode: u8) -> u8 {
    1 << ((opcode >> 4) & 0x07)
}

/// Test and Set Bits: Z from `A & M`, then `M |= A`.
pub(crate) fn tsb<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    ctx.modify::<Q>(operand, |regs, value| {
        regs.zero = regs.a & value == 0;
        value | regs.a
    });
    Ok(())
}

/// Test and Reset Bits: Z from `A & M`, then `M &= !A`.
pub(crate) fn trb<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    ctx.modify::<Q>(operand, |regs, value| {
        regs.zero = regs.a & value == 0;
        value & !regs.a
    });
    Ok(())
}

pub(crate) fn rmb<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let mask = bit_mask(ctx.opcode);
    ctx.modify::<Q>(operand, |_, value| value & !mask);
    Ok(())
}

pub(crate) fn smb<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let mask = bit_mask(ctx.opcode);
    ctx.modify::<Q>(operand, |_, value| value | mask);
    Ok(())
}

pub(crate) fn bbr<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let (value, target) = operand.bit_branch();
    if value & bit_mask(ctx.opcode) == 0 {
        branches::take::<Q>(ctx, target);
    }
    Ok(())
}

pub(crate) fn bbs<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let (value, target) = operand.bit_branch();
    if value & bit_mask(ctx.opcode) != 0 {
        branches::take::<Q>(ctx, target);
    }
    Ok(())
}
