//! # Branch Instructions
//!
//! Conditional branches (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS) and the
//! 65C02's unconditional BRA.
//!
//! ## Timing
//!
//! - Not taken: 2 cycles (opcode and offset)
//! - Taken: +1 cycle, a dummy read at the next instruction
//! - Taken across a page: +1 more while the high byte of PC is fixed
//!
//! The relative decoder has already worked out the target, so a routine only
//! decides whether to go there.

use crate::decoder::Operand;
use crate::instructions::Context;
use crate::variant::Quirks;
use crate::ExecutionError;

/// Moves PC to `target`, spending the taken and page-cross cycles.
///
/// Shared with BBR/BBS, which pay the same penalties.
pub(crate) fn take<Q: Quirks>(ctx: &mut Context<'_>, target: u16) {
    let next = ctx.regs.pc;
    ctx.dummy_read_pc();

    if (next ^ target) & 0xFF00 != 0 {
        ctx.read(Q::branch_probe(next, target));
    }

    ctx.regs.pc = target;
}

#[inline]
fn branch_if<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand, condition: bool) -> Result<(), ExecutionError> {
    let target = operand.address();
    if condition {
        take::<Q>(ctx, target);
    }
    Ok(())
}

/// Branch if Carry Clear
pub(crate) fn bcc<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let condition = !ctx.regs.carry;
    branch_if::<Q>(ctx, operand, condition)
}

/// Branch if Carry Set
pub(crate) fn bcs<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let condition = ctx.regs.carry;
    branch_if::<Q>(ctx, operand, condition)
}

/// Branch if Equal (Z set)
pub(crate) fn beq<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let condition = ctx.regs.zero;
    branch_if::<Q>(ctx, operand, condition)
}

/// Branch if Not Equal (Z clear)
pub(crate) fn bne<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let condition = !ctx.regs.zero;
    branch_if::<Q>(ctx, operand, condition)
}

/// Branch if Minus (N set)
pub(crate) fn bmi<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let condition = ctx.regs.negative;
    branch_if::<Q>(ctx, operand, condition)
}

/// Branch if Plus (N clear)
pub(crate) fn bpl<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let condition = !ctx.regs.negative;
    branch_if::<Q>(ctx, operand, condition)
}

/// Branch if Overflow Clear
pub(crate) fn bvc<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let condition = !ctx.regs.overflow;
    branch_if::<Q>(ctx, operand, condition)
}

/// Branch if Overflow Set
pub(crate) fn bvs<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    let condition = ctx.regs.overflow;
    branch_if::<Q>(ctx, operand, condition)
}

/// Branch Always (65C02)
pub(crate) fn bra<Q: Quirks>(ctx: &mut Context<'_>, operand: Operand) -> Result<(), ExecutionError> {
    branch_if::<Q>(ctx, operand, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::test_support::with_context;
    use crate::instructions::ExecuteFn;
    use crate::memory::{Bus, FlatMemory};
    use crate::registers::Registers;
    use crate::variant::{Cmos, Nmos};

    #[test]
    fn test_not_taken_costs_nothing_extra() {
        let mut mem = FlatMemory::new();
        let mut regs = Registers::new();
        regs.carry = true;

        with_context(&mut mem, &mut regs, |ctx| {
            ctx.regs.pc = 0x8002;
            bcc::<Nmos>(ctx, Operand::Address(0x8010))
        })
        .unwrap();

        assert_eq!(regs.pc, 0x8002);
        assert_eq!(mem.end_transaction(), 0);
    }

    #[test]
    fn test_taken_same_page() {
        let mut mem = FlatMemory::new();
        let mut regs = Registers::new();

        with_context(&mut mem, &mut regs, |ctx| {
            ctx.regs.pc = 0x8002;
            bcc::<Nmos>(ctx, Operand::Address(0x8010))
        })
        .unwrap();

        assert_eq!(regs.pc, 0x8010);
        assert_eq!(mem.end_transaction(), 1);
    }

    #[test]
    fn test_taken_across_page_both_variants() {
        for taken in [bra::<Nmos> as ExecuteFn, bra::<Cmos>] {
            let mut mem = FlatMemory::new();
            let mut regs = Registers::new();

            with_context(&mut mem, &mut regs, |ctx| {
                ctx.regs.pc = 0x80FE;
                taken(ctx, Operand::Address(0x8105))
            })
            .unwrap();

            assert_eq!(regs.pc, 0x8105);
            assert_eq!(mem.end_transaction(), 2);
        }
    }
}
