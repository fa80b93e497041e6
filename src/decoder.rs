//! # Addressing-Mode Decoders
//!
//! One routine per addressing mode, each reproducing the bus reads the
//! hardware performs while it works out the effective address. A decoder
//! runs right after the opcode fetch, with PC pointing at the first operand
//! byte, and leaves PC pointing at the next instruction.
//!
//! Decoders never touch the flags. Where the two chips drive different
//! addresses during dummy cycles, the decoder is generic over
//! [`Quirks`] and the opcode table picks the right instance.
//!
//! ## Index Fix-up Cycle
//!
//! Indexed absolute and `(zp),Y` accesses add the index to the low byte
//! first. If that carries into the high byte the CPU spends an extra cycle
//! fixing the address, during which it reads somewhere harmless:
//!
//! | Access | Extra cycle |
//! |--------|-------------|
//! | Read | only on page cross |
//! | Write | always |
//! | Read-modify-write | always on NMOS, on page cross on 65C02 |

use crate::addressing::AddressingMode;
use crate::instructions::Context;
use crate::opcodes::Access;
use crate::variant::Quirks;

/// What a decoder hands to the execute routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    /// Implied, accumulator and stack instructions, or instructions that
    /// drive all of their own bus cycles.
    None,

    /// Effective address (for immediate mode, the address of the operand
    /// byte; for branches and jumps, the target).
    Address(u16),

    /// BBR/BBS: the tested zero-page value and the branch target.
    BitBranch { value: u8, target: u16 },
}

impl Operand {
    /// Effective address of a memory operand.
    ///
    /// # Panics
    ///
    /// If the operand carries no address. That means an opcode table entry
    /// paired an execute routine with an addressing mode it cannot handle.
    #[inline]
    pub fn address(self) -> u16 {
        match self {
            Operand::Address(addr) => addr,
            other => panic!("unhandled addressing mode: expected an effective address, got {:?}", other),
        }
    }

    /// Tested value and target of a BBR/BBS operand.
    ///
    /// # Panics
    ///
    /// If the operand did not come from the zero-page-relative decoder.
    #[inline]
    pub fn bit_branch(self) -> (u8, u16) {
        match self {
            Operand::BitBranch { value, target } => (value, target),
            other => panic!("unhandled addressing mode: expected a bit branch, got {:?}", other),
        }
    }
}

/// Decode routine stored in an opcode table entry.
pub(crate) type DecodeFn = fn(&mut Context<'_>, Access) -> Operand;

/// Picks the decoder for a mode/access pairing.
///
/// # Panics
///
/// On a pairing the hardware never uses (for example a store with an
/// immediate operand). Only reachable while building an opcode table.
pub(crate) fn select<Q: Quirks>(mode: AddressingMode, access: Access) -> DecodeFn {
    use Access::*;
    use AddressingMode::*;

    match (mode, access) {
        (Implicit | Accumulator | Stack, _) => implied,
        (Immediate, Read) => immediate,
        (ZeroPage, Read | Write | Modify) => zero_page,
        (ZeroPageX, Read | Write | Modify) => zero_page_x::<Q>,
        (ZeroPageY, Read | Write) => zero_page_y::<Q>,
        (Absolute, Read | Write | Modify | Control) => absolute,
        (AbsoluteX, Read | Write | Modify) => absolute_x::<Q>,
        (AbsoluteY, Read | Write) => absolute_y::<Q>,
        (IndirectX, Read | Write) => indexed_indirect::<Q>,
        (IndirectY, Read | Write) => indirect_indexed::<Q>,
        (ZeroPageIndirect, Read | Write) => zero_page_indirect,
        (Indirect, Control) => absolute_indirect::<Q>,
        (AbsoluteIndexedIndirect, Control) => absolute_indexed_indirect,
        (Relative, Control) => relative,
        (ZeroPageRelative, Control) => zero_page_relative,
        (mode, access) => panic!(
            "unhandled addressing mode {:?} for {:?} access",
            mode, access
        ),
    }
}

/// No bus activity at all; the execute routine drives every cycle.
pub(crate) fn deferred(_ctx: &mut Context<'_>, _access: Access) -> Operand {
    Operand::None
}

/// Implied, accumulator and stack modes: the second cycle reads the byte
/// after the opcode and throws it away.
pub(crate) fn implied(ctx: &mut Context<'_>, _access: Access) -> Operand {
    ctx.dummy_read_pc();
    Operand::None
}

pub(crate) fn immediate(ctx: &mut Context<'_>, _access: Access) -> Operand {
    let addr = ctx.regs.pc;
    ctx.regs.pc = addr.wrapping_add(1);
    Operand::Address(addr)
}

pub(crate) fn zero_page(ctx: &mut Context<'_>, _access: Access) -> Operand {
    let zp = ctx.fetch();
    Operand::Address(zp as u16)
}

fn zero_page_indexed<Q: Quirks>(ctx: &mut Context<'_>, index: u8) -> Operand {
    let base = ctx.fetch();
    let operand_addr = ctx.regs.pc.wrapping_sub(1);
    ctx.read(Q::zero_page_index_probe(operand_addr, base));
    Operand::Address(base.wrapping_add(index) as u16)
}

pub(crate) fn zero_page_x<Q: Quirks>(ctx: &mut Context<'_>, _access: Access) -> Operand {
    let x = ctx.regs.x;
    zero_page_indexed::<Q>(ctx, x)
}

pub(crate) fn zero_page_y<Q: Quirks>(ctx: &mut Context<'_>, _access: Access) -> Operand {
    let y = ctx.regs.y;
    zero_page_indexed::<Q>(ctx, y)
}

fn fetch_word(ctx: &mut Context<'_>) -> u16 {
    let lo = ctx.fetch();
    let hi = ctx.fetch();
    u16::from_le_bytes([lo, hi])
}

pub(crate) fn absolute(ctx: &mut Context<'_>, _access: Access) -> Operand {
    Operand::Address(fetch_word(ctx))
}

/// Adds `index` to `base`, spending the fix-up cycle the access class calls
/// for.
fn index<Q: Quirks>(
    ctx: &mut Context<'_>,
    base: u16,
    index: u8,
    access: Access,
    last_fetch: u16,
) -> Operand {
    let ea = base.wrapping_add(index as u16);
    let crossed = (base ^ ea) & 0xFF00 != 0;

    let fix_up = match access {
        Access::Read => crossed,
        Access::Write => true,
        Access::Modify => crossed || Q::MODIFY_ALWAYS_FIXES_INDEX,
        Access::Control => false,
    };

    if fix_up {
        let unfixed = (base & 0xFF00) | (ea & 0x00FF);
        ctx.read(Q::index_probe(last_fetch, unfixed, crossed));
    }

    Operand::Address(ea)
}

pub(crate) fn absolute_x<Q: Quirks>(ctx: &mut Context<'_>, access: Access) -> Operand {
    let base = fetch_word(ctx);
    let last = ctx.regs.pc.wrapping_sub(1);
    let x = ctx.regs.x;
    index::<Q>(ctx, base, x, access, last)
}

pub(crate) fn absolute_y<Q: Quirks>(ctx: &mut Context<'_>, access: Access) -> Operand {
    let base = fetch_word(ctx);
    let last = ctx.regs.pc.wrapping_sub(1);
    let y = ctx.regs.y;
    index::<Q>(ctx, base, y, access, last)
}

/// `abs,X` that always spends the fix-up cycle. Used by the 65C02's INC/DEC
/// abs,X, which kept the NMOS timing.
pub(crate) fn absolute_x_fixed<Q: Quirks>(ctx: &mut Context<'_>, _access: Access) -> Operand {
    absolute_x::<Q>(ctx, Access::Write)
}

/// `(zp,X)`: index the pointer inside page zero, then dereference it.
pub(crate) fn indexed_indirect<Q: Quirks>(ctx: &mut Context<'_>, _access: Access) -> Operand {
    let zp = ctx.fetch();
    let operand_addr = ctx.regs.pc.wrapping_sub(1);
    ctx.read(Q::zero_page_index_probe(operand_addr, zp));

    let ptr = zp.wrapping_add(ctx.regs.x);
    let lo = ctx.read(ptr as u16);
    let hi = ctx.read(ptr.wrapping_add(1) as u16);
    Operand::Address(u16::from_le_bytes([lo, hi]))
}

/// `(zp),Y`: dereference the zero-page pointer, then index the result.
pub(crate) fn indirect_indexed<Q: Quirks>(ctx: &mut Context<'_>, access: Access) -> Operand {
    let zp = ctx.fetch();
    let lo = ctx.read(zp as u16);
    let hi_addr = zp.wrapping_add(1) as u16;
    let hi = ctx.read(hi_addr);

    let base = u16::from_le_bytes([lo, hi]);
    let y = ctx.regs.y;
    index::<Q>(ctx, base, y, access, hi_addr)
}

/// `(zp)`, 65C02 only.
pub(crate) fn zero_page_indirect(ctx: &mut Context<'_>, _access: Access) -> Operand {
    let zp = ctx.fetch();
    let lo = ctx.read(zp as u16);
    let hi = ctx.read(zp.wrapping_add(1) as u16);
    Operand::Address(u16::from_le_bytes([lo, hi]))
}

/// `JMP (abs)`.
///
/// The NMOS part never carries into the pointer's high byte, so a pointer at
/// `$xxFF` takes its high byte from `$xx00`. The 65C02 fetches from the next
/// page and pays a cycle for it.
pub(crate) fn absolute_indirect<Q: Quirks>(ctx: &mut Context<'_>, _access: Access) -> Operand {
    let ptr = fetch_word(ctx);

    let hi_addr = if Q::FIXED_INDIRECT_JUMP {
        let last = ctx.regs.pc.wrapping_sub(1);
        ctx.read(last);
        ptr.wrapping_add(1)
    } else {
        (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF)
    };

    let lo = ctx.read(ptr);
    let hi = ctx.read(hi_addr);
    Operand::Address(u16::from_le_bytes([lo, hi]))
}

/// `JMP (abs,X)`, 65C02 only.
pub(crate) fn absolute_indexed_indirect(ctx: &mut Context<'_>, _access: Access) -> Operand {
    let base = fetch_word(ctx);
    let last = ctx.regs.pc.wrapping_sub(1);
    ctx.read(last);

    let ptr = base.wrapping_add(ctx.regs.x as u16);
    let lo = ctx.read(ptr);
    let hi = ctx.read(ptr.wrapping_add(1));
    Operand::Address(u16::from_le_bytes([lo, hi]))
}

/// Branch displacement, relative to the instruction that follows.
pub(crate) fn relative(ctx: &mut Context<'_>, _access: Access) -> Operand {
    let offset = ctx.fetch() as i8;
    Operand::Address(ctx.regs.pc.wrapping_add(offset as i16 as u16))
}

/// BBR/BBS: zero-page operand, then displacement.
pub(crate) fn zero_page_relative(ctx: &mut Context<'_>, _access: Access) -> Operand {
    let zp = ctx.fetch() as u16;
    let value = ctx.read(zp);
    ctx.read(zp);
    let offset = ctx.fetch() as i8;
    let target = ctx.regs.pc.wrapping_add(offset as i16 as u16);
    Operand::BitBranch { value, target }
}
