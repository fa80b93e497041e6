//! # Opcode Tables
//!
//! One 256-entry table per [`ChipVariant`], binding every opcode byte to its
//! mnemonic, addressing mode, bus-access class, base cycle cost and the pair
//! of routines that run it: a decoder from [`crate::decoder`] and an execute
//! routine from [`crate::instructions`].
//!
//! The tables are built once per process on first use and shared read-only
//! afterwards. Variant differences are resolved while building: routines
//! that behave differently on the two chips are instantiated for the
//! matching [`Quirks`] marker, so dispatch is a plain indexed call.
//!
//! The 151 documented NMOS opcodes are registered here for both variants.
//! [`nmos`] leaves the remaining 105 bytes as illegal-opcode traps; [`cmos`]
//! adds the 65C02 instructions, corrects the timing the 65C02 changed, and
//! turns the rest into NOPs.
//!
//! # Examples
//!
//! ```
//! use sim6502::{opcode_table, AddressingMode, ChipVariant};
//!
//! let nmos = opcode_table(ChipVariant::Nmos6502);
//! assert_eq!(nmos[0xA9].mnemonic, "LDA");
//! assert_eq!(nmos[0xA9].addressing_mode, AddressingMode::Immediate);
//! assert_eq!(nmos[0xA9].base_cycles, 2);
//! assert!(nmos[0x80].is_illegal());
//!
//! let cmos = opcode_table(ChipVariant::Cmos65C02);
//! assert_eq!(cmos[0x80].mnemonic, "BRA");
//! ```

mod cmos;
mod nmos;

use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;
use std::sync::OnceLock;

use crate::addressing::AddressingMode;
use crate::decoder::{self, DecodeFn};
use crate::instructions::control::InterruptFn;
use crate::instructions::{alu, branches, control, flags, inc_dec, load_store, shifts, stack, transfer};
use crate::instructions::ExecuteFn;
use crate::variant::{ChipVariant, Quirks};

/// Mnemonic of an NMOS byte outside the documented set.
pub const ILLEGAL_MNEMONIC: &str = "???";

/// How an instruction uses its effective address. Selects the index fix-up
/// policy of the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Reads the operand (loads, arithmetic, compares)
    Read,

    /// Writes the operand without reading it (stores)
    Write,

    /// Reads, modifies and writes back the operand (shifts, INC/DEC, bit ops)
    Modify,

    /// Uses the address as a jump or branch target, or has no memory operand
    Control,
}

/// Everything known about one opcode byte on one variant.
#[derive(Clone, Copy)]
pub struct OpcodeDefinition {
    /// The opcode byte
    pub opcode: u8,

    /// Instruction mnemonic ("???" for NMOS illegal opcodes)
    pub mnemonic: &'static str,

    /// Addressing mode, as written in assembly
    pub addressing_mode: AddressingMode,

    /// Bus-access class
    pub access: Access,

    /// Cycles without page-crossing, branch or decimal penalties
    pub base_cycles: u8,

    /// Opcode plus operand bytes
    pub size_bytes: u8,

    pub(crate) decode: DecodeFn,
    pub(crate) execute: ExecuteFn,
}

impl OpcodeDefinition {
    /// True for NMOS bytes that trap with [`crate::ExecutionError::IllegalOpcode`].
    pub fn is_illegal(&self) -> bool {
        self.mnemonic == ILLEGAL_MNEMONIC
    }
}

impl fmt::Debug for OpcodeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("OpcodeDefinition")
            .field("opcode", &format_args!("${:02X}", self.opcode))
            .field("mnemonic", &self.mnemonic)
            .field("addressing_mode", &self.addressing_mode)
            .field("access", &self.access)
            .field("base_cycles", &self.base_cycles)
            .field("size_bytes", &self.size_bytes)
            .finish()
    }
}

/// The 256 definitions of one variant plus its interrupt entry sequence.
pub struct OpcodeTable {
    variant: ChipVariant,
    entries: [OpcodeDefinition; 256],
    pub(crate) interrupt: InterruptFn,
}

impl OpcodeTable {
    pub fn variant(&self) -> ChipVariant {
        self.variant
    }

    pub fn get(&self, opcode: u8) -> &OpcodeDefinition {
        &self.entries[opcode as usize]
    }

    /// All 256 entries in opcode order.
    pub fn iter(&self) -> impl Iterator<Item = &OpcodeDefinition> {
        self.entries.iter()
    }
}

impl Index<u8> for OpcodeTable {
    type Output = OpcodeDefinition;

    fn index(&self, opcode: u8) -> &OpcodeDefinition {
        &self.entries[opcode as usize]
    }
}

impl fmt::Debug for OpcodeTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("OpcodeTable")
            .field("variant", &self.variant)
            .field("documented", &self.iter().filter(|d| !d.is_illegal()).count())
            .finish()
    }
}

/// Returns the shared table for `variant`, building it on first use.
pub fn opcode_table(variant: ChipVariant) -> &'static OpcodeTable {
    static NMOS: OnceLock<OpcodeTable> = OnceLock::new();
    static CMOS: OnceLock<OpcodeTable> = OnceLock::new();

    match variant {
        ChipVariant::Nmos6502 => NMOS.get_or_init(nmos::build),
        ChipVariant::Cmos65C02 => CMOS.get_or_init(cmos::build),
    }
}

/// Fills a table for one variant.
///
/// Every slot starts as an NMOS-style illegal-opcode trap; registering an
/// opcode overwrites its slot.
pub(crate) struct TableBuilder<Q: Quirks> {
    entries: [OpcodeDefinition; 256],
    _quirks: PhantomData<Q>,
}

impl<Q: Quirks> TableBuilder<Q> {
    pub fn new() -> Self {
        let trap = OpcodeDefinition {
            opcode: 0,
            mnemonic: ILLEGAL_MNEMONIC,
            addressing_mode: AddressingMode::Implicit,
            access: Access::Control,
            base_cycles: 0,
            size_bytes: 1,
            decode: decoder::deferred,
            execute: control::illegal,
        };

        let mut entries = [trap; 256];
        for (opcode, entry) in entries.iter_mut().enumerate() {
            entry.opcode = opcode as u8;
        }

        Self {
            entries,
            _quirks: PhantomData,
        }
    }

    /// Registers an opcode with the standard decoder for `mode`/`access`.
    pub fn op(
        &mut self,
        opcode: u8,
        mnemonic: &'static str,
        mode: AddressingMode,
        access: Access,
        cycles: u8,
        execute: ExecuteFn,
    ) -> &mut Self {
        let decode = decoder::select::<Q>(mode, access);
        self.custom(opcode, mnemonic, mode, access, cycles, decode, execute)
    }

    /// Registers an opcode with an explicit decoder.
    #[allow(clippy::too_many_arguments)]
    pub fn custom(
        &mut self,
        opcode: u8,
        mnemonic: &'static str,
        mode: AddressingMode,
        access: Access,
        cycles: u8,
        decode: DecodeFn,
        execute: ExecuteFn,
    ) -> &mut Self {
        self.entries[opcode as usize] = OpcodeDefinition {
            opcode,
            mnemonic,
            addressing_mode: mode,
            access,
            base_cycles: cycles,
            size_bytes: 1 + mode.operand_len(),
            decode,
            execute,
        };
        self
    }

    /// Registers the eight standard addressing forms of a group-one ALU
    /// instruction (`ORA AND EOR ADC STA LDA CMP SBC`), given the opcode of
    /// its `(zp,X)` form.
    fn group_one(&mut self, base: u8, mnemonic: &'static str, access: Access, execute: ExecuteFn) -> &mut Self {
        use AddressingMode::*;

        // STA takes the write timing on every indexed form
        let (abs_x, abs_y, ind_y) = if access == Access::Write { (5, 5, 6) } else { (4, 4, 5) };

        self.op(base, mnemonic, IndirectX, access, 6, execute)
            .op(base + 0x04, mnemonic, ZeroPage, access, 3, execute)
            .op(base + 0x0C, mnemonic, Absolute, access, 4, execute)
            .op(base + 0x10, mnemonic, IndirectY, access, ind_y, execute)
            .op(base + 0x14, mnemonic, ZeroPageX, access, 4, execute)
            .op(base + 0x18, mnemonic, AbsoluteY, access, abs_y, execute)
            .op(base + 0x1C, mnemonic, AbsoluteX, access, abs_x, execute);

        if access != Access::Write {
            self.op(base + 0x08, mnemonic, Immediate, access, 2, execute);
        }
        self
    }

    /// Registers the accumulator and four memory forms of a shift or rotate,
    /// given the opcode of its zero-page form.
    fn shift(&mut self, base: u8, mnemonic: &'static str, on_a: ExecuteFn, on_memory: ExecuteFn) -> &mut Self {
        use AddressingMode::*;

        self.op(base, mnemonic, ZeroPage, Access::Modify, 5, on_memory)
            .op(base + 0x04, mnemonic, Accumulator, Access::Read, 2, on_a)
            .op(base + 0x08, mnemonic, Absolute, Access::Modify, 6, on_memory)
            .op(base + 0x10, mnemonic, ZeroPageX, Access::Modify, 6, on_memory)
            .op(base + 0x18, mnemonic, AbsoluteX, Access::Modify, 7, on_memory)
    }

    /// Registers the documented NMOS instruction set.
    pub fn documented(&mut self) -> &mut Self {
        use AddressingMode::*;
        use Access::*;

        self.group_one(0x01, "ORA", Read, alu::ora)
            .group_one(0x21, "AND", Read, alu::and)
            .group_one(0x41, "EOR", Read, alu::eor)
            .group_one(0x61, "ADC", Read, alu::adc::<Q>)
            .group_one(0x81, "STA", Write, load_store::sta)
            .group_one(0xA1, "LDA", Read, load_store::lda)
            .group_one(0xC1, "CMP", Read, alu::cmp)
            .group_one(0xE1, "SBC", Read, alu::sbc::<Q>);

        self.shift(0x06, "ASL", shifts::asl_a, shifts::asl::<Q>)
            .shift(0x26, "ROL", shifts::rol_a, shifts::rol::<Q>)
            .shift(0x46, "LSR", shifts::lsr_a, shifts::lsr::<Q>)
            .shift(0x66, "ROR", shifts::ror_a, shifts::ror::<Q>);

        // Loads, stores and compares on X and Y
        self.op(0xA2, "LDX", Immediate, Read, 2, load_store::ldx)
            .op(0xA6, "LDX", ZeroPage, Read, 3, load_store::ldx)
            .op(0xB6, "LDX", ZeroPageY, Read, 4, load_store::ldx)
            .op(0xAE, "LDX", Absolute, Read, 4, load_store::ldx)
            .op(0xBE, "LDX", AbsoluteY, Read, 4, load_store::ldx)
            .op(0xA0, "LDY", Immediate, Read, 2, load_store::ldy)
            .op(0xA4, "LDY", ZeroPage, Read, 3, load_store::ldy)
            .op(0xB4, "LDY", ZeroPageX, Read, 4, load_store::ldy)
            .op(0xAC, "LDY", Absolute, Read, 4, load_store::ldy)
            .op(0xBC, "LDY", AbsoluteX, Read, 4, load_store::ldy)
            .op(0x86, "STX", ZeroPage, Write, 3, load_store::stx)
            .op(0x96, "STX", ZeroPageY, Write, 4, load_store::stx)
            .op(0x8E, "STX", Absolute, Write, 4, load_store::stx)
            .op(0x84, "STY", ZeroPage, Write, 3, load_store::sty)
            .op(0x94, "STY", ZeroPageX, Write, 4, load_store::sty)
            .op(0x8C, "STY", Absolute, Write, 4, load_store::sty)
            .op(0xE0, "CPX", Immediate, Read, 2, alu::cpx)
            .op(0xE4, "CPX", ZeroPage, Read, 3, alu::cpx)
            .op(0xEC, "CPX", Absolute, Read, 4, alu::cpx)
            .op(0xC0, "CPY", Immediate, Read, 2, alu::cpy)
            .op(0xC4, "CPY", ZeroPage, Read, 3, alu::cpy)
            .op(0xCC, "CPY", Absolute, Read, 4, alu::cpy)
            .op(0x24, "BIT", ZeroPage, Read, 3, alu::bit)
            .op(0x2C, "BIT", Absolute, Read, 4, alu::bit);

        // Increment and decrement
        self.op(0xE6, "INC", ZeroPage, Modify, 5, inc_dec::inc::<Q>)
            .op(0xF6, "INC", ZeroPageX, Modify, 6, inc_dec::inc::<Q>)
            .op(0xEE, "INC", Absolute, Modify, 6, inc_dec::inc::<Q>)
            .op(0xFE, "INC", AbsoluteX, Modify, 7, inc_dec::inc::<Q>)
            .op(0xC6, "DEC", ZeroPage, Modify, 5, inc_dec::dec::<Q>)
            .op(0xD6, "DEC", ZeroPageX, Modify, 6, inc_dec::dec::<Q>)
            .op(0xCE, "DEC", Absolute, Modify, 6, inc_dec::dec::<Q>)
            .op(0xDE, "DEC", AbsoluteX, Modify, 7, inc_dec::dec::<Q>)
            .op(0xE8, "INX", Implicit, Read, 2, inc_dec::inx)
            .op(0xC8, "INY", Implicit, Read, 2, inc_dec::iny)
            .op(0xCA, "DEX", Implicit, Read, 2, inc_dec::dex)
            .op(0x88, "DEY", Implicit, Read, 2, inc_dec::dey);

        // Transfers, flags and the documented NOP
        self.op(0xAA, "TAX", Implicit, Read, 2, transfer::tax)
            .op(0xA8, "TAY", Implicit, Read, 2, transfer::tay)
            .op(0x8A, "TXA", Implicit, Read, 2, transfer::txa)
            .op(0x98, "TYA", Implicit, Read, 2, transfer::tya)
            .op(0xBA, "TSX", Implicit, Read, 2, transfer::tsx)
            .op(0x9A, "TXS", Implicit, Read, 2, transfer::txs)
            .op(0x18, "CLC", Implicit, Read, 2, flags::clc)
            .op(0x38, "SEC", Implicit, Read, 2, flags::sec)
            .op(0x58, "CLI", Implicit, Read, 2, flags::cli)
            .op(0x78, "SEI", Implicit, Read, 2, flags::sei)
            .op(0xD8, "CLD", Implicit, Read, 2, flags::cld)
            .op(0xF8, "SED", Implicit, Read, 2, flags::sed)
            .op(0xB8, "CLV", Implicit, Read, 2, flags::clv)
            .op(0xEA, "NOP", Implicit, Read, 2, control::nop);

        // Stack
        self.op(0x48, "PHA", Stack, Write, 3, stack::pha)
            .op(0x08, "PHP", Stack, Write, 3, stack::php)
            .op(0x68, "PLA", Stack, Read, 4, stack::pla)
            .op(0x28, "PLP", Stack, Read, 4, stack::plp);

        // Branches
        self.op(0x10, "BPL", Relative, Control, 2, branches::bpl::<Q>)
            .op(0x30, "BMI", Relative, Control, 2, branches::bmi::<Q>)
            .op(0x50, "BVC", Relative, Control, 2, branches::bvc::<Q>)
            .op(0x70, "BVS", Relative, Control, 2, branches::bvs::<Q>)
            .op(0x90, "BCC", Relative, Control, 2, branches::bcc::<Q>)
            .op(0xB0, "BCS", Relative, Control, 2, branches::bcs::<Q>)
            .op(0xD0, "BNE", Relative, Control, 2, branches::bne::<Q>)
            .op(0xF0, "BEQ", Relative, Control, 2, branches::beq::<Q>);

        // Jumps, subroutines and interrupts
        self.op(0x4C, "JMP", Absolute, Control, 3, control::jmp)
            .op(0x6C, "JMP", Indirect, Control, 5, control::jmp)
            .custom(0x20, "JSR", Absolute, Control, 6, decoder::deferred, control::jsr)
            .op(0x60, "RTS", Stack, Control, 6, control::rts)
            .op(0x40, "RTI", Stack, Control, 6, control::rti)
            .op(0x00, "BRK", Stack, Control, 7, control::brk::<Q>)
    }

    pub fn build(self) -> OpcodeTable {
        let table = OpcodeTable {
            variant: Q::VARIANT,
            entries: self.entries,
            interrupt: control::interrupt::<Q>,
        };
        log::debug!(
            "built {} opcode table: {} assigned opcodes",
            table.variant,
            table.iter().filter(|d| !d.is_illegal()).count()
        );
        table
    }
}
