//! # Chip Variants
//!
//! [`ChipVariant`] selects between the NMOS 6502 and the WDC 65C02. The
//! behavioural differences that reach below the opcode map (dummy-cycle
//! addresses, decimal arithmetic, interrupt side effects, the indirect-JMP
//! page wrap) are captured by the [`Quirks`] marker types. The opcode tables
//! are monomorphized over those markers when they are built, so the dispatch
//! loop itself never asks which chip it is running.

use std::fmt;
use std::str::FromStr;

use crate::instructions::alu;
use crate::memory::Bus;
use crate::registers::Registers;

/// Processor variant, fixed for the lifetime of a [`crate::Cpu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "conformance",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ChipVariant {
    /// MOS Technology 6502 (NMOS).
    Nmos6502,

    /// Western Design Center 65C02 (CMOS).
    Cmos65C02,
}

impl ChipVariant {
    /// Both variants, in declaration order.
    pub const ALL: [ChipVariant; 2] = [ChipVariant::Nmos6502, ChipVariant::Cmos65C02];

    /// Short part name as printed on the package.
    pub fn part_name(self) -> &'static str {
        match self {
            ChipVariant::Nmos6502 => "6502",
            ChipVariant::Cmos65C02 => "65C02",
        }
    }
}

impl fmt::Display for ChipVariant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.part_name())
    }
}

/// Error returned when a variant name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVariantError(String);

impl fmt::Display for ParseVariantError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "unknown chip variant '{}' (expected 6502, nmos, 65c02 or cmos)",
            self.0
        )
    }
}

impl std::error::Error for ParseVariantError {}

impl FromStr for ChipVariant {
    type Err = ParseVariantError;

    /// Parses `6502`/`nmos`/`nmos6502` or `65c02`/`cmos`/`cmos65c02`,
    /// ignoring case.
    ///
    /// ```
    /// use sim6502::ChipVariant;
    ///
    /// assert_eq!("65C02".parse(), Ok(ChipVariant::Cmos65C02));
    /// assert_eq!("nmos".parse(), Ok(ChipVariant::Nmos6502));
    /// assert!("z80".parse::<ChipVariant>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "6502" | "nmos" | "nmos6502" => Ok(ChipVariant::Nmos6502),
            "65c02" | "cmos" | "cmos65c02" | "wdc65c02" => Ok(ChipVariant::Cmos65C02),
            _ => Err(ParseVariantError(s.to_string())),
        }
    }
}

/// Variant-specific behaviour below the opcode map.
///
/// Implemented by the zero-sized markers [`Nmos`] and [`Cmos`]; decoders and
/// execute routines that differ between the chips are generic over it.
pub(crate) trait Quirks: 'static {
    /// Which chip this marker describes.
    const VARIANT: ChipVariant;

    /// `JMP ($xxFF)` reads its high byte from `$xx+1 00` instead of `$xx00`.
    const FIXED_INDIRECT_JUMP: bool;

    /// BRK/NMI/IRQ clear the Decimal flag.
    const CLEARS_DECIMAL_ON_INTERRUPT: bool;

    /// Decimal-mode ADC/SBC take one extra bus cycle.
    const DECIMAL_PENALTY_CYCLE: bool;

    /// Read-modify-write abs,X always spends the index fix-up cycle.
    const MODIFY_ALWAYS_FIXES_INDEX: bool;

    /// Address of the dummy read while a zero-page base is being indexed
    /// (`zp,X`, `zp,Y`, `(zp,X)`).
    fn zero_page_index_probe(operand_addr: u16, base: u8) -> u16;

    /// Address of the fix-up read of an indexed absolute or `(zp),Y` access.
    ///
    /// `last_fetch` is the last address the decoder read, `unfixed` is the
    /// effective address before the carry reached the high byte.
    fn index_probe(last_fetch: u16, unfixed: u16, crossed: bool) -> u16;

    /// The bus cycle between reading and writing a read-modify-write operand.
    fn modify_probe(bus: &mut dyn Bus, addr: u16, old: u8);

    /// Address of the extra read when a taken branch crosses a page.
    fn branch_probe(next: u16, target: u16) -> u16;

    /// ADC semantics, binary and decimal.
    fn add(regs: &mut Registers, value: u8);

    /// SBC semantics, binary and decimal.
    fn subtract(regs: &mut Registers, value: u8);
}

/// NMOS 6502 behaviour.
pub(crate) struct Nmos;

/// WDC 65C02 behaviour.
pub(crate) struct Cmos;

impl Quirks for Nmos {
    const VARIANT: ChipVariant = ChipVariant::Nmos6502;
    const FIXED_INDIRECT_JUMP: bool = false;
    const CLEARS_DECIMAL_ON_INTERRUPT: bool = false;
    const DECIMAL_PENALTY_CYCLE: bool = false;
    const MODIFY_ALWAYS_FIXES_INDEX: bool = true;

    fn zero_page_index_probe(_operand_addr: u16, base: u8) -> u16 {
        base as u16
    }

    fn index_probe(_last_fetch: u16, unfixed: u16, _crossed: bool) -> u16 {
        unfixed
    }

    fn modify_probe(bus: &mut dyn Bus, addr: u16, old: u8) {
        bus.write(addr, old);
    }

    fn branch_probe(next: u16, target: u16) -> u16 {
        (next & 0xFF00) | (target & 0x00FF)
    }

    fn add(regs: &mut Registers, value: u8) {
        alu::adc_nmos(regs, value);
    }

    fn subtract(regs: &mut Registers, value: u8) {
        alu::sbc_nmos(regs, value);
    }
}

impl Quirks for Cmos {
    const VARIANT: ChipVariant = ChipVariant::Cmos65C02;
    const FIXED_INDIRECT_JUMP: bool = true;
    const CLEARS_DECIMAL_ON_INTERRUPT: bool = true;
    const DECIMAL_PENALTY_CYCLE: bool = true;
    const MODIFY_ALWAYS_FIXES_INDEX: bool = false;

    fn zero_page_index_probe(operand_addr: u16, _base: u8) -> u16 {
        operand_addr
    }

    fn index_probe(last_fetch: u16, unfixed: u16, crossed: bool) -> u16 {
        if crossed {
            last_fetch
        } else {
            unfixed
        }
    }

    fn modify_probe(bus: &mut dyn Bus, addr: u16, _old: u8) {
        bus.read(addr);
    }

    fn branch_probe(next: u16, _target: u16) -> u16 {
        next
    }

    fn add(regs: &mut Registers, value: u8) {
        alu::adc_cmos(regs, value);
    }

    fn subtract(regs: &mut Registers, value: u8) {
        alu::sbc_cmos(regs, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for variant in ChipVariant::ALL {
            let text = variant.to_string();
            assert_eq!(text.parse::<ChipVariant>(), Ok(variant));
        }

        assert_eq!(" CMOS ".parse(), Ok(ChipVariant::Cmos65C02));
        assert_eq!(
            "6809".parse::<ChipVariant>().unwrap_err().to_string(),
            "unknown chip variant '6809' (expected 6502, nmos, 65c02 or cmos)"
        );
    }

    #[test]
    fn test_branch_probe_addresses() {
        // Taken branch from $10FE to $1105: NMOS reads the unfixed $1005
        assert_eq!(Nmos::branch_probe(0x10FE, 0x1105), 0x1005);
        assert_eq!(Nmos::branch_probe(0x1100, 0x1005), 0x1105);
        assert_eq!(Cmos::branch_probe(0x10FE, 0x1105), 0x10FE);
    }

    #[test]
    fn test_index_probe_addresses() {
        assert_eq!(Nmos::index_probe(0x8002, 0x2010, true), 0x2010);
        assert_eq!(Cmos::index_probe(0x8002, 0x2010, true), 0x8002);
        assert_eq!(Cmos::index_probe(0x8002, 0x2010, false), 0x2010);
    }
}
