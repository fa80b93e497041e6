//! # Register and Flag Model
//!
//! The programmer-visible state of the processor: accumulator, index
//! registers, stack pointer, program counter and the six semantic status
//! flags.
//!
//! ## Status Byte Layout (NV-BDIZC)
//!
//! | Bit | Flag | Stored |
//! |-----|------|--------|
//! | 7 | N (Negative) | yes |
//! | 6 | V (Overflow) | yes |
//! | 5 | U (Unused) | no, always reads as 1 |
//! | 4 | B (Break) | no, only exists in pushed copies |
//! | 3 | D (Decimal) | yes |
//! | 2 | I (Interrupt disable) | yes |
//! | 1 | Z (Zero) | yes |
//! | 0 | C (Carry) | yes |
//!
//! Break and Unused are not latches on the real chip. Break only shows up in
//! the byte pushed by `PHP`/`BRK`; Unused is wired high.

use std::fmt;

/// Carry flag mask.
pub const CARRY: u8 = 0b0000_0001;
/// Zero flag mask.
pub const ZERO: u8 = 0b0000_0010;
/// Interrupt disable flag mask.
pub const INTERRUPT: u8 = 0b0000_0100;
/// Decimal mode flag mask.
pub const DECIMAL: u8 = 0b0000_1000;
/// Break bit mask (pushed status only).
pub const BREAK: u8 = 0b0001_0000;
/// Unused bit mask (always set when read).
pub const UNUSED: u8 = 0b0010_0000;
/// Overflow flag mask.
pub const OVERFLOW: u8 = 0b0100_0000;
/// Negative flag mask.
pub const NEGATIVE: u8 = 0b1000_0000;

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Stack pointer value after reset.
pub const RESET_STACK_POINTER: u8 = 0xFD;

/// Processor registers and status flags.
///
/// # Examples
///
/// ```
/// use sim6502::Registers;
///
/// let mut regs = Registers::new();
/// regs.set_status(0xFF);
///
/// // Break is dropped, Unused always reads back as set
/// assert_eq!(regs.status(), 0xEF);
/// assert!(regs.carry && regs.negative);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Registers {
    /// Accumulator
    pub a: u8,

    /// X index register
    pub x: u8,

    /// Y index register
    pub y: u8,

    /// Stack pointer (0x0100 + s is the next free stack slot)
    pub s: u8,

    /// Program counter
    pub pc: u16,

    /// Carry flag
    pub carry: bool,

    /// Zero flag
    pub zero: bool,

    /// Interrupt disable flag (blocks IRQ when set)
    pub interrupt: bool,

    /// Decimal mode flag (enables BCD arithmetic in ADC/SBC)
    pub decimal: bool,

    /// Overflow flag
    pub overflow: bool,

    /// Negative flag
    pub negative: bool,
}

impl Registers {
    /// Creates a register file in the post-reset state.
    pub fn new() -> Self {
        let mut regs = Self::default();
        regs.reset();
        regs
    }

    /// Zeroes A/X/Y, sets the stack pointer to 0xFD and leaves only the
    /// Unused bit set in the status byte.
    ///
    /// The program counter is left untouched; the caller loads it from the
    /// reset vector.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.s = RESET_STACK_POINTER;
        self.set_status(UNUSED);
    }

    /// Returns the packed status byte.
    ///
    /// Unused is always set and Break is always clear.
    pub fn status(&self) -> u8 {
        let mut p = UNUSED;

        if self.negative {
            p |= NEGATIVE;
        }
        if self.overflow {
            p |= OVERFLOW;
        }
        if self.decimal {
            p |= DECIMAL;
        }
        if self.interrupt {
            p |= INTERRUPT;
        }
        if self.zero {
            p |= ZERO;
        }
        if self.carry {
            p |= CARRY;
        }

        p
    }

    /// Unpacks a status byte into the six semantic flags.
    ///
    /// Break and Unused carry no state and are ignored.
    pub fn set_status(&mut self, p: u8) {
        self.negative = p & NEGATIVE != 0;
        self.overflow = p & OVERFLOW != 0;
        self.decimal = p & DECIMAL != 0;
        self.interrupt = p & INTERRUPT != 0;
        self.zero = p & ZERO != 0;
        self.carry = p & CARRY != 0;
    }

    /// Returns the status byte as it is pushed onto the stack.
    ///
    /// `brk` selects the Break bit: set for `PHP`/`BRK`, clear for hardware
    /// interrupts.
    pub fn status_for_push(&self, brk: bool) -> u8 {
        if brk {
            self.status() | BREAK
        } else {
            self.status()
        }
    }

    /// Sets Z and N from an 8-bit result.
    #[inline]
    pub fn set_nz(&mut self, value: u8) {
        self.zero = value == 0;
        self.negative = value & 0x80 != 0;
    }

    /// Full stack address for the current stack pointer.
    #[inline]
    pub fn stack_address(&self) -> u16 {
        STACK_BASE | self.s as u16
    }

    /// Eight-letter flag display, upper case when set (`NVUBDIZC`).
    pub fn flags_display(&self) -> String {
        let p = self.status();
        "NVUBDIZC"
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if p & (0x80 >> i) != 0 {
                    c
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect()
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "A:{:02X} X:{:02X} Y:{:02X} SP:{:02X} PS:{:02X} PC:{:04X} {}",
            self.a,
            self.x,
            self.y,
            self.s,
            self.status(),
            self.pc,
            self.flags_display()
        )
    }
}
