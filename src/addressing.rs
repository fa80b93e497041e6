//! # Addressing Modes
//!
//! This module defines the addressing modes of the NMOS 6502 and the WDC
//! 65C02. Each mode determines how the CPU interprets operand bytes and
//! calculates effective addresses. The bus-accurate decoders for each mode
//! live in [`crate::decoder`].

/// 6502/65C02 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator, Stack
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative,
///   IndirectX, IndirectY, ZeroPageIndirect
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect,
///   AbsoluteIndexedIndirect, ZeroPageRelative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, TAX, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, INC A (65C02)
    Accumulator,

    /// Push/pull and interrupt-shaped instructions that address the stack page.
    ///
    /// Examples: PHA, PLP, RTS, RTI, BRK
    Stack,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10 (load immediate value 0x10 into accumulator)
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80 (load from address 0x0080)
    ZeroPage,

    /// Zero page address indexed by X register.
    ///
    /// Example: LDA $80,X (load from address 0x0080 + X, wraps within zero page)
    ZeroPageX,

    /// Zero page address indexed by Y register.
    ///
    /// Example: LDX $80,Y (load from address 0x0080 + Y, wraps within zero page)
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    ///
    /// Example: BEQ label (offset is relative to the following instruction)
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234 (jump to address 0x1234)
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X (load from address 0x1234 + X)
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y (load from address 0x1234 + Y)
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer.
    ///
    /// Example: JMP ($FFFC) (jump to address stored at 0xFFFC/0xFFFD)
    /// On NMOS a pointer at $xxFF fetches its high byte from $xx00.
    Indirect,

    /// Indirect jump through a 16-bit pointer indexed by X (65C02).
    ///
    /// Example: JMP ($1234,X)
    AbsoluteIndexedIndirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    /// May incur +1 cycle penalty if page boundary is crossed.
    IndirectY,

    /// Zero page indirect without indexing (65C02).
    ///
    /// Example: LDA ($40)
    ZeroPageIndirect,

    /// Zero page operand followed by a branch offset (65C02 BBR/BBS).
    ///
    /// Example: BBR3 $12,label
    ZeroPageRelative,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    ///
    /// ```
    /// use sim6502::AddressingMode;
    ///
    /// assert_eq!(AddressingMode::Implicit.operand_len(), 0);
    /// assert_eq!(AddressingMode::IndirectY.operand_len(), 1);
    /// assert_eq!(AddressingMode::ZeroPageRelative.operand_len(), 2);
    /// ```
    pub const fn operand_len(self) -> u8 {
        use AddressingMode::*;
        match self {
            Implicit | Accumulator | Stack => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndirectX | IndirectY
            | ZeroPageIndirect => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect | AbsoluteIndexedIndirect
            | ZeroPageRelative => 2,
        }
    }
}
