//! # Instruction Implementations
//!
//! Every instruction is a free function with the signature of
//! [`ExecuteFn`]: it receives the execution [`Context`] and the [`Operand`]
//! its addressing-mode decoder produced, performs the instruction's own bus
//! cycles and updates the registers. Functions whose behaviour differs
//! between the chips are generic over [`crate::variant::Quirks`] and are
//! monomorphized into the opcode tables.
//!
//! ## Categories
//!
//! - **alu**: ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT
//! - **bits**: 65C02 bit manipulation (TRB, TSB, RMBn, SMBn, BBRn, BBSn)
//! - **branches**: BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS, BRA
//! - **control**: JMP, JSR, RTS, RTI, BRK, NOP, interrupts and traps
//! - **flags**: CLC, SEC, CLI, SEI, CLD, SED, CLV
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY, INC A, DEC A
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY, STZ
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **stack**: PHA, PHP, PLA, PLP, PHX, PHY, PLX, PLY
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS

pub(crate) mod alu;
pub(crate) mod bits;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::decoder::Operand;
use crate::memory::Bus;
use crate::registers::Registers;
use crate::variant::Quirks;
use crate::ExecutionError;

/// Execute routine stored in an opcode table entry.
pub(crate) type ExecuteFn = fn(&mut Context<'_>, Operand) -> Result<(), ExecutionError>;

/// Everything an instruction may touch while it runs.
pub(crate) struct Context<'a> {
    /// Processor registers
    pub regs: &'a mut Registers,

    /// Bus the instruction drives
    pub bus: &'a mut dyn Bus,

    /// Opcode byte being executed
    pub opcode: u8,

    /// Address the opcode was fetched from
    pub origin: u16,
}

impl<'a> Context<'a> {
    #[inline]
    pub fn read(&mut self, addr: u16) -> u8 {
        self.bus.read(addr)
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.bus.write(addr, value);
    }

    /// Reads the byte at PC and advances PC.
    #[inline]
    pub fn fetch(&mut self) -> u8 {
        let value = self.bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Throwaway read of the byte at PC without advancing.
    #[inline]
    pub fn dummy_read_pc(&mut self) {
        self.bus.read(self.regs.pc);
    }

    /// Throwaway read of the current stack slot.
    #[inline]
    pub fn dummy_read_stack(&mut self) {
        let addr = self.regs.stack_address();
        self.bus.read(addr);
    }

    pub fn push(&mut self, value: u8) {
        let addr = self.regs.stack_address();
        self.bus.write(addr, value);
        self.regs.s = self.regs.s.wrapping_sub(1);
    }

    pub fn pop(&mut self) -> u8 {
        self.regs.s = self.regs.s.wrapping_add(1);
        let addr = self.regs.stack_address();
        self.bus.read(addr)
    }

    /// Reads the operand of a read-class instruction.
    #[inline]
    pub fn load(&mut self, operand: Operand) -> u8 {
        let addr = operand.address();
        self.bus.read(addr)
    }

    /// Runs the read-modify-write bus sequence around `f`.
    ///
    /// Read the old value, spend the variant's in-between cycle, write the
    /// new value.
    pub fn modify<Q: Quirks>(&mut self, operand: Operand, f: impl FnOnce(&mut Registers, u8) -> u8) {
        let addr = operand.address();
        let old = self.bus.read(addr);
        Q::modify_probe(&mut *self.bus, addr, old);
        let new = f(self.regs, old);
        self.bus.write(addr, new);
    }
}
