//! # CPU Execution Engine
//!
//! [`Cpu`] owns the register file and the bus and runs the
//! fetch-decode-execute loop against the opcode table of its
//! [`ChipVariant`].
//!
//! ## One Step
//!
//! 1. Call the pre-execute hook and record a trace entry (both optional)
//! 2. Open a bus transaction and fetch the opcode
//! 3. Run the table entry's decoder, then its execute routine
//! 4. Close the transaction; its length is the instruction's cycle count
//! 5. Call the post-execute hook
//!
//! Every cycle is a real bus access, so cycle counts come from the bus and
//! never from a lookup table.
//!
//! ## Interrupts
//!
//! [`Cpu::nmi`] and [`Cpu::irq`] run the 7-cycle entry sequence immediately,
//! between instructions. [`Cpu::step`] never polls the IRQ line; the run
//! loops ([`Cpu::run`], [`Cpu::run_for_cycles`]) service
//! [`Bus::irq_active`] after each instruction.

use crate::debug::{TraceBuffer, TraceEntry};
use crate::disassembler::decoder::from_definition;
use crate::disassembler::formatter::format_instruction;
use crate::instructions::control::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
use crate::instructions::Context;
use crate::memory::Bus;
use crate::opcodes::{opcode_table, OpcodeDefinition, OpcodeTable};
use crate::pacing::Pacer;
use crate::registers::Registers;
use crate::variant::ChipVariant;
use crate::ExecutionError;

/// Called before each fetch with the registers and the PC of the instruction
/// about to run.
pub type PreExecuteHook = Box<dyn FnMut(&Registers, u16)>;

/// Called after each successfully executed instruction.
pub type PostExecuteHook = Box<dyn FnMut(&Registers)>;

/// Run loop configuration.
///
/// # Examples
///
/// ```
/// use sim6502::RunOptions;
///
/// let options = RunOptions::default()
///     .with_stop_on_break(true)
///     .with_max_instructions(1_000);
///
/// assert!(options.skip_timing);
/// assert_eq!(options.clock_hz, 1_023_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "conformance",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RunOptions {
    /// Stop before executing a BRK opcode
    pub stop_on_break: bool,

    /// Run flat out instead of pacing to `clock_hz`
    pub skip_timing: bool,

    /// Target clock rate for pacing, in Hz
    pub clock_hz: u32,

    /// Stop after this many instructions
    pub max_instructions: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            stop_on_break: false,
            skip_timing: true,
            clock_hz: 1_023_000,
            max_instructions: None,
        }
    }
}

impl RunOptions {
    pub fn with_stop_on_break(mut self, stop: bool) -> Self {
        self.stop_on_break = stop;
        self
    }

    pub fn with_skip_timing(mut self, skip: bool) -> Self {
        self.skip_timing = skip;
        self
    }

    pub fn with_clock_hz(mut self, clock_hz: u32) -> Self {
        self.clock_hz = clock_hz;
        self
    }

    pub fn with_max_instructions(mut self, max: u64) -> Self {
        self.max_instructions = Some(max);
        self
    }
}

/// Why [`Cpu::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The cancel predicate asked to stop
    Cancelled,

    /// BRK reached with `stop_on_break` set; PC is on the BRK
    Break,

    /// `max_instructions` executed
    InstructionLimit,
}

/// Outcome of a completed [`Cpu::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Instructions executed by this call
    pub instructions: u64,

    /// Cycles spent by this call, interrupt entries included
    pub cycles: u64,

    pub reason: StopReason,
}

/// NMOS 6502 / WDC 65C02 processor.
///
/// Generic over the bus so hosts keep their concrete memory type.
///
/// # Examples
///
/// ```
/// use sim6502::{ChipVariant, Cpu, FlatMemory};
///
/// let mut memory = FlatMemory::new();
/// memory.set_reset_vector(0x8000);
/// memory.load(0x8000, &[0x18, 0xA9, 0x7F, 0x69, 0x01]); // CLC; LDA #$7F; ADC #$01
///
/// let mut cpu = Cpu::new(ChipVariant::Nmos6502, memory);
/// for _ in 0..3 {
///     cpu.step().unwrap();
/// }
///
/// assert_eq!(cpu.a(), 0x80);
/// assert!(cpu.flag_v() && cpu.flag_n() && !cpu.flag_c());
/// assert_eq!(cpu.cycles(), 6);
/// ```
pub struct Cpu<B: Bus> {
    regs: Registers,
    bus: B,
    table: &'static OpcodeTable,
    cycles: u64,
    instructions: u64,
    trace: Option<TraceBuffer>,
    pre_execute: Option<PreExecuteHook>,
    post_execute: Option<PostExecuteHook>,
}

impl<B: Bus> Cpu<B> {
    /// Creates a CPU on `bus` and resets it.
    pub fn new(variant: ChipVariant, bus: B) -> Self {
        let mut cpu = Self {
            regs: Registers::new(),
            bus,
            table: opcode_table(variant),
            cycles: 0,
            instructions: 0,
            trace: None,
            pre_execute: None,
            post_execute: None,
        };
        cpu.reset();
        cpu
    }

    /// Installs both execution hooks.
    pub fn with_hooks<F, G>(mut self, pre: F, post: G) -> Self
    where
        F: FnMut(&Registers, u16) + 'static,
        G: FnMut(&Registers) + 'static,
    {
        self.pre_execute = Some(Box::new(pre));
        self.post_execute = Some(Box::new(post));
        self
    }

    pub fn set_pre_execute(&mut self, hook: impl FnMut(&Registers, u16) + 'static) {
        self.pre_execute = Some(Box::new(hook));
    }

    pub fn set_post_execute(&mut self, hook: impl FnMut(&Registers) + 'static) {
        self.post_execute = Some(Box::new(hook));
    }

    pub fn clear_hooks(&mut self) {
        self.pre_execute = None;
        self.post_execute = None;
    }

    /// Reset sequence.
    ///
    /// Zeroes A/X/Y, sets S to 0xFD and the status to Unused only, loads PC
    /// from the reset vector and clears the cycle and instruction counters.
    /// The vector is fetched with [`Bus::peek`], so no bus cycles are spent.
    pub fn reset(&mut self) {
        self.regs.reset();
        let lo = self.bus.peek(RESET_VECTOR);
        let hi = self.bus.peek(RESET_VECTOR.wrapping_add(1));
        self.regs.pc = u16::from_le_bytes([lo, hi]);
        self.cycles = 0;
        self.instructions = 0;
        log::debug!("{} reset, PC=${:04X}", self.variant(), self.regs.pc);
    }

    /// Executes one instruction and returns the cycles it took.
    ///
    /// # Errors
    ///
    /// - [`ExecutionError::IllegalOpcode`] for an NMOS undocumented opcode
    /// - [`ExecutionError::UnsupportedInstruction`] for the 65C02's WAI/STP
    ///
    /// On error PC is left on the offending opcode; the fetch cycle still
    /// counts.
    pub fn step(&mut self) -> Result<u32, ExecutionError> {
        let pc = self.regs.pc;

        if let Some(hook) = self.pre_execute.as_mut() {
            hook(&self.regs, pc);
        }
        if self.trace.is_some() {
            self.record_trace(pc);
        }

        self.bus.begin_transaction();
        let opcode = self.bus.read(pc);
        self.regs.pc = pc.wrapping_add(1);

        let table = self.table;
        let def = &table[opcode];
        let mut ctx = Context {
            regs: &mut self.regs,
            bus: &mut self.bus,
            opcode,
            origin: pc,
        };
        let operand = (def.decode)(&mut ctx, def.access);
        let result = (def.execute)(&mut ctx, operand);

        let cycles = self.bus.end_transaction();
        self.cycles += cycles as u64;

        if let Err(err) = result {
            log::warn!("{}", err);
            return Err(err);
        }

        self.instructions += 1;
        log::trace!("${:04X} {} ({} cycles)", pc, def.mnemonic, cycles);

        if let Some(hook) = self.post_execute.as_mut() {
            hook(&self.regs);
        }

        Ok(cycles)
    }

    fn record_trace(&mut self, pc: u16) {
        let (def, formatted) = self.peek_instruction();
        let entry = TraceEntry {
            pc,
            opcode: def.opcode,
            mnemonic: def.mnemonic,
            cycle_count: self.cycles,
            formatted,
        };
        if let Some(trace) = self.trace.as_mut() {
            trace.push(entry);
        }
    }

    /// Runs until cancelled, stopped at BRK, out of instruction budget, or
    /// an instruction fails.
    ///
    /// `cancel` is checked before every fetch. After each instruction a held
    /// IRQ line is serviced (if I is clear) and, unless
    /// `options.skip_timing` is set, the loop is paced to `options.clock_hz`.
    pub fn run(
        &mut self,
        options: &RunOptions,
        mut cancel: impl FnMut(&Registers) -> bool,
    ) -> Result<RunSummary, ExecutionError> {
        let start_cycles = self.cycles;
        let mut pacer = if options.skip_timing {
            None
        } else {
            Some(Pacer::new(options.clock_hz, self.cycles))
        };
        let mut executed = 0u64;

        let reason = loop {
            if cancel(&self.regs) {
                break StopReason::Cancelled;
            }
            if options.max_instructions.is_some_and(|max| executed >= max) {
                break StopReason::InstructionLimit;
            }
            if options.stop_on_break && self.bus.peek(self.regs.pc) == 0x00 {
                break StopReason::Break;
            }

            self.step()?;
            executed += 1;

            if self.bus.irq_active() {
                self.irq();
            }
            if let Some(pacer) = pacer.as_mut() {
                pacer.pace(self.cycles);
            }
        };

        log::debug!("run stopped: {:?} after {} instructions", reason, executed);

        Ok(RunSummary {
            instructions: executed,
            cycles: self.cycles - start_cycles,
            reason,
        })
    }

    /// Runs whole instructions until at least `cycle_budget` cycles have
    /// passed and returns the cycles actually spent.
    ///
    /// Useful for frame-locked hosts that interleave the CPU with video or
    /// audio.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles + cycle_budget;

        while self.cycles < target_cycles {
            self.step()?;
            if self.bus.irq_active() {
                self.irq();
            }
        }

        Ok(self.cycles - start_cycles)
    }

    /// Non-maskable interrupt. Always taken; returns the 7 cycles spent.
    pub fn nmi(&mut self) -> u32 {
        log::debug!("NMI at ${:04X}", self.regs.pc);
        self.interrupt_sequence(NMI_VECTOR)
    }

    /// Maskable interrupt. Taken only when I is clear; returns the cycles
    /// spent (0 when masked).
    ///
    /// I is checked at the moment of the call, so a line held low through
    /// `CLI` or `PLP` is serviced at the very next poll. The chip itself
    /// runs one more instruction first because it samples I before the
    /// flag change lands.
    pub fn irq(&mut self) -> u32 {
        if self.regs.interrupt {
            return 0;
        }
        log::debug!("IRQ at ${:04X}", self.regs.pc);
        self.interrupt_sequence(IRQ_VECTOR)
    }

    fn interrupt_sequence(&mut self, vector: u16) -> u32 {
        let table = self.table;
        let pc = self.regs.pc;

        self.bus.begin_transaction();
        let mut ctx = Context {
            regs: &mut self.regs,
            bus: &mut self.bus,
            opcode: 0,
            origin: pc,
        };
        (table.interrupt)(&mut ctx, vector);

        let cycles = self.bus.end_transaction();
        self.cycles += cycles as u64;
        cycles
    }

    /// Decodes the instruction at PC without touching the bus clock.
    ///
    /// Returns its table entry and `"PPPP MNE operand"` text.
    ///
    /// ```
    /// use sim6502::{ChipVariant, Cpu, FlatMemory};
    ///
    /// let mut memory = FlatMemory::new();
    /// memory.set_reset_vector(0x0400);
    /// memory.load(0x0400, &[0xB1, 0x80]);
    ///
    /// let cpu = Cpu::new(ChipVariant::Nmos6502, memory);
    /// let (def, text) = cpu.peek_instruction();
    ///
    /// assert_eq!(def.mnemonic, "LDA");
    /// assert_eq!(text, "0400 LDA ($80),Y");
    /// ```
    pub fn peek_instruction(&self) -> (&'static OpcodeDefinition, String) {
        let pc = self.regs.pc;
        let bytes = [
            self.bus.peek(pc),
            self.bus.peek(pc.wrapping_add(1)),
            self.bus.peek(pc.wrapping_add(2)),
        ];
        let def = self.table.get(bytes[0]);
        let instr = from_definition(def, &bytes, pc);
        (def, format!("{:04X} {}", pc, format_instruction(&instr)))
    }

    /// Starts recording up to `capacity` instructions, replacing any trace
    /// already held.
    pub fn enable_trace(&mut self, capacity: usize) {
        self.trace = Some(TraceBuffer::with_capacity(capacity));
    }

    /// Stops recording and hands back what was recorded.
    pub fn disable_trace(&mut self) -> Option<TraceBuffer> {
        self.trace.take()
    }

    pub fn trace(&self) -> Option<&TraceBuffer> {
        self.trace.as_ref()
    }

    // ========== State Access ==========

    pub fn variant(&self) -> ChipVariant {
        self.table.variant()
    }

    pub fn opcode_table(&self) -> &'static OpcodeTable {
        self.table
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.regs
    }

    pub fn memory(&self) -> &B {
        &self.bus
    }

    pub fn memory_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Consumes the CPU and returns its bus.
    pub fn into_memory(self) -> B {
        self.bus
    }

    /// Cycles executed since the last reset, interrupt entries included.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Instructions completed since the last reset.
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    // ========== Register Getters ==========

    pub fn a(&self) -> u8 {
        self.regs.a
    }

    pub fn x(&self) -> u8 {
        self.regs.x
    }

    pub fn y(&self) -> u8 {
        self.regs.y
    }

    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    /// Stack pointer. The full stack address is 0x0100 + SP.
    pub fn sp(&self) -> u8 {
        self.regs.s
    }

    /// Packed status byte (Unused set, Break clear).
    pub fn status(&self) -> u8 {
        self.regs.status()
    }

    // ========== Status Flag Getters ==========

    pub fn flag_n(&self) -> bool {
        self.regs.negative
    }

    pub fn flag_v(&self) -> bool {
        self.regs.overflow
    }

    pub fn flag_d(&self) -> bool {
        self.regs.decimal
    }

    pub fn flag_i(&self) -> bool {
        self.regs.interrupt
    }

    pub fn flag_z(&self) -> bool {
        self.regs.zero
    }

    pub fn flag_c(&self) -> bool {
        self.regs.carry
    }

    // ========== Register Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.regs.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.regs.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.regs.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.regs.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.regs.s = value;
    }

    /// Unpacks a status byte; Break and Unused are ignored.
    pub fn set_status(&mut self, value: u8) {
        self.regs.set_status(value);
    }

    // ========== Status Flag Setters ==========

    pub fn set_flag_n(&mut self, value: bool) {
        self.regs.negative = value;
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.regs.overflow = value;
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.regs.decimal = value;
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.regs.interrupt = value;
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.regs.zero = value;
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.regs.carry = value;
    }
}
