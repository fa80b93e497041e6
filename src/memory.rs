//! # Bus Abstraction
//!
//! This module provides the [`Bus`] trait that decouples the CPU from specific
//! memory implementations, and [`FlatMemory`], a 64KB RAM test double.
//!
//! ## Counted and Uncounted Access
//!
//! Every bus cycle the processor performs goes through [`Bus::read`] or
//! [`Bus::write`]; one call is one clock cycle. [`Bus::peek`] and
//! [`Bus::poke`] are side doors for vector fetches on reset, debuggers and
//! test setup. They never advance the cycle count and the engine never uses
//! them where the hardware would drive the bus.
//!
//! A single instruction's cost is measured by bracketing it with
//! [`Bus::begin_transaction`] and [`Bus::end_transaction`].
//!
//! ## Design Principles
//!
//! - No bus errors - reads/writes always succeed
//! - Unmapped reads may return garbage
//! - Writes to ROM/unmapped regions may be ignored
//! - Reads take `&mut self` because on real hardware reads have side effects

/// Memory bus trait for CPU to read/write bytes.
///
/// # Examples
///
/// ```
/// use sim6502::{Bus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
///
/// mem.begin_transaction();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// assert_eq!(mem.peek(0x1234), 0x42);
///
/// // Two counted accesses, the peek is free
/// assert_eq!(mem.end_transaction(), 2);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use sim6502::Bus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],
///     rom: [u8; 0x8000],
///     cycles: u64,
///     mark: u64,
/// }
///
/// impl Bus for RomRamMemory {
///     fn read(&mut self, addr: u16) -> u8 {
///         self.cycles += 1;
///         self.peek(addr)
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         self.cycles += 1;
///         self.poke(addr, value);
///     }
///
///     fn peek(&self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0x8000) as usize]
///         }
///     }
///
///     fn poke(&mut self, addr: u16, value: u8) {
///         // Writes to ROM (0x8000+) are silently ignored
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///     }
///
///     fn begin_transaction(&mut self) {
///         self.mark = self.cycles;
///     }
///
///     fn end_transaction(&mut self) -> u32 {
///         (self.cycles - self.mark) as u32
///     }
///
///     fn cycles(&self) -> u64 {
///         self.cycles
///     }
/// }
/// ```
pub trait Bus {
    /// Reads a byte as a counted bus cycle.
    ///
    /// This method must never panic. If the address is unmapped,
    /// implementations may return garbage data.
    fn read(&mut self, addr: u16) -> u8;

    /// Writes a byte as a counted bus cycle.
    ///
    /// This method must never panic. If the address is read-only or unmapped,
    /// implementations may ignore the write.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a byte without consuming a cycle or triggering device side effects.
    fn peek(&self, addr: u16) -> u8;

    /// Writes a byte without consuming a cycle.
    fn poke(&mut self, addr: u16, value: u8);

    /// Starts measuring the cycles of one instruction.
    fn begin_transaction(&mut self);

    /// Returns the number of counted accesses since the matching
    /// [`Bus::begin_transaction`].
    fn end_transaction(&mut self) -> u32;

    /// Total counted accesses since the bus was created.
    fn cycles(&self) -> u64;

    /// Checks if the IRQ (Interrupt Request) line is active.
    ///
    /// The line is level-sensitive: the run loop services it after every
    /// instruction for as long as it is held and the I flag is clear.
    /// [`crate::Cpu::step`] never polls it, so single-step tests stay
    /// deterministic.
    ///
    /// Returns `false` for memory without interrupt-capable devices.
    fn irq_active(&self) -> bool {
        false
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses are writable RAM initialized to 0x00. Every counted
/// access increments an internal cycle counter.
///
/// # Examples
///
/// ```
/// use sim6502::{Bus, ChipVariant, Cpu, FlatMemory};
///
/// let mut memory = FlatMemory::new();
/// memory.set_reset_vector(0x8000);
/// memory.load(0x8000, &[0xEA]); // NOP
///
/// let cpu = Cpu::new(ChipVariant::Nmos6502, memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; 65536]>,

    /// Running count of counted accesses
    cycles: u64,

    /// Counter value at the last `begin_transaction`
    mark: u64,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
            cycles: 0,
            mark: 0,
        }
    }

    /// Copies `bytes` into memory starting at `addr`, wrapping at 0xFFFF.
    ///
    /// Uncounted, like [`Bus::poke`].
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        for (i, &byte) in bytes.iter().enumerate() {
            self.data[addr.wrapping_add(i as u16) as usize] = byte;
        }
    }

    /// Stores `target` at the reset vector (0xFFFC/0xFFFD).
    pub fn set_reset_vector(&mut self, target: u16) {
        let [lo, hi] = target.to_le_bytes();
        self.data[0xFFFC] = lo;
        self.data[0xFFFD] = hi;
    }

    /// Read-only view of the whole address space.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for FlatMemory {
    fn read(&mut self, addr: u16) -> u8 {
        self.cycles += 1;
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.cycles += 1;
        self.data[addr as usize] = value;
    }

    fn peek(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn poke(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }

    fn begin_transaction(&mut self) {
        self.mark = self.cycles;
    }

    fn end_transaction(&mut self) -> u32 {
        (self.cycles - self.mark) as u32
    }

    fn cycles(&self) -> u64 {
        self.cycles
    }
}
