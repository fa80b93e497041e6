//! Instruction trace ring buffer.

use std::collections::VecDeque;
use std::fmt;

/// Entries allocated up front; larger rings grow as they fill.
const PREALLOCATE_LIMIT: usize = 4096;

/// One executed instruction, captured before it ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    /// Address of the opcode
    pub pc: u16,

    pub opcode: u8,

    pub mnemonic: &'static str,

    /// CPU cycle count when the instruction started
    pub cycle_count: u64,

    /// `"PPPP MNE operand"` as produced by [`crate::Cpu::peek_instruction`]
    pub formatted: String,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:>10}  {}", self.cycle_count, self.formatted)
    }
}

/// Fixed-capacity ring of [`TraceEntry`]; the oldest entry is dropped when a
/// new one arrives at capacity.
///
/// ```
/// use sim6502::debug::{TraceBuffer, TraceEntry};
///
/// let mut trace = TraceBuffer::with_capacity(2);
/// for pc in [0x8000u16, 0x8001, 0x8002] {
///     trace.push(TraceEntry {
///         pc,
///         opcode: 0xEA,
///         mnemonic: "NOP",
///         cycle_count: 0,
///         formatted: format!("{:04X} NOP", pc),
///     });
/// }
///
/// assert_eq!(trace.len(), 2);
/// assert_eq!(trace.get(0).map(|e| e.pc), Some(0x8001));
/// ```
#[derive(Debug, Clone)]
pub struct TraceBuffer {
    entries: VecDeque<TraceEntry>,
    capacity: usize,
}

impl TraceBuffer {
    /// A capacity of zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(PREALLOCATE_LIMIT)),
            capacity,
        }
    }

    pub fn push(&mut self, entry: TraceEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry `index` counting from the oldest.
    pub fn get(&self, index: usize) -> Option<&TraceEntry> {
        self.entries.get(index)
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&TraceEntry> {
        self.entries.back()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pc: u16) -> TraceEntry {
        TraceEntry {
            pc,
            opcode: 0xEA,
            mnemonic: "NOP",
            cycle_count: pc as u64,
            formatted: format!("{:04X} NOP", pc),
        }
    }

    #[test]
    fn test_ring_drops_oldest() {
        let mut trace = TraceBuffer::with_capacity(3);
        for pc in 0..5 {
            trace.push(entry(pc));
        }

        let pcs: Vec<u16> = trace.iter().map(|e| e.pc).collect();
        assert_eq!(pcs, vec![2, 3, 4]);
        assert_eq!(trace.last().map(|e| e.pc), Some(4));
        assert_eq!(trace.capacity(), 3);
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut trace = TraceBuffer::with_capacity(0);
        trace.push(entry(1));
        trace.push(entry(2));
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.get(0).map(|e| e.pc), Some(2));
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut trace = TraceBuffer::with_capacity(usize::MAX);
        for pc in 0..5 {
            trace.push(entry(pc));
        }

        assert_eq!(trace.capacity(), usize::MAX);
        assert_eq!(trace.len(), 5);
        assert_eq!(trace.get(0).map(|e| e.pc), Some(0));
    }

    #[test]
    fn test_display() {
        assert_eq!(entry(0x8000).to_string(), "     32768  8000 NOP");
    }
}
