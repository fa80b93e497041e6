//! Recording bus wrapper.

use std::fmt;

use crate::memory::Bus;

/// Direction of a bus cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "conformance",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum AccessKind {
    Read,
    Write,
}

/// One counted bus cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusAccess {
    pub address: u16,
    pub value: u8,
    pub kind: AccessKind,
}

impl fmt::Display for BusAccess {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            AccessKind::Read => "read",
            AccessKind::Write => "write",
        };
        write!(f, "{:04X} {:02X} {}", self.address, self.value, kind)
    }
}

/// Bus wrapper that forwards to `inner` and logs every `read`/`write`.
///
/// `peek`/`poke` pass through unrecorded, matching their uncounted status.
///
/// The log keeps growing until [`BusLog::clear`] is called, so long runs
/// should clear it between steps or use [`BusLog::with_limit`].
///
/// # Examples
///
/// ```
/// use sim6502::debug::{AccessKind, BusLog};
/// use sim6502::{Bus, FlatMemory};
///
/// let mut log = BusLog::new(FlatMemory::new());
/// log.poke(0x10, 0x42);
/// log.read(0x10);
/// log.write(0x11, 0x43);
///
/// assert_eq!(log.accesses().len(), 2);
/// assert_eq!(log.accesses()[0].value, 0x42);
/// assert_eq!(log.accesses()[1].kind, AccessKind::Write);
/// ```
pub struct BusLog<B: Bus> {
    inner: B,
    accesses: Vec<BusAccess>,
    limit: usize,
    dropped: u64,
}

impl<B: Bus> BusLog<B> {
    pub fn new(inner: B) -> Self {
        Self::with_limit(inner, usize::MAX)
    }

    /// Records at most `limit` accesses; later ones are only counted in
    /// [`BusLog::dropped`] until the next [`BusLog::clear`].
    pub fn with_limit(inner: B, limit: usize) -> Self {
        Self {
            inner,
            accesses: Vec::new(),
            limit,
            dropped: 0,
        }
    }

    /// Accesses that arrived after the log was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Accesses recorded since creation or the last [`BusLog::clear`].
    pub fn accesses(&self) -> &[BusAccess] {
        &self.accesses
    }

    pub fn clear(&mut self) {
        self.accesses.clear();
        self.dropped = 0;
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut B {
        &mut self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }

    fn record(&mut self, address: u16, value: u8, kind: AccessKind) {
        if self.accesses.len() < self.limit {
            self.accesses.push(BusAccess {
                address,
                value,
                kind,
            });
        } else {
            self.dropped += 1;
        }
    }
}

impl<B: Bus> Bus for BusLog<B> {
    fn read(&mut self, addr: u16) -> u8 {
        let value = self.inner.read(addr);
        self.record(addr, value, AccessKind::Read);
        value
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.inner.write(addr, value);
        self.record(addr, value, AccessKind::Write);
    }

    fn peek(&self, addr: u16) -> u8 {
        self.inner.peek(addr)
    }

    fn poke(&mut self, addr: u16, value: u8) {
        self.inner.poke(addr, value);
    }

    fn begin_transaction(&mut self) {
        self.inner.begin_transaction();
    }

    fn end_transaction(&mut self) -> u32 {
        self.inner.end_transaction()
    }

    fn cycles(&self) -> u64 {
        self.inner.cycles()
    }

    fn irq_active(&self) -> bool {
        self.inner.irq_active()
    }
}
