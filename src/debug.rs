//! # Debugging Instrumentation
//!
//! Optional observers for tests and host tooling:
//!
//! - [`BusLog`]: wraps any [`crate::Bus`] and records every counted access
//!   in order, the shape single-step conformance vectors are written in.
//! - [`TraceBuffer`]: fixed-capacity ring of recently executed instructions,
//!   filled by [`crate::Cpu::enable_trace`].

mod bus_log;
mod trace;

pub use bus_log::{AccessKind, BusAccess, BusLog};
pub use trace::{TraceBuffer, TraceEntry};
