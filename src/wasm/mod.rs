//! WebAssembly bindings for the simulator.
//!
//! Exposes a flat-memory [`crate::Cpu`] to JavaScript so a browser front end
//! can load a program, single-step it and inspect state.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Simulator;
