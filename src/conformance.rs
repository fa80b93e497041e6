//! # Single-Step Conformance Vectors
//!
//! Runs the JSON single-instruction test vectors published for 6502-family
//! cores (one file per opcode, one object per case):
//!
//! ```json
//! {
//!   "name": "a9 42 00",
//!   "initial": { "pc": 32768, "s": 253, "a": 0, "x": 0, "y": 0, "p": 36,
//!                "ram": [[32768, 169], [32769, 66]] },
//!   "final":   { "pc": 32770, "s": 253, "a": 66, "x": 0, "y": 0, "p": 36,
//!                "ram": [[32768, 169], [32769, 66]] },
//!   "cycles":  [[32768, 169, "read"], [32769, 66, "read"]]
//! }
//! ```
//!
//! A case passes when one [`crate::Cpu::step`] from the initial state
//! produces the final registers, the final RAM bytes, and exactly the listed
//! bus cycles in order. Break and Unused are ignored when comparing P since
//! neither is stored in the register.

use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::cpu::Cpu;
use crate::debug::{AccessKind, BusAccess, BusLog};
use crate::memory::{Bus, FlatMemory};
use crate::registers::{BREAK, UNUSED};
use crate::variant::ChipVariant;
use crate::ExecutionError;

/// Register and memory snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuState {
    pub pc: u16,
    pub s: u8,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: u8,

    /// Sparse memory image as `(address, value)` pairs
    pub ram: Vec<(u16, u8)>,
}

/// One single-step vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub initial: CpuState,
    #[serde(rename = "final")]
    pub final_state: CpuState,

    /// Expected bus cycles as `(address, value, kind)`
    pub cycles: Vec<(u16, u8, AccessKind)>,
}

/// Failure to parse a vector file.
#[derive(Debug)]
pub struct LoadError(serde_json::Error);

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid test vector file: {}", self.0)
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError(err)
    }
}

/// First difference between a case's expectation and what the CPU did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// The instruction did not execute at all.
    Execution(ExecutionError),

    Register {
        name: &'static str,
        expected: u16,
        actual: u16,
    },

    Memory {
        address: u16,
        expected: u8,
        actual: u8,
    },

    CycleCount {
        expected: usize,
        actual: usize,
    },

    Cycle {
        index: usize,
        expected: BusAccess,
        actual: BusAccess,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mismatch::Execution(err) => write!(f, "execution failed: {}", err),
            Mismatch::Register {
                name,
                expected,
                actual,
            } => write!(f, "register {}: expected ${:X}, got ${:X}", name, expected, actual),
            Mismatch::Memory {
                address,
                expected,
                actual,
            } => write!(f, "memory ${:04X}: expected ${:02X}, got ${:02X}", address, expected, actual),
            Mismatch::CycleCount { expected, actual } => {
                write!(f, "expected {} bus cycles, got {}", expected, actual)
            }
            Mismatch::Cycle {
                index,
                expected,
                actual,
            } => write!(f, "cycle {}: expected {}, got {}", index, expected, actual),
        }
    }
}

impl std::error::Error for Mismatch {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Mismatch::Execution(err) => Some(err),
            _ => None,
        }
    }
}

/// Parses a JSON array of test cases.
pub fn load_cases<R: Read>(reader: R) -> Result<Vec<TestCase>, LoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parses a JSON array of test cases held in memory.
pub fn parse_cases(json: &str) -> Result<Vec<TestCase>, LoadError> {
    Ok(serde_json::from_str(json)?)
}

fn check_register(name: &'static str, expected: u16, actual: u16) -> Result<(), Mismatch> {
    if expected == actual {
        Ok(())
    } else {
        Err(Mismatch::Register {
            name,
            expected,
            actual,
        })
    }
}

/// Runs one case on a fresh CPU of `variant`.
pub fn run_case(variant: ChipVariant, case: &TestCase) -> Result<(), Mismatch> {
    let mut memory = FlatMemory::new();
    for &(address, value) in &case.initial.ram {
        memory.poke(address, value);
    }

    let mut cpu = Cpu::new(variant, BusLog::new(memory));
    let init = &case.initial;
    cpu.set_pc(init.pc);
    cpu.set_sp(init.s);
    cpu.set_a(init.a);
    cpu.set_x(init.x);
    cpu.set_y(init.y);
    cpu.set_status(init.p);

    cpu.step().map_err(Mismatch::Execution)?;

    let want = &case.final_state;
    let flags = !(BREAK | UNUSED);
    check_register("PC", want.pc, cpu.pc())?;
    check_register("S", want.s as u16, cpu.sp() as u16)?;
    check_register("A", want.a as u16, cpu.a() as u16)?;
    check_register("X", want.x as u16, cpu.x() as u16)?;
    check_register("Y", want.y as u16, cpu.y() as u16)?;
    check_register("P", (want.p & flags) as u16, (cpu.status() & flags) as u16)?;

    for &(address, expected) in &want.ram {
        let actual = cpu.memory().peek(address);
        if actual != expected {
            return Err(Mismatch::Memory {
                address,
                expected,
                actual,
            });
        }
    }

    let accesses = cpu.memory().accesses();
    for (index, (&(address, value, kind), &actual)) in case.cycles.iter().zip(accesses).enumerate() {
        let expected = BusAccess { address, value, kind };
        if expected != actual {
            return Err(Mismatch::Cycle {
                index,
                expected,
                actual,
            });
        }
    }
    if accesses.len() != case.cycles.len() {
        return Err(Mismatch::CycleCount {
            expected: case.cycles.len(),
            actual: accesses.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    const LDA_IMMEDIATE: &str = r#"[{
        "name": "a9 42",
        "initial": { "pc": 512, "s": 253, "a": 0, "x": 0, "y": 0, "p": 36,
                     "ram": [[512, 169], [513, 66]] },
        "final":   { "pc": 514, "s": 253, "a": 66, "x": 0, "y": 0, "p": 36,
                     "ram": [[512, 169], [513, 66]] },
        "cycles":  [[512, 169, "read"], [513, 66, "read"]]
    }]"#;

    #[test]
    fn test_parse_and_run() {
        let cases = parse_cases(LDA_IMMEDIATE).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].cycles[1], (513, 66, AccessKind::Read));

        for variant in ChipVariant::ALL {
            assert_eq!(run_case(variant, &cases[0]), Ok(()));
        }
    }

    #[test]
    fn test_register_mismatch_reported() {
        let mut case = parse_cases(LDA_IMMEDIATE).unwrap().remove(0);
        case.final_state.a = 0x43;

        assert_eq!(
            run_case(ChipVariant::Nmos6502, &case),
            Err(Mismatch::Register {
                name: "A",
                expected: 0x43,
                actual: 0x42
            })
        );
    }

    #[test]
    fn test_cycle_count_mismatch() {
        let mut case = parse_cases(LDA_IMMEDIATE).unwrap().remove(0);
        case.cycles.push((514, 0, AccessKind::Read));

        assert_eq!(
            run_case(ChipVariant::Nmos6502, &case),
            Err(Mismatch::CycleCount { expected: 3, actual: 2 })
        );
    }

    #[test]
    fn test_load_error_has_source() {
        let err = load_cases("not json".as_bytes()).unwrap_err();
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("invalid test vector file"));
    }
}
