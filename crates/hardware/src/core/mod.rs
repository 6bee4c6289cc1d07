//! Core processor implementation.
//!
//! This module contains the DCPU-16 CPU, which owns the register file, main
//! memory, the interrupt queue and the device table, and the execution units
//! it computes with.

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Execution units (ALU).
pub mod units;

pub use self::cpu::{Cpu, RunState};
