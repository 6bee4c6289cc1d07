//! DCPU-16 execution engine library.
//!
//! This crate implements a cycle-stepped DCPU-16 (1.7) with the following:
//! 1. **Core:** Register file, 64K-word memory, operand resolution, and the full basic and
//!    special instruction set with per-instruction cycle costs.
//! 2. **Interrupts:** A bounded interrupt queue with a configurable overflow policy, handler
//!    entry through `IA`, and `RFI`/`IAQ` control.
//! 3. **ISA:** Decoding and disassembly of instruction words.
//! 4. **SoC:** The `Device` contract, the device table addressed by `HWN`/`HWQ`/`HWI`, and a
//!    Generic Clock reference device.
//! 5. **Simulation:** Configuration and execution statistics.
//!
//! # Examples
//!
//! ```
//! use dcpu16_hardware::{Cpu, Register};
//!
//! let mut cpu = Cpu::default();
//! // SET A, 0x0030 ; ADD A, 2
//! cpu.flash(&[0x7c01, 0x0030, 0x8c02]).unwrap();
//! assert_eq!(cpu.step().unwrap(), 2);
//! assert_eq!(cpu.step().unwrap(), 2);
//! assert_eq!(cpu.regs.read(Register::A), 0x0032);
//! assert_eq!(cpu.cycles(), 4);
//! ```

/// Common types and constants (words, registers, errors).
pub mod common;
/// Engine configuration (defaults, overflow policy, hierarchical config structures).
pub mod config;
/// CPU core (execution, interrupts, operand resolution, ALU).
pub mod core;
/// Instruction set (opcodes, operands, decode, disassembly).
pub mod isa;
/// System-on-chip (memory, device contract, device table, devices).
pub mod soc;
/// Execution statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, memory, the interrupt queue and attached devices.
pub use crate::core::{Cpu, RunState};

pub use crate::common::{CpuError, Register, RegisterFile, Word};
pub use crate::soc::{Device, DeviceContext, DeviceInfo, SharedDevice, shared};
