//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the DCPU-16 1.7 opcode tables, operand encodings, and decoding logic.
//!
//! # Layout
//!
//! * `opcodes`: Basic and special opcodes with their cycle costs.
//! * `operand`: The 6-bit `a` and 5-bit `b` operand encodings.
//! * `decode`: Field extraction and instruction decoding.
//! * `disasm`: Text rendering for tracing.

/// Instruction decoding logic.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Basic and special opcode definitions.
pub mod opcodes;

/// Operand value encodings.
pub mod operand;

pub use decode::{Instruction, decode, instruction_length};
pub use opcodes::{BasicOp, SpecialOp};
pub use operand::{Operand, Slot};
