//! Execution units and functional components.
//!
//! The DCPU-16 has a single functional unit, the ALU; the core performs
//! operand resolution and writeback around it.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;
