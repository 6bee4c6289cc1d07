//! Architectural constants for the DCPU-16.
//!
//! Fixed by DCPU-16 1.7; shared by the execution engine, the device layer and
//! the configuration defaults.

/// A 16-bit machine word; the unit of every register, memory cell and operand.
pub type Word = u16;

/// Number of addressable words in main memory (64K words).
pub const MEMORY_WORDS: usize = 0x1_0000;

/// Number of general-purpose registers (`A`, `B`, `C`, `X`, `Y`, `Z`, `I`, `J`).
pub const GENERAL_REGISTER_COUNT: usize = 8;

/// Maximum number of pending interrupts the hardware queue holds.
///
/// Real hardware catches fire past this depth; the engine applies the
/// configured overflow policy instead.
pub const INTERRUPT_QUEUE_CAPACITY: usize = 256;

/// Nominal DCPU-16 clock rate in cycles per second.
pub const CLOCK_HZ: u64 = 100_000;

/// Value stored in `EX` when an addition carries out of 16 bits.
pub const EX_OVERFLOW: Word = 0x0001;

/// Value stored in `EX` when a subtraction borrows.
pub const EX_UNDERFLOW: Word = 0xFFFF;
