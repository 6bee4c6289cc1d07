//! Execution engine error definitions.
//!
//! This module defines the failure modes of the DCPU-16 engine. It provides:
//! 1. **Load Errors:** Images that do not fit into the 64K-word memory.
//! 2. **Device Errors:** Invalid attach/detach requests against the device table.
//! 3. **Execution Errors:** Illegal instructions, which halt the core, and stepping a core
//!    that is halted or has no program.
//! 4. **Interrupt Errors:** Queue overflow under the `Fail` overflow policy.

use thiserror::Error;

use super::constants::Word;

/// Errors reported by the DCPU-16 execution engine.
///
/// Every error is reported synchronously to the caller of the operation that
/// detected it. `IllegalInstruction` is the only condition that changes engine
/// state (it halts the core); all other errors leave the engine untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CpuError {
    /// The image passed to `flash` is longer than main memory.
    #[error("image of {len} words does not fit into {capacity} words of memory")]
    ImageTooLarge {
        /// Length of the rejected image in words.
        len: usize,
        /// Memory capacity in words.
        capacity: usize,
    },

    /// A device was attached twice, or a device that is not attached was detached.
    #[error("invalid device operation: {0}")]
    InvalidDeviceOperation(&'static str),

    /// The word at `pc` does not encode a valid opcode; the core is now halted.
    #[error("illegal instruction {word:#06x} at {pc:#06x}")]
    IllegalInstruction {
        /// The undecodable instruction word.
        word: Word,
        /// Address the word was fetched from.
        pc: Word,
    },

    /// The interrupt queue is full and the overflow policy rejects new messages.
    #[error("interrupt queue full ({capacity} pending), message {message:#06x} rejected")]
    InterruptQueueFull {
        /// The rejected interrupt message.
        message: Word,
        /// Configured queue capacity.
        capacity: usize,
    },

    /// The core is halted; only `reset` makes it steppable again.
    #[error("cpu is halted")]
    Halted,

    /// No program has been flashed since construction or the last reset.
    #[error("cpu has no program loaded")]
    NotReady,
}
