//! Common utilities and types used throughout the DCPU-16 engine.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the engine. It includes:
//! 1. **Constants:** The word type, memory size, queue depth and nominal clock rate.
//! 2. **Error Handling:** The `CpuError` taxonomy reported by engine operations.
//! 3. **Register Management:** The `Register` enum and the `RegisterFile`.

/// Architectural constants and the `Word` type.
pub mod constants;

/// Error types reported by the execution engine.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{MEMORY_WORDS, Word};
pub use error::CpuError;
pub use reg::{Register, RegisterFile};
