//! DCPU-16 Register File.
//!
//! This module provides the `RegisterFile` struct holding the full programmer-visible
//! register state of the DCPU-16. It provides:
//! 1. **General Registers:** Eight 16-bit registers addressed through the `Register` enum.
//! 2. **Special Registers:** `PC`, `SP`, `EX`, and the interrupt address register `IA`.
//! 3. **Observability:** A dump helper for debugging register state during simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::{GENERAL_REGISTER_COUNT, Word};

/// One of the eight general-purpose registers.
///
/// The discriminant is the 3-bit register index used by operand encodings
/// `0x00-0x07`, `0x08-0x0f` and `0x10-0x17`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    /// Register `A`; receives the interrupt message on handler entry.
    A = 0,
    /// Register `B`.
    B = 1,
    /// Register `C`.
    C = 2,
    /// Register `X`.
    X = 3,
    /// Register `Y`.
    Y = 4,
    /// Register `Z`.
    Z = 5,
    /// Register `I`; incremented by `STI`, decremented by `STD`.
    I = 6,
    /// Register `J`; incremented by `STI`, decremented by `STD`.
    J = 7,
}

impl Register {
    /// All general registers in encoding order.
    pub const ALL: [Self; GENERAL_REGISTER_COUNT] = [
        Self::A,
        Self::B,
        Self::C,
        Self::X,
        Self::Y,
        Self::Z,
        Self::I,
        Self::J,
    ];

    /// Maps a 3-bit register field to its register.
    ///
    /// Only the low three bits of `bits` are considered.
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self::ALL[(bits & 0x7) as usize]
    }

    /// Returns the index of this register in the register file.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the assembler mnemonic of this register.
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::I => "I",
            Self::J => "J",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Complete register state of a DCPU-16 core.
///
/// Every register is a `Word`, so `pc` and `sp` always index into the
/// 64K-word memory and all updates wrap modulo 65536.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterFile {
    gpr: [Word; GENERAL_REGISTER_COUNT],
    /// Program counter.
    pub pc: Word,
    /// Stack pointer; the stack grows downwards from `0xffff`.
    pub sp: Word,
    /// Extra/overflow register written by arithmetic and shift instructions.
    pub ex: Word,
    /// Interrupt address; zero means software interrupts are discarded.
    pub ia: Word,
}

impl RegisterFile {
    /// Creates a register file with every register set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register.
    #[inline]
    pub const fn read(&self, reg: Register) -> Word {
        self.gpr[reg.index()]
    }

    /// Writes a general-purpose register.
    #[inline]
    pub const fn write(&mut self, reg: Register, val: Word) {
        self.gpr[reg.index()] = val;
    }

    /// Returns all general registers in encoding order.
    pub const fn general(&self) -> &[Word; GENERAL_REGISTER_COUNT] {
        &self.gpr
    }

    /// Zeroes every register, including `IA`.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
