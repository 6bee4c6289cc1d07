//! DCPU-16 Instruction Decoder.
//!
//! This module splits a 16-bit instruction word into its opcode and operand
//! fields and produces a structured `Instruction`. Two layouts exist:
//!
//! * Basic: `aaaaaabbbbbooooo`, a 5-bit opcode with a 5-bit `b` and a 6-bit `a` operand.
//! * Special: `aaaaaaooooo00000`, a zero basic opcode, a 5-bit special opcode and an `a` operand.
//!
//! Next-word operands are not fetched here; the decoder only reports how many
//! words the instruction occupies so that callers can fetch or skip them.

use std::fmt;

use crate::common::Word;
use crate::isa::opcodes::{BasicOp, SpecialOp};
use crate::isa::operand::{Operand, Slot};

/// Bit mask for the basic opcode field (bits 0-4).
const OPCODE_MASK: Word = 0x1f;

/// Bit shift for the `b` operand field, which doubles as the special opcode.
const B_SHIFT: u32 = 5;

/// Bit mask for the `b` operand field (5 bits).
const B_MASK: Word = 0x1f;

/// Bit shift for the `a` operand field (bits 10-15).
const A_SHIFT: u32 = 10;

/// Bit mask for the `a` operand field (6 bits).
const A_MASK: Word = 0x3f;

/// Extracts the basic opcode field.
#[inline]
pub const fn opcode_field(word: Word) -> Word {
    word & OPCODE_MASK
}

/// Extracts the `b` operand field (or special opcode).
#[inline]
pub const fn b_field(word: Word) -> Word {
    (word >> B_SHIFT) & B_MASK
}

/// Extracts the `a` operand field.
#[inline]
pub const fn a_field(word: Word) -> Word {
    (word >> A_SHIFT) & A_MASK
}

/// A decoded DCPU-16 instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Two-operand instruction; the result is stored into `b`.
    Basic {
        /// Operation.
        op: BasicOp,
        /// Destination operand.
        b: Operand,
        /// Source operand.
        a: Operand,
    },
    /// One-operand instruction.
    Special {
        /// Operation.
        op: SpecialOp,
        /// The single operand.
        a: Operand,
    },
}

impl Instruction {
    /// Number of words the instruction occupies, including next-word operands.
    pub const fn length(&self) -> Word {
        match *self {
            Self::Basic { a, b, .. } => 1 + a.extra_words() + b.extra_words(),
            Self::Special { a, .. } => 1 + a.extra_words(),
        }
    }

    /// Cycle cost of executing the instruction, before any skip penalty.
    pub const fn cycles(&self) -> u64 {
        match *self {
            Self::Basic { op, a, b } => op.cycles() + a.extra_cycles() + b.extra_cycles(),
            Self::Special { op, a } => op.cycles() + a.extra_cycles(),
        }
    }

    /// Assembler mnemonic of the operation.
    pub const fn mnemonic(&self) -> &'static str {
        match *self {
            Self::Basic { op, .. } => op.mnemonic(),
            Self::Special { op, .. } => op.mnemonic(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { op, b, a } => write!(f, "{} {b}, {a}", op.mnemonic()),
            Self::Special { op, a } => write!(f, "{} {a}", op.mnemonic()),
        }
    }
}

/// Decodes a single instruction word.
///
/// # Arguments
///
/// * `word` - The instruction word fetched at `PC`.
///
/// # Returns
///
/// The decoded instruction, or `None` if the word uses a reserved basic or
/// special opcode (including the all-zero word).
pub const fn decode(word: Word) -> Option<Instruction> {
    let a = Operand::decode(a_field(word), Slot::A);
    let opcode = opcode_field(word);
    if opcode == 0 {
        match SpecialOp::from_code(b_field(word)) {
            Some(op) => Some(Instruction::Special { op, a }),
            None => None,
        }
    } else {
        match BasicOp::from_code(opcode) {
            Some(op) => Some(Instruction::Basic {
                op,
                b: Operand::decode(b_field(word), Slot::B),
                a,
            }),
            None => None,
        }
    }
}

/// Length in words of the instruction starting with `word`, from its operand fields alone.
///
/// Used when skipping: the length is computed even for reserved opcodes, and
/// no operand is evaluated.
pub const fn instruction_length(word: Word) -> Word {
    let a = Operand::decode(a_field(word), Slot::A).extra_words();
    if opcode_field(word) == 0 {
        1 + a
    } else {
        1 + a + Operand::decode(b_field(word), Slot::B).extra_words()
    }
}
