//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the value computation of every basic DCPU-16
//! instruction. Operand resolution and writeback are done by the core; the
//! ALU is a set of pure functions over words.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: ADD, SUB, MUL, MLI, DIV, DVI, MOD, MDI, ADX, SBX
//! - [`logic`]:      AND, BOR, XOR and the IF* conditions
//! - [`shifts`]:     SHR, ASR, SHL

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical operations and conditional tests.
pub mod logic;

/// Shift operations.
pub mod shifts;

use crate::common::Word;
use crate::isa::BasicOp;

/// Result of an ALU operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AluResult {
    /// Value written back to operand `b`.
    pub value: Word,
    /// New value of `EX`, for operations that define one.
    pub ex: Option<Word>,
}

impl AluResult {
    /// Result that leaves `EX` untouched.
    pub const fn value(value: Word) -> Self {
        Self { value, ex: None }
    }

    /// Result that also sets `EX`.
    pub const fn with_ex(value: Word, ex: Word) -> Self {
        Self {
            value,
            ex: Some(ex),
        }
    }
}

/// Arithmetic Logic Unit for the DCPU-16 basic instructions.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes a value-producing basic operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation; conditionals are handled by [`Alu::condition`].
    /// * `b` - Current value of the destination operand.
    /// * `a` - Value of the source operand.
    /// * `ex` - Current value of `EX` (read by `ADX` and `SBX`).
    ///
    /// # Returns
    ///
    /// The value to store into `b` and the new `EX`, if any. `None` for
    /// conditional opcodes, which produce no value.
    ///
    /// # Examples
    ///
    /// ```
    /// use dcpu16_hardware::core::units::alu::{Alu, AluResult};
    /// use dcpu16_hardware::isa::BasicOp;
    ///
    /// assert_eq!(Alu::execute(BasicOp::Add, 0xffff, 2, 0), Some(AluResult::with_ex(1, 1)));
    /// assert_eq!(Alu::execute(BasicOp::Ife, 1, 1, 0), None);
    /// ```
    pub fn execute(op: BasicOp, b: Word, a: Word, ex: Word) -> Option<AluResult> {
        Some(match op {
            BasicOp::Set | BasicOp::Sti | BasicOp::Std => AluResult::value(a),
            BasicOp::Add => arithmetic::add(b, a),
            BasicOp::Sub => arithmetic::sub(b, a),
            BasicOp::Mul => arithmetic::mul(b, a),
            BasicOp::Mli => arithmetic::mli(b, a),
            BasicOp::Div => arithmetic::div(b, a),
            BasicOp::Dvi => arithmetic::dvi(b, a),
            BasicOp::Mod => arithmetic::modulo(b, a),
            BasicOp::Mdi => arithmetic::mdi(b, a),
            BasicOp::Adx => arithmetic::adx(b, a, ex),
            BasicOp::Sbx => arithmetic::sbx(b, a, ex),
            BasicOp::And => AluResult::value(b & a),
            BasicOp::Bor => AluResult::value(b | a),
            BasicOp::Xor => AluResult::value(b ^ a),
            BasicOp::Shr => shifts::shr(b, a),
            BasicOp::Asr => shifts::asr(b, a),
            BasicOp::Shl => shifts::shl(b, a),
            BasicOp::Ifb
            | BasicOp::Ifc
            | BasicOp::Ife
            | BasicOp::Ifn
            | BasicOp::Ifg
            | BasicOp::Ifa
            | BasicOp::Ifl
            | BasicOp::Ifu => return None,
        })
    }

    /// Evaluates an `IF*` condition; `true` means the next instruction runs.
    ///
    /// Non-conditional opcodes always return `true`.
    pub const fn condition(op: BasicOp, b: Word, a: Word) -> bool {
        logic::condition(op, b, a)
    }
}
