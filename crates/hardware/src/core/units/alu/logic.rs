//! ALU conditional tests.
//!
//! Bitwise AND/BOR/XOR are single expressions and live in the dispatcher;
//! this module holds the eight `IF*` comparisons.

use crate::common::Word;
use crate::isa::BasicOp;

/// Evaluates an `IF*` condition.
///
/// `IFA` and `IFU` compare as signed 16-bit values; the other comparisons are
/// unsigned. Non-conditional opcodes return `true`.
pub const fn condition(op: BasicOp, b: Word, a: Word) -> bool {
    match op {
        BasicOp::Ifb => (b & a) != 0,
        BasicOp::Ifc => (b & a) == 0,
        BasicOp::Ife => b == a,
        BasicOp::Ifn => b != a,
        BasicOp::Ifg => b > a,
        BasicOp::Ifa => (b as i16) > (a as i16),
        BasicOp::Ifl => b < a,
        BasicOp::Ifu => (b as i16) < (a as i16),
        _ => true,
    }
}
