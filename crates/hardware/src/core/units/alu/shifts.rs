//! ALU shift operations.
//!
//! Shift amounts are full 16-bit words. Amounts of 16 or more shift every bit
//! out of the value; `EX` captures the bits shifted across the word boundary.

use super::AluResult;
use crate::common::Word;

/// `SHR`: logical right shift; `EX = ((b << 16) >> a)`.
pub fn shr(b: Word, a: Word) -> AluResult {
    let wide = (b as u32) << 16;
    let shifted = wide.checked_shr(a as u32).unwrap_or(0);
    AluResult::with_ex((shifted >> 16) as Word, shifted as Word)
}

/// `ASR`: arithmetic right shift; `EX = ((b << 16) >>> a)`.
pub fn asr(b: Word, a: Word) -> AluResult {
    let value = (b as i16) >> a.min(15);
    let ex = ((b as u32) << 16).checked_shr(a as u32).unwrap_or(0);
    AluResult::with_ex(value as Word, ex as Word)
}

/// `SHL`: left shift; `EX = ((b << a) >> 16)`.
pub fn shl(b: Word, a: Word) -> AluResult {
    let shifted = (b as u64).checked_shl(a as u32).unwrap_or(0);
    AluResult::with_ex(shifted as Word, (shifted >> 16) as Word)
}
