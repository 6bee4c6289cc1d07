//! ALU arithmetic operations.
//!
//! Operands are widened before computing so that carry, borrow and the high
//! half of products are observable; results are truncated back to 16 bits.
//! Division by zero never traps: the result and `EX` are zero.

use super::AluResult;
use crate::common::Word;
use crate::common::constants::{EX_OVERFLOW, EX_UNDERFLOW};

/// Interprets a word as a two's complement signed value.
#[inline]
const fn signed(w: Word) -> i32 {
    w as i16 as i32
}

/// `ADD`: `EX` is 1 on carry, 0 otherwise.
pub const fn add(b: Word, a: Word) -> AluResult {
    let sum = b as u32 + a as u32;
    AluResult::with_ex(sum as Word, if sum > 0xffff { EX_OVERFLOW } else { 0 })
}

/// `SUB`: `EX` is 0xffff on borrow, 0 otherwise.
pub const fn sub(b: Word, a: Word) -> AluResult {
    let diff = b as i32 - a as i32;
    AluResult::with_ex(diff as Word, if diff < 0 { EX_UNDERFLOW } else { 0 })
}

/// `MUL`: unsigned; `EX` receives the high word.
pub const fn mul(b: Word, a: Word) -> AluResult {
    let product = b as u32 * a as u32;
    AluResult::with_ex(product as Word, (product >> 16) as Word)
}

/// `MLI`: signed; `EX` receives the high word.
pub const fn mli(b: Word, a: Word) -> AluResult {
    let product = signed(b) * signed(a);
    AluResult::with_ex(product as Word, (product >> 16) as Word)
}

/// `DIV`: unsigned; `EX` receives the fractional part `((b << 16) / a)`.
pub const fn div(b: Word, a: Word) -> AluResult {
    if a == 0 {
        return AluResult::with_ex(0, 0);
    }
    let frac = ((b as u32) << 16) / a as u32;
    AluResult::with_ex(b / a, frac as Word)
}

/// `DVI`: signed, rounding toward zero.
pub const fn dvi(b: Word, a: Word) -> AluResult {
    if a == 0 {
        return AluResult::with_ex(0, 0);
    }
    // i64 keeps -32768 / -1 and the shifted dividend in range.
    let (b, a) = (signed(b) as i64, signed(a) as i64);
    AluResult::with_ex((b / a) as Word, ((b << 16) / a) as Word)
}

/// `MOD`: unsigned remainder; zero divisor yields zero.
pub const fn modulo(b: Word, a: Word) -> AluResult {
    if a == 0 {
        return AluResult::value(0);
    }
    AluResult::value(b % a)
}

/// `MDI`: signed remainder with the sign of `b`; zero divisor yields zero.
pub const fn mdi(b: Word, a: Word) -> AluResult {
    if a == 0 {
        return AluResult::value(0);
    }
    AluResult::value((signed(b) % signed(a)) as Word)
}

/// `ADX`: `b + a + EX`; `EX` is 1 on carry, 0 otherwise.
pub const fn adx(b: Word, a: Word, ex: Word) -> AluResult {
    let sum = b as u32 + a as u32 + ex as u32;
    AluResult::with_ex(sum as Word, if sum > 0xffff { EX_OVERFLOW } else { 0 })
}

/// `SBX`: `b - a + EX`; `EX` is 0xffff on borrow, 1 on carry, 0 otherwise.
pub const fn sbx(b: Word, a: Word, ex: Word) -> AluResult {
    let r = b as i32 - a as i32 + ex as i32;
    let ex = if r < 0 {
        EX_UNDERFLOW
    } else if r > 0xffff {
        EX_OVERFLOW
    } else {
        0
    };
    AluResult::with_ex(r as Word, ex)
}
