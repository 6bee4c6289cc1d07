//! Operand value encodings.
//!
//! The `b` field is five bits wide and the `a` field six bits; the encodings
//! overlap except for code `0x18`, which means `PUSH` in `b` and `POP` in `a`,
//! and the inline literals `0x20-0x3f`, which only fit in `a`.

use std::fmt;

use crate::common::{Register, Word};

/// Which slot of an instruction an operand was decoded from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// The 6-bit source field (bits 10-15).
    A,
    /// The 5-bit destination field (bits 5-9).
    B,
}

/// A decoded operand.
///
/// Variants that need an extra word (`RegisterOffset`, `Pick`, `Indirect`,
/// `NextWord`) do not store it; the word is consumed from the instruction
/// stream when the operand is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// `0x00-0x07`: register.
    Register(Register),
    /// `0x08-0x0f`: `[register]`.
    RegisterIndirect(Register),
    /// `0x10-0x17`: `[register + next word]`.
    RegisterOffset(Register),
    /// `0x18` in `b`: `[--SP]`.
    Push,
    /// `0x18` in `a`: `[SP++]`.
    Pop,
    /// `0x19`: `[SP]`.
    Peek,
    /// `0x1a`: `[SP + next word]`.
    Pick,
    /// `0x1b`: `SP`.
    Sp,
    /// `0x1c`: `PC`.
    Pc,
    /// `0x1d`: `EX`.
    Ex,
    /// `0x1e`: `[next word]`.
    Indirect,
    /// `0x1f`: next word, as a literal.
    NextWord,
    /// `0x20-0x3f` in `a`: literal `-1..=30`.
    Literal(Word),
}

impl Operand {
    /// Decodes an operand field.
    ///
    /// # Arguments
    ///
    /// * `code` - The raw field; six bits for `a`, five bits for `b`.
    /// * `slot` - Which instruction slot the field came from.
    pub const fn decode(code: u16, slot: Slot) -> Self {
        match code {
            0x00..=0x07 => Self::Register(Register::from_bits(code)),
            0x08..=0x0f => Self::RegisterIndirect(Register::from_bits(code)),
            0x10..=0x17 => Self::RegisterOffset(Register::from_bits(code)),
            0x18 => match slot {
                Slot::A => Self::Pop,
                Slot::B => Self::Push,
            },
            0x19 => Self::Peek,
            0x1a => Self::Pick,
            0x1b => Self::Sp,
            0x1c => Self::Pc,
            0x1d => Self::Ex,
            0x1e => Self::Indirect,
            0x1f => Self::NextWord,
            _ => Self::Literal((code & 0x3f).wrapping_sub(0x21)),
        }
    }

    /// Returns `true` if resolving this operand consumes a word after the instruction.
    pub const fn uses_next_word(self) -> bool {
        matches!(
            self,
            Self::RegisterOffset(_) | Self::Pick | Self::Indirect | Self::NextWord
        )
    }

    /// Number of instruction-stream words this operand consumes (0 or 1).
    #[inline]
    pub const fn extra_words(self) -> u16 {
        self.uses_next_word() as u16
    }

    /// Extra cycles this operand adds to the instruction cost.
    #[inline]
    pub const fn extra_cycles(self) -> u64 {
        self.uses_next_word() as u64
    }

    /// Formats the operand, substituting `next` for the next-word value when known.
    pub fn render(self, next: Option<Word>) -> String {
        let nw = next.map_or_else(|| "?".to_string(), |w| format!("{w:#06x}"));
        match self {
            Self::Register(r) => r.name().to_string(),
            Self::RegisterIndirect(r) => format!("[{r}]"),
            Self::RegisterOffset(r) => format!("[{r} + {nw}]"),
            Self::Push => "PUSH".to_string(),
            Self::Pop => "POP".to_string(),
            Self::Peek => "PEEK".to_string(),
            Self::Pick => format!("PICK {nw}"),
            Self::Sp => "SP".to_string(),
            Self::Pc => "PC".to_string(),
            Self::Ex => "EX".to_string(),
            Self::Indirect => format!("[{nw}]"),
            Self::NextWord => nw,
            Self::Literal(v) => {
                if v == 0xffff {
                    "-1".to_string()
                } else {
                    v.to_string()
                }
            }
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}
