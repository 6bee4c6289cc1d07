//! DCPU-16 opcode tables.
//!
//! Basic instructions carry their opcode in the low five bits of the
//! instruction word; special instructions have a zero basic opcode and carry
//! their opcode in bits 5-9. Each opcode knows its mnemonic and its base cycle
//! cost; operand costs are added separately by the decoder.

/// Basic (two-operand) opcodes, `aaaaaabbbbbooooo`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BasicOp {
    /// `SET b, a`: b = a.
    Set = 0x01,
    /// `ADD b, a`: b = b + a, EX = carry.
    Add = 0x02,
    /// `SUB b, a`: b = b - a, EX = borrow.
    Sub = 0x03,
    /// `MUL b, a`: unsigned multiply, EX = high word.
    Mul = 0x04,
    /// `MLI b, a`: signed multiply, EX = high word.
    Mli = 0x05,
    /// `DIV b, a`: unsigned divide, EX = fractional part.
    Div = 0x06,
    /// `DVI b, a`: signed divide rounding toward zero.
    Dvi = 0x07,
    /// `MOD b, a`: unsigned remainder.
    Mod = 0x08,
    /// `MDI b, a`: signed remainder, sign of b.
    Mdi = 0x09,
    /// `AND b, a`.
    And = 0x0a,
    /// `BOR b, a`.
    Bor = 0x0b,
    /// `XOR b, a`.
    Xor = 0x0c,
    /// `SHR b, a`: logical shift right.
    Shr = 0x0d,
    /// `ASR b, a`: arithmetic shift right.
    Asr = 0x0e,
    /// `SHL b, a`: shift left.
    Shl = 0x0f,
    /// `IFB b, a`: execute next if `(b & a) != 0`.
    Ifb = 0x10,
    /// `IFC b, a`: execute next if `(b & a) == 0`.
    Ifc = 0x11,
    /// `IFE b, a`: execute next if `b == a`.
    Ife = 0x12,
    /// `IFN b, a`: execute next if `b != a`.
    Ifn = 0x13,
    /// `IFG b, a`: execute next if `b > a` (unsigned).
    Ifg = 0x14,
    /// `IFA b, a`: execute next if `b > a` (signed).
    Ifa = 0x15,
    /// `IFL b, a`: execute next if `b < a` (unsigned).
    Ifl = 0x16,
    /// `IFU b, a`: execute next if `b < a` (signed).
    Ifu = 0x17,
    /// `ADX b, a`: b = b + a + EX.
    Adx = 0x1a,
    /// `SBX b, a`: b = b - a + EX.
    Sbx = 0x1b,
    /// `STI b, a`: b = a, then increment I and J.
    Sti = 0x1e,
    /// `STD b, a`: b = a, then decrement I and J.
    Std = 0x1f,
}

impl BasicOp {
    /// Decodes a 5-bit basic opcode; returns `None` for reserved encodings.
    pub const fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            0x01 => Self::Set,
            0x02 => Self::Add,
            0x03 => Self::Sub,
            0x04 => Self::Mul,
            0x05 => Self::Mli,
            0x06 => Self::Div,
            0x07 => Self::Dvi,
            0x08 => Self::Mod,
            0x09 => Self::Mdi,
            0x0a => Self::And,
            0x0b => Self::Bor,
            0x0c => Self::Xor,
            0x0d => Self::Shr,
            0x0e => Self::Asr,
            0x0f => Self::Shl,
            0x10 => Self::Ifb,
            0x11 => Self::Ifc,
            0x12 => Self::Ife,
            0x13 => Self::Ifn,
            0x14 => Self::Ifg,
            0x15 => Self::Ifa,
            0x16 => Self::Ifl,
            0x17 => Self::Ifu,
            0x1a => Self::Adx,
            0x1b => Self::Sbx,
            0x1e => Self::Sti,
            0x1f => Self::Std,
            _ => return None,
        })
    }

    /// Base cycle cost, excluding operand words and skip penalties.
    pub const fn cycles(self) -> u64 {
        match self {
            Self::Set | Self::And | Self::Bor | Self::Xor | Self::Shr | Self::Asr | Self::Shl => 1,
            Self::Add
            | Self::Sub
            | Self::Mul
            | Self::Mli
            | Self::Ifb
            | Self::Ifc
            | Self::Ife
            | Self::Ifn
            | Self::Ifg
            | Self::Ifa
            | Self::Ifl
            | Self::Ifu
            | Self::Sti
            | Self::Std => 2,
            Self::Div | Self::Dvi | Self::Mod | Self::Mdi | Self::Adx | Self::Sbx => 3,
        }
    }

    /// Returns `true` for the `IF*` family.
    pub const fn is_conditional(self) -> bool {
        is_conditional_code(self as u16)
    }

    /// Assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Set => "SET",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Mli => "MLI",
            Self::Div => "DIV",
            Self::Dvi => "DVI",
            Self::Mod => "MOD",
            Self::Mdi => "MDI",
            Self::And => "AND",
            Self::Bor => "BOR",
            Self::Xor => "XOR",
            Self::Shr => "SHR",
            Self::Asr => "ASR",
            Self::Shl => "SHL",
            Self::Ifb => "IFB",
            Self::Ifc => "IFC",
            Self::Ife => "IFE",
            Self::Ifn => "IFN",
            Self::Ifg => "IFG",
            Self::Ifa => "IFA",
            Self::Ifl => "IFL",
            Self::Ifu => "IFU",
            Self::Adx => "ADX",
            Self::Sbx => "SBX",
            Self::Sti => "STI",
            Self::Std => "STD",
        }
    }
}

/// Returns `true` if a raw basic opcode field names an `IF*` instruction.
///
/// Used when skipping, where the skipped word is never fully decoded.
#[inline]
pub const fn is_conditional_code(code: u16) -> bool {
    matches!(code, 0x10..=0x17)
}

/// Special (one-operand) opcodes, `aaaaaaooooo00000`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialOp {
    /// `JSR a`: push the return address, jump to a.
    Jsr = 0x01,
    /// `INT a`: raise a software interrupt with message a.
    Int = 0x08,
    /// `IAG a`: a = IA.
    Iag = 0x09,
    /// `IAS a`: IA = a.
    Ias = 0x0a,
    /// `RFI a`: return from interrupt handler.
    Rfi = 0x0b,
    /// `IAQ a`: enable interrupt queueing if a is non-zero.
    Iaq = 0x0c,
    /// `HWN a`: a = number of attached devices.
    Hwn = 0x10,
    /// `HWQ a`: query identification of device a.
    Hwq = 0x11,
    /// `HWI a`: send a hardware interrupt to device a.
    Hwi = 0x12,
}

impl SpecialOp {
    /// Decodes a 5-bit special opcode; returns `None` for reserved encodings.
    pub const fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            0x01 => Self::Jsr,
            0x08 => Self::Int,
            0x09 => Self::Iag,
            0x0a => Self::Ias,
            0x0b => Self::Rfi,
            0x0c => Self::Iaq,
            0x10 => Self::Hwn,
            0x11 => Self::Hwq,
            0x12 => Self::Hwi,
            _ => return None,
        })
    }

    /// Base cycle cost, excluding operand words.
    pub const fn cycles(self) -> u64 {
        match self {
            Self::Iag | Self::Ias => 1,
            Self::Iaq | Self::Hwn => 2,
            Self::Jsr | Self::Rfi => 3,
            Self::Int | Self::Hwq | Self::Hwi => 4,
        }
    }

    /// Assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Jsr => "JSR",
            Self::Int => "INT",
            Self::Iag => "IAG",
            Self::Ias => "IAS",
            Self::Rfi => "RFI",
            Self::Iaq => "IAQ",
            Self::Hwn => "HWN",
            Self::Hwq => "HWQ",
            Self::Hwi => "HWI",
        }
    }
}
