//! Instruction encoders for hand-assembled test programs.

use dcpu16_hardware::Word;

/// Basic opcodes.
pub mod op {
    pub const SET: u16 = 0x01;
    pub const ADD: u16 = 0x02;
    pub const SUB: u16 = 0x03;
    pub const MUL: u16 = 0x04;
    pub const DIV: u16 = 0x06;
    pub const ADX: u16 = 0x1a;
    pub const IFE: u16 = 0x12;
    pub const IFN: u16 = 0x13;
    pub const IFG: u16 = 0x14;
    pub const STI: u16 = 0x1e;
    pub const STD: u16 = 0x1f;
}

/// Special opcodes.
pub mod sp {
    pub const JSR: u16 = 0x01;
    pub const INT: u16 = 0x08;
    pub const IAG: u16 = 0x09;
    pub const IAS: u16 = 0x0a;
    pub const RFI: u16 = 0x0b;
    pub const IAQ: u16 = 0x0c;
    pub const HWN: u16 = 0x10;
    pub const HWQ: u16 = 0x11;
    pub const HWI: u16 = 0x12;
}

/// Operand value codes.
pub mod val {
    pub const A: u16 = 0x00;
    pub const B: u16 = 0x01;
    pub const C: u16 = 0x02;
    pub const X: u16 = 0x03;
    pub const I: u16 = 0x06;
    pub const J: u16 = 0x07;
    pub const PUSH_POP: u16 = 0x18;
    pub const PEEK: u16 = 0x19;
    pub const PICK: u16 = 0x1a;
    pub const SP: u16 = 0x1b;
    pub const PC: u16 = 0x1c;
    pub const EX: u16 = 0x1d;
    pub const IND_NEXT: u16 = 0x1e;
    pub const NEXT: u16 = 0x1f;

    /// `[register]`
    pub const fn ind(reg: u16) -> u16 {
        0x08 + reg
    }

    /// `[register + next word]`
    pub const fn off(reg: u16) -> u16 {
        0x10 + reg
    }
}

/// Encodes a basic instruction `op b, a`.
pub const fn basic(op: u16, b: u16, a: u16) -> Word {
    (a << 10) | (b << 5) | op
}

/// Encodes a special instruction `op a`.
pub const fn special(op: u16, a: u16) -> Word {
    (a << 10) | (op << 5)
}

/// Operand code of an inline literal in `-1..=30`.
pub const fn lit(n: i16) -> u16 {
    (n + 0x21) as u16
}

/// Fluent builder for test programs.
#[derive(Debug, Default, Clone)]
pub struct Program {
    words: Vec<Word>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a basic instruction followed by its next words (`a`'s first).
    pub fn basic(mut self, op: u16, b: u16, a: u16, next: &[Word]) -> Self {
        self.words.push(basic(op, b, a));
        self.words.extend_from_slice(next);
        self
    }

    /// Appends a special instruction followed by its next word, if any.
    pub fn special(mut self, op: u16, a: u16, next: &[Word]) -> Self {
        self.words.push(special(op, a));
        self.words.extend_from_slice(next);
        self
    }

    /// Pads with zero words up to `addr`.
    pub fn org(mut self, addr: usize) -> Self {
        assert!(addr >= self.words.len(), "org moves backwards");
        self.words.resize(addr, 0);
        self
    }

    /// Current length, i.e. the address of the next instruction.
    pub fn here(&self) -> Word {
        self.words.len() as Word
    }

    pub fn build(self) -> Vec<Word> {
        self.words
    }
}
