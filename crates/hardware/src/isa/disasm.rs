//! Instruction Disassembler for the DCPU-16.
//!
//! Converts an instruction word, plus the words following it, into assembler
//! text for debug tracing, logging, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use dcpu16_hardware::isa::disasm::disassemble;
//! assert_eq!(disassemble(&[0x7c01, 0x0030]), "SET A, 0x0030");
//! assert_eq!(disassemble(&[0x0000]), "DAT 0x0000");
//! ```

use crate::common::Word;
use crate::isa::decode::{Instruction, decode};
use crate::isa::operand::Operand;

/// Disassembles the instruction at the start of `words`.
///
/// Next-word operands are taken from the following elements in the order the
/// CPU consumes them (`a` first, then `b`); missing words render as `?`.
/// Reserved encodings render as a `DAT` directive.
pub fn disassemble(words: &[Word]) -> String {
    let Some(&word) = words.first() else {
        return String::new();
    };
    let Some(inst) = decode(word) else {
        return format!("DAT {word:#06x}");
    };

    let mut rest = words.iter().skip(1).copied();
    let mut take = |op: Operand| {
        if op.uses_next_word() {
            rest.next()
        } else {
            None
        }
    };

    match inst {
        Instruction::Basic { op, b, a } => {
            let a_text = a.render(take(a));
            let b_text = b.render(take(b));
            format!("{} {b_text}, {a_text}", op.mnemonic())
        }
        Instruction::Special { op, a } => format!("{} {}", op.mnemonic(), a.render(take(a))),
    }
}
