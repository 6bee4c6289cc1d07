//! Operand Resolution and Stack Access.
//!
//! This module provides the interface between the core and memory for operand
//! access. It performs the following:
//! 1. **Fetch:** Reads instruction and next words at `PC`, advancing it.
//! 2. **Resolution:** Turns a decoded operand into a `Location`, applying `PUSH`/`POP` side effects.
//! 3. **Access:** Loads from and stores to a resolved location; stores to literals are ignored.
//! 4. **Stack:** Push and pop helpers used by `JSR`, `RFI` and interrupt entry.

use super::Cpu;
use crate::common::{Register, Word};
use crate::isa::Operand;

/// Storage a resolved operand refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    /// A general register.
    Register(Register),
    /// The stack pointer.
    Sp,
    /// The program counter.
    Pc,
    /// The overflow register.
    Ex,
    /// A memory word.
    Memory(Word),
    /// An immediate value; writes are discarded.
    Literal(Word),
}

impl Cpu {
    /// Reads the word at `PC` and advances `PC`.
    pub(crate) fn next_word(&mut self) -> Word {
        let word = self.memory.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        word
    }

    /// Resolves an operand to a location.
    ///
    /// Next-word operands consume the word at `PC`. `PUSH` pre-decrements and
    /// `POP` post-increments `SP`.
    pub(crate) fn resolve(&mut self, operand: Operand) -> Location {
        match operand {
            Operand::Register(r) => Location::Register(r),
            Operand::RegisterIndirect(r) => Location::Memory(self.regs.read(r)),
            Operand::RegisterOffset(r) => {
                let offset = self.next_word();
                Location::Memory(self.regs.read(r).wrapping_add(offset))
            }
            Operand::Push => {
                self.regs.sp = self.regs.sp.wrapping_sub(1);
                Location::Memory(self.regs.sp)
            }
            Operand::Pop => {
                let addr = self.regs.sp;
                self.regs.sp = addr.wrapping_add(1);
                Location::Memory(addr)
            }
            Operand::Peek => Location::Memory(self.regs.sp),
            Operand::Pick => {
                let offset = self.next_word();
                Location::Memory(self.regs.sp.wrapping_add(offset))
            }
            Operand::Sp => Location::Sp,
            Operand::Pc => Location::Pc,
            Operand::Ex => Location::Ex,
            Operand::Indirect => Location::Memory(self.next_word()),
            Operand::NextWord => Location::Literal(self.next_word()),
            Operand::Literal(v) => Location::Literal(v),
        }
    }

    /// Reads the value at a location.
    pub(crate) fn load(&self, loc: Location) -> Word {
        match loc {
            Location::Register(r) => self.regs.read(r),
            Location::Sp => self.regs.sp,
            Location::Pc => self.regs.pc,
            Location::Ex => self.regs.ex,
            Location::Memory(addr) => self.memory.read(addr),
            Location::Literal(v) => v,
        }
    }

    /// Writes a value to a location; literal locations ignore the write.
    pub(crate) fn store(&mut self, loc: Location, val: Word) {
        match loc {
            Location::Register(r) => self.regs.write(r, val),
            Location::Sp => self.regs.sp = val,
            Location::Pc => self.regs.pc = val,
            Location::Ex => self.regs.ex = val,
            Location::Memory(addr) => self.memory.write(addr, val),
            Location::Literal(_) => {}
        }
    }

    /// Pushes a word: `[--SP] = val`.
    pub(crate) fn push(&mut self, val: Word) {
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.memory.write(self.regs.sp, val);
    }

    /// Pops a word: `[SP++]`.
    pub(crate) fn pop(&mut self) -> Word {
        let val = self.memory.read(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        val
    }
}
