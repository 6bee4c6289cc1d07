//! Main Execution Loop.
//!
//! This module implements the execution cycle of the CPU. It performs the following:
//! 1. **Interrupt Handling:** Services one pending interrupt before each instruction.
//! 2. **Instruction Execution:** Fetches, decodes, resolves operands (`a` before `b`),
//!    computes through the ALU and writes back.
//! 3. **Timing Management:** Charges the instruction's cycle cost, including skip penalties,
//!    and ticks every attached device once per elapsed cycle.
//! 4. **Hardware Access:** Implements `HWN`, `HWQ` and `HWI` against the device table.

use tracing::{trace, warn};

use super::memory::Location;
use super::{Cpu, RunState};
use crate::common::{CpuError, MEMORY_WORDS, Register, Word};
use crate::core::units::alu::Alu;
use crate::isa::decode::{decode, instruction_length, opcode_field};
use crate::isa::disasm::disassemble;
use crate::isa::opcodes::is_conditional_code;
use crate::isa::{BasicOp, Instruction, Operand, SpecialOp};
use crate::soc::DeviceContext;
use crate::soc::interconnect::lock_device;

impl Cpu {
    /// Executes one instruction.
    ///
    /// A pending interrupt is serviced first if queueing is off, so the
    /// instruction executed may be the first one of the handler.
    ///
    /// # Returns
    ///
    /// The number of cycles the instruction took, including next-word operand
    /// costs and the penalty for skipped instructions.
    ///
    /// # Errors
    ///
    /// * `CpuError::NotReady` if no program has been flashed.
    /// * `CpuError::Halted` if the core is halted.
    /// * `CpuError::IllegalInstruction` if the word at `PC` is not a valid
    ///   instruction; the core halts with `PC` still pointing at it.
    /// * `CpuError::InterruptQueueFull` if `INT` or a device raised an
    ///   interrupt that the `Fail` overflow policy rejected. The instruction
    ///   and its cycles have completed in that case and the core keeps running.
    pub fn step(&mut self) -> Result<u64, CpuError> {
        match self.state {
            RunState::Halted => return Err(CpuError::Halted),
            RunState::Idle => return Err(CpuError::NotReady),
            RunState::Ready => {}
        }

        self.service_interrupt();

        let pc = self.regs.pc;
        let word = self.memory.read(pc);
        let Some(inst) = decode(word) else {
            self.state = RunState::Halted;
            warn!(word, pc, "illegal instruction, cpu halted");
            return Err(CpuError::IllegalInstruction { word, pc });
        };
        if self.trace {
            self.trace_instruction(pc);
        }
        self.regs.pc = pc.wrapping_add(1);

        let mut cycles = inst.cycles();
        let mut deferred = Ok(());
        match inst {
            Instruction::Basic { op, b, a } => cycles += self.execute_basic(op, b, a),
            Instruction::Special { op, a } => deferred = self.execute_special(op, a),
        }
        self.stats.instructions_retired += 1;

        let ticked = self.advance_cycles(cycles);
        deferred.and(ticked).map(|()| cycles)
    }

    /// Steps until at least `cycle_budget` cycles have elapsed.
    ///
    /// # Returns
    ///
    /// The number of cycles spent, which may exceed the budget by the cost of
    /// the last instruction.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error reported by `step`.
    pub fn run(&mut self, cycle_budget: u64) -> Result<u64, CpuError> {
        let mut spent = 0;
        while spent < cycle_budget {
            spent += self.step()?;
        }
        Ok(spent)
    }

    fn trace_instruction(&self, pc: Word) {
        let words = [
            self.memory.read(pc),
            self.memory.read(pc.wrapping_add(1)),
            self.memory.read(pc.wrapping_add(2)),
        ];
        trace!(cycle = self.stats.cycles, "{pc:#06x}: {}", disassemble(&words));
    }

    /// Executes a basic instruction; returns the skip penalty in cycles.
    fn execute_basic(&mut self, op: BasicOp, b: Operand, a: Operand) -> u64 {
        let src = self.resolve(a);
        let dst = self.resolve(b);
        let av = self.load(src);
        let bv = self.load(dst);

        if op.is_conditional() {
            return if Alu::condition(op, bv, av) {
                0
            } else {
                self.skip()
            };
        }

        if let Some(result) = Alu::execute(op, bv, av, self.regs.ex) {
            // An explicit write to EX overrides the EX side effect.
            match result.ex {
                Some(ex) if dst != Location::Ex => self.regs.ex = ex,
                _ => {}
            }
            self.store(dst, result.value);
        }

        match op {
            BasicOp::Sti => self.advance_index_registers(1),
            BasicOp::Std => self.advance_index_registers(Word::MAX),
            _ => {}
        }
        0
    }

    /// Adds `delta` (modulo 65536) to `I` and `J`.
    fn advance_index_registers(&mut self, delta: Word) {
        for reg in [Register::I, Register::J] {
            let val = self.regs.read(reg).wrapping_add(delta);
            self.regs.write(reg, val);
        }
    }

    /// Skips the instruction at `PC`, and every instruction after a skipped conditional.
    ///
    /// Operands of skipped instructions are not evaluated. Returns the number
    /// of instructions skipped, which is also the cycle penalty.
    fn skip(&mut self) -> u64 {
        let mut skipped = 0;
        // Bounded so that memory filled with conditionals cannot spin forever.
        for _ in 0..MEMORY_WORDS {
            let word = self.memory.read(self.regs.pc);
            self.regs.pc = self.regs.pc.wrapping_add(instruction_length(word));
            skipped += 1;
            if !is_conditional_code(opcode_field(word)) {
                break;
            }
        }
        self.stats.instructions_skipped += skipped;
        skipped
    }

    /// Executes a special instruction.
    fn execute_special(&mut self, op: SpecialOp, a: Operand) -> Result<(), CpuError> {
        let loc = self.resolve(a);
        let value = self.load(loc);
        match op {
            SpecialOp::Jsr => {
                self.push(self.regs.pc);
                self.regs.pc = value;
            }
            SpecialOp::Int => return self.queue_interrupt(value),
            SpecialOp::Iag => self.store(loc, self.regs.ia),
            SpecialOp::Ias => self.regs.ia = value,
            SpecialOp::Rfi => self.return_from_interrupt(),
            SpecialOp::Iaq => self.queueing = value != 0,
            SpecialOp::Hwn => {
                let count = Word::try_from(self.devices.len()).unwrap_or(Word::MAX);
                self.store(loc, count);
            }
            SpecialOp::Hwq => self.query_device(value),
            SpecialOp::Hwi => return self.interrupt_device(value),
        }
        Ok(())
    }

    /// `HWQ`: loads identification of device `index` into `A`, `B`, `C`, `X`, `Y`.
    ///
    /// An absent index loads zeros.
    fn query_device(&mut self, index: Word) {
        let info = self
            .devices
            .get(index as usize)
            .map(|device| lock_device(device).info().clone())
            .unwrap_or_default();
        self.regs.write(Register::A, info.id as Word);
        self.regs.write(Register::B, (info.id >> 16) as Word);
        self.regs.write(Register::C, info.version);
        self.regs.write(Register::X, info.manufacturer as Word);
        self.regs.write(Register::Y, (info.manufacturer >> 16) as Word);
    }

    /// `HWI`: calls `on_interrupt` of device `index`; an absent index is a no-op.
    fn interrupt_device(&mut self, index: Word) -> Result<(), CpuError> {
        let Some(device) = self.devices.get(index as usize).cloned() else {
            trace!(index, "hwi to absent device ignored");
            return Ok(());
        };
        let mut raised = Vec::new();
        {
            let mut ctx = DeviceContext::new(
                &mut self.regs,
                &mut self.memory,
                &mut raised,
                self.stats.cycles,
            );
            lock_device(&device).on_interrupt(&mut ctx);
        }
        self.stats.hardware_interrupts += 1;
        self.enqueue_raised(raised)
    }

    /// Advances the cycle counter, calling `on_cycle` of every device once per cycle.
    fn advance_cycles(&mut self, cycles: u64) -> Result<(), CpuError> {
        if self.devices.is_empty() {
            self.stats.cycles += cycles;
            return Ok(());
        }
        let mut raised = Vec::new();
        for _ in 0..cycles {
            self.stats.cycles += 1;
            let mut ctx = DeviceContext::new(
                &mut self.regs,
                &mut self.memory,
                &mut raised,
                self.stats.cycles,
            );
            for device in self.devices.iter() {
                lock_device(device).on_cycle(&mut ctx);
            }
        }
        self.enqueue_raised(raised)
    }
}
