//! Execution statistics collection and reporting.
//!
//! This module tracks counters for a DCPU-16 core. It provides:
//! 1. **Cycles and CPI:** Total cycles, retired instructions, and derived cycles per instruction.
//! 2. **Control flow:** Instructions skipped by failed conditionals.
//! 3. **Interrupts:** Serviced, discarded (no handler installed), and dropped (queue overflow).
//! 4. **Hardware:** `HWI` dispatches to attached devices.

use std::fmt;

use serde::Serialize;

/// Execution statistics of one CPU instance.
///
/// All counters are cleared by `Cpu::reset`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CpuStats {
    /// Total cycles elapsed; this is the CPU's cycle counter.
    pub cycles: u64,
    /// Number of instructions executed to completion.
    pub instructions_retired: u64,
    /// Number of instructions skipped by failed `IF*` conditionals.
    pub instructions_skipped: u64,
    /// Interrupts delivered to the handler at `IA`.
    pub interrupts_serviced: u64,
    /// Interrupts dequeued while `IA` was zero.
    pub interrupts_discarded: u64,
    /// Interrupts lost to the queue overflow policy.
    pub interrupts_dropped: u64,
    /// `HWI` instructions that reached an attached device.
    pub hardware_interrupts: u64,
}

impl CpuStats {
    /// Average cycles per retired instruction, or `0.0` before the first instruction.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }
}

impl fmt::Display for CpuStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "DCPU-16 EXECUTION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        writeln!(f, "sim_cpi                  {:.4}", self.cpi())?;
        writeln!(f, "insts.skipped            {}", self.instructions_skipped)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "INTERRUPTS")?;
        writeln!(f, "  irq.serviced           {}", self.interrupts_serviced)?;
        writeln!(f, "  irq.discarded          {}", self.interrupts_discarded)?;
        writeln!(f, "  irq.dropped            {}", self.interrupts_dropped)?;
        writeln!(f, "  hwi.dispatched         {}", self.hardware_interrupts)?;
        write!(f, "==========================================================")
    }
}
