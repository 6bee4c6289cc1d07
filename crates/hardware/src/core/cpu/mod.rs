//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Maintains registers, the run state and the cycle counter.
//! 2. **Program Loading:** Flashes images into memory and resets the core.
//! 3. **Interrupt Queue:** Holds pending messages and the queueing flag.
//! 4. **System Integration:** Owns the device table through which hardware is attached.

/// Instruction execution and device dispatch.
pub mod execution;

/// Interrupt queue and handler entry.
pub mod interrupt;

/// Operand resolution and stack access.
pub mod memory;

use tracing::debug;

use self::interrupt::InterruptQueue;
use crate::common::{CpuError, RegisterFile, Word};
use crate::config::Config;
use crate::soc::interconnect::lock_device;
use crate::soc::{DeviceTable, Memory, SharedDevice};
use crate::stats::CpuStats;

/// Lifecycle state of a CPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    /// Constructed or reset; no program has been flashed.
    #[default]
    Idle,
    /// A program is loaded and the core can be stepped.
    Ready,
    /// Stopped by an illegal instruction or `halt`; only `reset` leaves this state.
    Halted,
}

/// Main CPU structure containing all processor state.
///
/// Each `Cpu` is an independent value; any number of instances can coexist,
/// and an instance can be moved to another thread.
#[derive(Debug)]
pub struct Cpu {
    /// General registers and `PC`, `SP`, `EX`, `IA`.
    pub regs: RegisterFile,
    /// Main memory.
    pub(crate) memory: Memory,
    /// Pending interrupt messages.
    pub(crate) interrupts: InterruptQueue,
    /// Interrupt queueing flag; while set, pending interrupts are held back.
    pub(crate) queueing: bool,
    /// Attached devices in hardware index order.
    pub(crate) devices: DeviceTable,
    /// Execution statistics, including the cycle counter.
    pub(crate) stats: CpuStats,
    /// Lifecycle state.
    pub(crate) state: RunState,
    /// Enable instruction tracing.
    pub trace: bool,
}

impl Cpu {
    /// Creates a new CPU with zeroed registers and memory.
    ///
    /// # Arguments
    ///
    /// * `config` - Engine configuration; fixes the interrupt queue capacity and overflow policy.
    ///
    /// # Returns
    ///
    /// A `Cpu` in the `Idle` state with no devices attached.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            memory: Memory::new(),
            interrupts: InterruptQueue::new(
                config.interrupts.queue_capacity,
                config.interrupts.overflow_policy,
            ),
            queueing: false,
            devices: DeviceTable::new(),
            stats: CpuStats::default(),
            state: RunState::Idle,
            trace: config.general.trace_instructions,
        }
    }

    /// Loads a program image at address 0.
    ///
    /// Memory past the image, registers and devices are left untouched. An
    /// `Idle` core becomes `Ready`; a `Halted` core stays halted.
    ///
    /// # Arguments
    ///
    /// * `image` - Program words, typically a linked image.
    ///
    /// # Errors
    ///
    /// Returns `CpuError::ImageTooLarge` if the image exceeds 0x10000 words;
    /// memory is unchanged in that case.
    pub fn flash(&mut self, image: &[Word]) -> Result<(), CpuError> {
        self.memory.load(image)?;
        if self.state == RunState::Idle {
            self.state = RunState::Ready;
        }
        debug!(words = image.len(), state = ?self.state, "flashed image");
        Ok(())
    }

    /// Returns the core to its power-on state.
    ///
    /// Registers (including `IA`), memory, the cycle counter, statistics, the
    /// interrupt queue and the queueing flag are cleared. Attached devices stay
    /// attached and are not notified.
    pub fn reset(&mut self) {
        self.regs.clear();
        self.memory.clear();
        self.interrupts.clear();
        self.queueing = false;
        self.stats = CpuStats::default();
        self.state = RunState::Idle;
        debug!(devices = self.devices.len(), "cpu reset");
    }

    /// Attaches a device and returns its hardware index.
    ///
    /// # Errors
    ///
    /// Returns `CpuError::InvalidDeviceOperation` if the same device is already attached.
    pub fn attach_device(&mut self, device: SharedDevice) -> Result<usize, CpuError> {
        let name = device_name(&device);
        let index = self.devices.attach(device)?;
        debug!(index, device = %name, "device attached");
        Ok(index)
    }

    /// Detaches a device; devices attached after it move down one index.
    ///
    /// # Errors
    ///
    /// Returns `CpuError::InvalidDeviceOperation` if the device is not attached.
    pub fn detach_device(&mut self, device: &SharedDevice) -> Result<(), CpuError> {
        let removed = self.devices.detach(device)?;
        debug!(device = %device_name(&removed), "device detached");
        Ok(())
    }

    /// Stops the core; further `step` calls fail with `CpuError::Halted`.
    pub fn halt(&mut self) {
        if self.state != RunState::Halted {
            debug!(pc = self.regs.pc, "cpu halted");
        }
        self.state = RunState::Halted;
    }

    /// Lifecycle state.
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Cycles elapsed since construction or the last reset.
    pub const fn cycles(&self) -> u64 {
        self.stats.cycles
    }

    /// Execution statistics.
    pub const fn stats(&self) -> &CpuStats {
        &self.stats
    }

    /// Reads a word of main memory.
    pub fn read_memory(&self, addr: Word) -> Word {
        self.memory.read(addr)
    }

    /// Writes a word of main memory.
    pub fn write_memory(&mut self, addr: Word, val: Word) {
        self.memory.write(addr, val);
    }

    /// Main memory.
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Number of attached devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Hardware index of an attached device.
    pub fn device_index(&self, device: &SharedDevice) -> Option<usize> {
        self.devices.index_of(device)
    }

    /// Whether interrupt queueing is on (set by `IAQ` and during handlers).
    pub const fn interrupt_queueing(&self) -> bool {
        self.queueing
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

fn device_name(device: &SharedDevice) -> String {
    lock_device(device).name().to_string()
}
