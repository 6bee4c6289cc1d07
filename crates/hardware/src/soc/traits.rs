//! Device trait for DCPU-16 hardware.
//!
//! This module defines the contract implemented by every attachable device. It provides:
//! 1. **Identification:** `DeviceInfo` with the id, manufacturer, version and name reported by `HWQ`.
//! 2. **Hooks:** `on_interrupt` for `HWI` and `on_cycle` for every elapsed CPU cycle.
//! 3. **Context:** `DeviceContext`, the window through which a hook touches CPU state.
//! 4. **Sharing:** `SharedDevice`, the handle type the caller and the CPU both hold.
//!
//! All implementors must be `Send` so that a `Cpu` can be moved to another thread.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::common::{Register, RegisterFile, Word};
use crate::soc::memory::Memory;

/// Identification block of a device, as reported by `HWQ`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Hardware id (32 bits, split into `A`/`B` by `HWQ`).
    pub id: u32,
    /// Manufacturer id (32 bits, split into `X`/`Y` by `HWQ`).
    pub manufacturer: u32,
    /// Hardware version (`C` after `HWQ`).
    pub version: u16,
    /// Human-readable name; not visible to programs.
    pub name: String,
}

impl DeviceInfo {
    /// Creates an identification block.
    pub fn new(id: u32, manufacturer: u32, version: u16, name: impl Into<String>) -> Self {
        Self {
            id,
            manufacturer,
            version,
            name: name.into(),
        }
    }
}

/// Access to CPU state granted to a device hook for the duration of one call.
///
/// The context exposes registers, memory and the cycle counter, and collects
/// interrupts raised by the device. It never exposes the device table, so a
/// hook cannot attach, detach or call other devices.
#[derive(Debug)]
pub struct DeviceContext<'a> {
    regs: &'a mut RegisterFile,
    memory: &'a mut Memory,
    raised: &'a mut Vec<Word>,
    cycle: u64,
}

impl<'a> DeviceContext<'a> {
    /// Creates a context over the given CPU state.
    ///
    /// # Arguments
    ///
    /// * `regs` - Register file the hook may read and modify.
    /// * `memory` - Main memory the hook may read and modify.
    /// * `raised` - Sink for interrupt messages raised by the hook.
    /// * `cycle` - Current value of the cycle counter.
    pub const fn new(
        regs: &'a mut RegisterFile,
        memory: &'a mut Memory,
        raised: &'a mut Vec<Word>,
        cycle: u64,
    ) -> Self {
        Self {
            regs,
            memory,
            raised,
            cycle,
        }
    }

    /// Reads a general register.
    pub const fn register(&self, reg: Register) -> Word {
        self.regs.read(reg)
    }

    /// Writes a general register.
    pub const fn set_register(&mut self, reg: Register, val: Word) {
        self.regs.write(reg, val);
    }

    /// Full register file, including `PC`, `SP`, `EX` and `IA`.
    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut *self.regs
    }

    /// Reads a word of main memory.
    pub fn read_memory(&self, addr: Word) -> Word {
        self.memory.read(addr)
    }

    /// Writes a word of main memory.
    pub fn write_memory(&mut self, addr: Word, val: Word) {
        self.memory.write(addr, val);
    }

    /// Raises an interrupt with `message` towards the CPU.
    ///
    /// The message is queued after the hook returns, subject to the overflow policy.
    pub fn interrupt(&mut self, message: Word) {
        self.raised.push(message);
    }

    /// Cycle counter at the time of the call.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }
}

/// Trait for hardware devices attached to a DCPU-16.
///
/// Both hooks run synchronously and to completion inside `Cpu::step`.
/// Devices that model latency do so by counting `on_cycle` calls.
pub trait Device: Send {
    /// Identification block reported by `HWQ`.
    fn info(&self) -> &DeviceInfo;

    /// Mutable identification block, for owners that reprogram a device's identity.
    fn info_mut(&mut self) -> &mut DeviceInfo;

    /// Handles an `HWI` addressed to this device.
    fn on_interrupt(&mut self, ctx: &mut DeviceContext<'_>);

    /// Advances device state by one CPU cycle.
    fn on_cycle(&mut self, _ctx: &mut DeviceContext<'_>) {}

    /// Short name for logs; defaults to `info().name`.
    fn name(&self) -> &str {
        &self.info().name
    }
}

/// Handle through which a device is shared between its owner and the CPU.
pub type SharedDevice = Arc<Mutex<dyn Device>>;

/// Wraps a device into a `SharedDevice`.
pub fn shared<D: Device + 'static>(device: D) -> SharedDevice {
    Arc::new(Mutex::new(device))
}
