//! Device table (hardware interconnect).
//!
//! This module implements the ordered table of attached devices. It provides:
//! 1. **Registration:** Devices are appended in attachment order; the position is the
//!    hardware index programs use with `HWQ` and `HWI`.
//! 2. **Identity:** A device is identified by its allocation, so the same handle cannot be
//!    attached twice while distinct devices with equal metadata can.
//! 3. **Dispatch:** Lock helpers that recover from poisoned device mutexes.

use std::sync::{Arc, MutexGuard, PoisonError};

use crate::common::CpuError;
use crate::soc::traits::{Device, SharedDevice};

/// Returns `true` if both handles point at the same device allocation.
#[inline]
pub fn same_device(a: &SharedDevice, b: &SharedDevice) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Locks a device for a hook call.
///
/// A device whose previous hook panicked is still dispatched; its state is
/// whatever the panicking hook left behind.
pub fn lock_device(device: &SharedDevice) -> MutexGuard<'_, dyn Device + 'static> {
    device.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Ordered set of attached devices.
#[derive(Default)]
pub struct DeviceTable {
    devices: Vec<SharedDevice>,
}

impl DeviceTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a device and returns its hardware index.
    ///
    /// # Arguments
    ///
    /// * `device` - Handle to attach; the caller keeps its own clone.
    ///
    /// # Errors
    ///
    /// Returns `CpuError::InvalidDeviceOperation` if the same device is already attached.
    pub fn attach(&mut self, device: SharedDevice) -> Result<usize, CpuError> {
        if self.index_of(&device).is_some() {
            return Err(CpuError::InvalidDeviceOperation("device is already attached"));
        }
        self.devices.push(device);
        Ok(self.devices.len() - 1)
    }

    /// Removes a device; later devices move down one index.
    ///
    /// # Errors
    ///
    /// Returns `CpuError::InvalidDeviceOperation` if the device is not attached.
    pub fn detach(&mut self, device: &SharedDevice) -> Result<SharedDevice, CpuError> {
        let idx = self
            .index_of(device)
            .ok_or(CpuError::InvalidDeviceOperation("device is not attached"))?;
        Ok(self.devices.remove(idx))
    }

    /// Hardware index of an attached device.
    pub fn index_of(&self, device: &SharedDevice) -> Option<usize> {
        self.devices.iter().position(|d| same_device(d, device))
    }

    /// Device at a hardware index.
    pub fn get(&self, index: usize) -> Option<&SharedDevice> {
        self.devices.get(index)
    }

    /// Number of attached devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if no device is attached.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Iterates devices in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = &SharedDevice> {
        self.devices.iter()
    }
}

impl std::fmt::Debug for DeviceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for device in &self.devices {
            let _ = list.entry(&lock_device(device).info().name);
        }
        list.finish()
    }
}
