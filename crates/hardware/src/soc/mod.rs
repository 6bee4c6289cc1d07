//! System-on-Chip (SoC) Components.
//!
//! This module organizes the components around the core: main memory, the
//! device contract, the device table, and the reference devices.

/// Reference hardware devices.
pub mod devices;

/// Ordered device table.
pub mod interconnect;

/// Main memory.
pub mod memory;

/// Device trait and hook context.
pub mod traits;

pub use interconnect::DeviceTable;
pub use memory::Memory;
pub use traits::{Device, DeviceContext, DeviceInfo, SharedDevice, shared};
