//! Hardware Devices.
//!
//! This module contains the reference device implementations that ship with
//! the engine. Further devices implement `Device` outside this crate.

/// Generic Clock (programmable 60 Hz tick source).
pub mod clock;

pub use clock::Clock;

pub use crate::soc::traits::Device;
