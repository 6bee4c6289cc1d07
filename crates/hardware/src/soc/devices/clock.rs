//! Generic Clock.
//!
//! A programmable tick source for the DCPU-16. The clock counts CPU cycles and
//! converts them into ticks at a rate of `60 / divider` ticks per second, using
//! the configured nominal clock rate.
//!
//! # HWI interface
//!
//! * `A = 0`: set the divider from `B` and reset the tick counter; `B = 0` stops the clock.
//! * `A = 1`: store the number of ticks since the last `A = 0` in `C`.
//! * `A = 2`: interrupt with message `B` on every tick; `B = 0` disables interrupts.

use crate::common::{Register, Word};
use crate::soc::traits::{Device, DeviceContext, DeviceInfo};

/// Hardware id of the Generic Clock.
pub const CLOCK_ID: u32 = 0x12d0_b402;
/// Manufacturer id reported by the Generic Clock.
pub const CLOCK_MANUFACTURER: u32 = 0x1c6c_8b36;
/// Hardware version of the Generic Clock.
pub const CLOCK_VERSION: u16 = 1;
/// Base tick rate in Hz for a divider of one.
const TICKS_PER_SECOND: u64 = 60;

/// Generic Clock device.
#[derive(Debug, Clone)]
pub struct Clock {
    info: DeviceInfo,
    /// CPU cycles per second used to derive tick timing.
    clock_hz: u64,
    /// Current divider; zero means stopped.
    divider: Word,
    /// Ticks since the last `A = 0`.
    ticks: Word,
    /// Interrupt message raised on every tick; zero disables.
    message: Word,
    /// Cycles elapsed since the last tick.
    counter: u64,
}

impl Clock {
    /// Creates a stopped clock.
    ///
    /// # Arguments
    ///
    /// * `clock_hz` - Nominal CPU clock rate, normally `Config::general.clock_hz`.
    pub fn new(clock_hz: u64) -> Self {
        Self {
            info: DeviceInfo::new(CLOCK_ID, CLOCK_MANUFACTURER, CLOCK_VERSION, "Generic Clock"),
            clock_hz,
            divider: 0,
            ticks: 0,
            message: 0,
            counter: 0,
        }
    }

    /// Cycles between two ticks at the current divider, or `None` while stopped.
    pub fn cycles_per_tick(&self) -> Option<u64> {
        if self.divider == 0 {
            return None;
        }
        Some((u64::from(self.divider).saturating_mul(self.clock_hz) / TICKS_PER_SECOND).max(1))
    }

    /// Ticks since the clock was last programmed.
    pub const fn ticks(&self) -> Word {
        self.ticks
    }

    /// Interrupt message raised on every tick, or zero.
    pub const fn message(&self) -> Word {
        self.message
    }
}

impl Device for Clock {
    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn info_mut(&mut self) -> &mut DeviceInfo {
        &mut self.info
    }

    fn on_interrupt(&mut self, ctx: &mut DeviceContext<'_>) {
        match ctx.register(Register::A) {
            0 => {
                self.divider = ctx.register(Register::B);
                self.ticks = 0;
                self.counter = 0;
                tracing::debug!(divider = self.divider, "clock reprogrammed");
            }
            1 => ctx.set_register(Register::C, self.ticks),
            2 => self.message = ctx.register(Register::B),
            _ => {}
        }
    }

    fn on_cycle(&mut self, ctx: &mut DeviceContext<'_>) {
        let Some(period) = self.cycles_per_tick() else {
            return;
        };
        self.counter += 1;
        if self.counter < period {
            return;
        }
        self.counter = 0;
        self.ticks = self.ticks.wrapping_add(1);
        if self.message != 0 {
            ctx.interrupt(self.message);
        }
    }
}
