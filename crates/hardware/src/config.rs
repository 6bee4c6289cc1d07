//! Configuration system for the DCPU-16 engine.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the engine. It provides:
//! 1. **Defaults:** Baseline hardware constants (clock rate, interrupt queue depth).
//! 2. **Structures:** Hierarchical config for general settings and interrupt delivery.
//! 3. **Enums:** The interrupt queue overflow policy.
//!
//! Configuration is supplied as JSON through `Config::from_json`, or use `Config::default()`.

use serde::Deserialize;

/// Default configuration constants for the engine.
///
/// These values define the baseline hardware configuration when not
/// explicitly overridden in JSON configuration.
mod defaults {
    use crate::common::constants;

    /// Nominal CPU clock rate used by cycle-counting devices (100 kHz).
    pub const CLOCK_HZ: u64 = constants::CLOCK_HZ;

    /// Interrupt queue depth (256 messages, the DCPU-16 1.7 limit).
    pub const QUEUE_CAPACITY: usize = constants::INTERRUPT_QUEUE_CAPACITY;
}

/// What the engine does with an interrupt that arrives while the queue is full.
///
/// The policy is fixed per CPU instance at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Keep the queue as it is and discard the incoming message.
    DropNewest,
    /// Discard the oldest pending message to make room for the incoming one.
    DropOldest,
    /// Reject the incoming message with `CpuError::InterruptQueueFull`.
    #[default]
    #[serde(alias = "error")]
    Fail,
}

/// Root configuration for a DCPU-16 instance.
///
/// Every section and field is optional in JSON; missing values take the
/// defaults documented on each field.
///
/// # Examples
///
/// ```
/// use dcpu16_hardware::config::{Config, OverflowPolicy};
///
/// let json = r#"{
///     "general": { "trace_instructions": true },
///     "interrupts": { "queue_capacity": 16, "overflow_policy": "drop_oldest" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.clock_hz, 100_000);
/// assert_eq!(config.interrupts.queue_capacity, 16);
/// assert_eq!(config.interrupts.overflow_policy, OverflowPolicy::DropOldest);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General engine settings
    pub general: GeneralConfig,
    /// Interrupt queue settings
    pub interrupts: InterruptConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document is malformed or a field
    /// has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// General engine settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `trace`-level disassembly line for every executed instruction.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Nominal clock rate in Hz; devices convert wall-time rates into cycle counts with it.
    #[serde(default = "GeneralConfig::default_clock_hz")]
    pub clock_hz: u64,
}

impl GeneralConfig {
    fn default_clock_hz() -> u64 {
        defaults::CLOCK_HZ
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: cfg!(feature = "always-trace"),
            clock_hz: defaults::CLOCK_HZ,
        }
    }
}

/// Interrupt queue configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct InterruptConfig {
    /// Maximum number of pending interrupt messages.
    #[serde(default = "InterruptConfig::default_queue_capacity")]
    pub queue_capacity: usize,

    /// Behavior when a message arrives at a full queue.
    #[serde(default)]
    pub overflow_policy: OverflowPolicy,
}

impl InterruptConfig {
    fn default_queue_capacity() -> usize {
        defaults::QUEUE_CAPACITY
    }
}

impl Default for InterruptConfig {
    fn default() -> Self {
        Self {
            queue_capacity: defaults::QUEUE_CAPACITY,
            overflow_policy: OverflowPolicy::default(),
        }
    }
}
