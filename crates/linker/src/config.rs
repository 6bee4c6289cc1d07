//! Linker configuration.
//!
//! This module defines how units are laid out in the final image. It provides:
//! 1. **Defaults:** Sequential placement into the full 64K-word address space.
//! 2. **Placement Policy:** Input order, or descending unit priority.
//! 3. **Limits:** The address space the image must fit, clamped to what a DCPU-16 can address.
//!
//! Configuration is supplied as JSON through `LinkerConfig::from_json`, or use `LinkerConfig::default()`.

use serde::Deserialize;

/// Default configuration constants for the linker.
mod defaults {
    /// Words addressable by a 16-bit address.
    pub const ADDRESS_SPACE: usize = crate::ADDRESS_SPACE;
}

/// Order in which units are placed into the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// First unit at offset 0, each next unit right after the previous, in input order.
    #[default]
    Sequential,
    /// Units sorted by descending priority; equal priorities keep input order.
    Priority,
}

/// Linker configuration.
///
/// # Examples
///
/// ```
/// use dcpu16_linker::{LinkerConfig, PlacementPolicy};
///
/// let config = LinkerConfig::from_json(r#"{ "placement": "priority" }"#).unwrap();
/// assert_eq!(config.placement, PlacementPolicy::Priority);
/// assert_eq!(config.address_space, 0x10000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// Placement order of units.
    pub placement: PlacementPolicy,
    /// Size of the target address space in words; values above 0x10000 are clamped.
    pub address_space: usize,
}

impl LinkerConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document is malformed or a field
    /// has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Address space actually available to the image.
    pub fn available_words(&self) -> usize {
        self.address_space.min(defaults::ADDRESS_SPACE)
    }
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            placement: PlacementPolicy::default(),
            address_space: defaults::ADDRESS_SPACE,
        }
    }
}
