//! DCPU-16 relocating linker.
//!
//! This crate merges independently assembled object units into one flat image
//! that a DCPU-16 loads at address 0. It provides:
//! 1. **Object Units:** Code plus export, import and self-reference tables, validated on
//!    construction and exchangeable as JSON.
//! 2. **Linking:** Placement, symbol collection, relocation and concatenation, either all
//!    at once or not at all.
//! 3. **Configuration:** Placement policy and address space size.
//!
//! # Examples
//!
//! ```
//! use dcpu16_linker::{ObjectUnit, link};
//!
//! // SET A, 5 ; SET PC, start
//! let main = ObjectUnit::builder()
//!     .code([0x7c01, 0x0005, 0x7f81, 0x0000])
//!     .import(3, "start")
//!     .build()
//!     .unwrap();
//! // start: SET PC, start
//! let lib = ObjectUnit::builder()
//!     .code([0x7f81, 0x0000])
//!     .export("start", 0)
//!     .uses(1)
//!     .build()
//!     .unwrap();
//!
//! let image = link(&[main, lib]).unwrap();
//! assert_eq!(image.words(), [0x7c01, 0x0005, 0x7f81, 0x0004, 0x7f81, 0x0004]);
//! assert_eq!(image.symbol("start"), Some(4));
//! ```

/// Linker configuration (placement policy, address space).
pub mod config;
/// Object unit and link error definitions.
pub mod error;
/// Placement, symbol resolution and relocation.
pub mod linker;
/// Object units and their builder.
pub mod object;

pub use crate::config::{LinkerConfig, PlacementPolicy};
pub use crate::error::{LinkError, UnitError};
pub use crate::linker::{LinkedImage, Linker, Placement, link};
pub use crate::object::{ObjectUnit, ObjectUnitBuilder};

/// A 16-bit DCPU-16 word.
pub type Word = u16;

/// Number of words a 16-bit address reaches.
pub const ADDRESS_SPACE: usize = 0x1_0000;
