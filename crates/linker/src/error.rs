//! Linker error definitions.
//!
//! This module defines the failure modes of object unit construction and linking. It provides:
//! 1. **Unit Errors:** Inconsistent label tables, rejected when a unit is built.
//! 2. **Symbol Errors:** Exports defined twice and imports that nothing exports.
//! 3. **Layout Errors:** Images that do not fit into the target address space.

use thiserror::Error;

use crate::Word;

/// Why an object unit's label tables were rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UnitError {
    /// An export points past the end of the code.
    #[error("export `{name}` at {address:#06x} is outside the {len}-word code")]
    ExportOutOfRange {
        /// Exported label.
        name: String,
        /// Local address of the label.
        address: Word,
        /// Length of the unit's code.
        len: usize,
    },

    /// An import placeholder lies past the end of the code.
    #[error("import of `{name}` at {address:#06x} is outside the {len}-word code")]
    ImportOutOfRange {
        /// Imported label.
        name: String,
        /// Local address of the placeholder word.
        address: Word,
        /// Length of the unit's code.
        len: usize,
    },

    /// A self-reference lies past the end of the code.
    #[error("label use at {address:#06x} is outside the {len}-word code")]
    UseOutOfRange {
        /// Local address of the referencing word.
        address: Word,
        /// Length of the unit's code.
        len: usize,
    },

    /// The word at a self-reference names a target past the end of the code.
    #[error("label use at {address:#06x} targets {target:#06x}, outside the {len}-word code")]
    UseTargetOutOfRange {
        /// Local address of the referencing word.
        address: Word,
        /// Local target address stored in that word.
        target: Word,
        /// Length of the unit's code.
        len: usize,
    },

    /// A position is both a self-reference and an import placeholder.
    #[error("position {address:#06x} is both a label use and an import")]
    UseAndImportOverlap {
        /// The conflicting local address.
        address: Word,
    },

    /// The same name is exported twice.
    #[error("label `{name}` is exported twice")]
    DuplicateExport {
        /// The repeated label.
        name: String,
    },

    /// The same position is given two imports.
    #[error("position {address:#06x} is imported twice")]
    DuplicateImport {
        /// The repeated local address.
        address: Word,
    },
}

/// Errors reported by the linker.
///
/// Linking is atomic: when any of these is returned no image has been produced
/// and the input units are untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LinkError {
    /// An object unit's label tables are inconsistent.
    #[error("malformed object unit: {0}")]
    MalformedUnit(#[from] UnitError),

    /// Two units export the same name.
    #[error("symbol `{name}` is exported by unit {first} and unit {second}")]
    DuplicateSymbol {
        /// The contested symbol.
        name: String,
        /// Input index of the unit that exported it first.
        first: usize,
        /// Input index of the unit that exported it again.
        second: usize,
    },

    /// An import names a symbol that no unit exports.
    #[error("unresolved symbol `{name}` imported by unit {unit} at {address:#06x}")]
    UnresolvedSymbol {
        /// The missing symbol.
        name: String,
        /// Input index of the importing unit.
        unit: usize,
        /// Local address of the placeholder in that unit.
        address: Word,
    },

    /// The units together are larger than the address space.
    #[error("image needs {required} words but the address space holds {available}")]
    AddressSpaceOverflow {
        /// Total words of all units.
        required: usize,
        /// Configured address space in words.
        available: usize,
    },
}
