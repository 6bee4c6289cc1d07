//! Object Units.
//!
//! An object unit is the output of assembling one translation unit: its code
//! and three label tables. This module provides:
//! 1. **Construction:** `ObjectUnit::new`, `ObjectUnit::from_code` and a fluent builder.
//! 2. **Validation:** Every table is checked against the code when the unit is built, so
//!    the linker only ever sees consistent units.
//! 3. **Interchange:** Units serialize with serde; deserializing runs the same validation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::Word;
use crate::error::{LinkError, UnitError};

/// One assembled translation unit.
///
/// Local addresses are indices into `code`. Units are immutable once built;
/// the linker reads them and never modifies them, so a unit can be linked any
/// number of times.
///
/// # Examples
///
/// ```
/// use dcpu16_linker::ObjectUnit;
///
/// // start: SET PC, start
/// let unit = ObjectUnit::builder()
///     .code([0x7f81, 0x0000])
///     .export("start", 0)
///     .uses(1)
///     .build()
///     .unwrap();
/// assert_eq!(unit.exported_labels()["start"], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawObjectUnit")]
pub struct ObjectUnit {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    priority: i32,
    code: Vec<Word>,
    exported_labels: BTreeMap<String, Word>,
    imported_labels: BTreeMap<Word, String>,
    used_labels: BTreeSet<Word>,
}

impl ObjectUnit {
    /// Creates a unit from its code and label tables.
    ///
    /// # Arguments
    ///
    /// * `code` - The unit's words; local address = index.
    /// * `exported_labels` - Label name to local address.
    /// * `imported_labels` - Local address of a placeholder word to the imported name.
    /// * `used_labels` - Local addresses of words holding the local address of a
    ///   label of this unit.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::MalformedUnit` if any address is outside the code,
    /// a self-reference targets an address outside the code, or a position is
    /// both used and imported.
    pub fn new(
        code: Vec<Word>,
        exported_labels: BTreeMap<String, Word>,
        imported_labels: BTreeMap<Word, String>,
        used_labels: BTreeSet<Word>,
    ) -> Result<Self, LinkError> {
        let unit = Self {
            name: None,
            priority: 0,
            code,
            exported_labels,
            imported_labels,
            used_labels,
        };
        unit.validate()?;
        Ok(unit)
    }

    /// Creates a unit with no labels.
    pub fn from_code(code: impl Into<Vec<Word>>) -> Self {
        Self {
            name: None,
            priority: 0,
            code: code.into(),
            exported_labels: BTreeMap::new(),
            imported_labels: BTreeMap::new(),
            used_labels: BTreeSet::new(),
        }
    }

    /// Starts a fluent builder.
    pub fn builder() -> ObjectUnitBuilder {
        ObjectUnitBuilder::default()
    }

    /// The unit's code, before relocation.
    pub fn code(&self) -> &[Word] {
        &self.code
    }

    /// Label name to local address.
    pub const fn exported_labels(&self) -> &BTreeMap<String, Word> {
        &self.exported_labels
    }

    /// Placeholder position to imported name.
    pub const fn imported_labels(&self) -> &BTreeMap<Word, String> {
        &self.imported_labels
    }

    /// Positions of self-references.
    pub const fn used_labels(&self) -> &BTreeSet<Word> {
        &self.used_labels
    }

    /// Diagnostic name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Placement key for `PlacementPolicy::Priority`; higher is placed first.
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Length of the code in words.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// Returns `true` if the unit has no code.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Returns the unit with a diagnostic name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the unit with a placement priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn validate(&self) -> Result<(), UnitError> {
        let len = self.code.len();
        let in_range = |address: Word| (address as usize) < len;

        for (name, &address) in &self.exported_labels {
            if !in_range(address) {
                return Err(UnitError::ExportOutOfRange {
                    name: name.clone(),
                    address,
                    len,
                });
            }
        }
        for (&address, name) in &self.imported_labels {
            if !in_range(address) {
                return Err(UnitError::ImportOutOfRange {
                    name: name.clone(),
                    address,
                    len,
                });
            }
        }
        for &address in &self.used_labels {
            let Some(&target) = self.code.get(address as usize) else {
                return Err(UnitError::UseOutOfRange { address, len });
            };
            if !in_range(target) {
                return Err(UnitError::UseTargetOutOfRange {
                    address,
                    target,
                    len,
                });
            }
            if self.imported_labels.contains_key(&address) {
                return Err(UnitError::UseAndImportOverlap { address });
            }
        }
        Ok(())
    }
}

/// Fluent builder for `ObjectUnit`.
///
/// Tables are collected as given, so repeated exports or imports are reported
/// by `build` instead of silently replacing earlier entries.
#[derive(Clone, Debug, Default)]
pub struct ObjectUnitBuilder {
    name: Option<String>,
    priority: i32,
    code: Vec<Word>,
    exports: Vec<(String, Word)>,
    imports: Vec<(Word, String)>,
    used: BTreeSet<Word>,
}

impl ObjectUnitBuilder {
    /// Sets the code.
    #[must_use]
    pub fn code(mut self, code: impl Into<Vec<Word>>) -> Self {
        self.code = code.into();
        self
    }

    /// Exports `name` at local address `address`.
    #[must_use]
    pub fn export(mut self, name: impl Into<String>, address: Word) -> Self {
        self.exports.push((name.into(), address));
        self
    }

    /// Marks `address` as a placeholder for the import of `name`.
    #[must_use]
    pub fn import(mut self, address: Word, name: impl Into<String>) -> Self {
        self.imports.push((address, name.into()));
        self
    }

    /// Marks `address` as a self-reference.
    #[must_use]
    pub fn uses(mut self, address: Word) -> Self {
        let _ = self.used.insert(address);
        self
    }

    /// Sets the diagnostic name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the placement priority.
    #[must_use]
    pub const fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Validates the tables and builds the unit.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::MalformedUnit` for a repeated export name or import
    /// position, and for every inconsistency `ObjectUnit::new` rejects.
    pub fn build(self) -> Result<ObjectUnit, LinkError> {
        let exported_labels = export_table(self.exports)?;
        let imported_labels = import_table(self.imports)?;
        let unit = ObjectUnit::new(self.code, exported_labels, imported_labels, self.used)?;
        Ok(ObjectUnit {
            name: self.name,
            priority: self.priority,
            ..unit
        })
    }
}

/// Builds the export table, rejecting a name given twice.
fn export_table(
    entries: impl IntoIterator<Item = (String, Word)>,
) -> Result<BTreeMap<String, Word>, UnitError> {
    let mut table = BTreeMap::new();
    for (name, address) in entries {
        if table.contains_key(&name) {
            return Err(UnitError::DuplicateExport { name });
        }
        let _ = table.insert(name, address);
    }
    Ok(table)
}

/// Builds the import table, rejecting a position given twice.
fn import_table(
    entries: impl IntoIterator<Item = (Word, String)>,
) -> Result<BTreeMap<Word, String>, UnitError> {
    let mut table = BTreeMap::new();
    for (address, name) in entries {
        if table.insert(address, name).is_some() {
            return Err(UnitError::DuplicateImport { address });
        }
    }
    Ok(table)
}

/// Unvalidated wire form of an object unit.
///
/// Label tables are read as entry lists so that a key repeated in the
/// input reaches the duplicate checks instead of replacing the earlier entry.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawObjectUnit {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    priority: i32,
    code: Vec<Word>,
    #[serde(default, deserialize_with = "map_entries")]
    exported_labels: Vec<(String, Word)>,
    #[serde(default, deserialize_with = "map_entries")]
    imported_labels: Vec<(Word, String)>,
    #[serde(default)]
    used_labels: BTreeSet<Word>,
}

/// Reads a map as its entries, in input order, keeping repeated keys.
fn map_entries<'de, D, K, V>(deserializer: D) -> Result<Vec<(K, V)>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    struct Entries<K, V>(PhantomData<(K, V)>);

    impl<'de, K, V> Visitor<'de> for Entries<K, V>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
    {
        type Value = Vec<(K, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a label table")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(Entries(PhantomData))
}

impl TryFrom<RawObjectUnit> for ObjectUnit {
    type Error = UnitError;

    fn try_from(raw: RawObjectUnit) -> Result<Self, Self::Error> {
        let unit = Self {
            name: raw.name,
            priority: raw.priority,
            code: raw.code,
            exported_labels: export_table(raw.exported_labels)?,
            imported_labels: import_table(raw.imported_labels)?,
            used_labels: raw.used_labels,
        };
        unit.validate()?;
        Ok(unit)
    }
}
