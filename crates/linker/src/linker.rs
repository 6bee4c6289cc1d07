//! Relocating Linker.
//!
//! This module merges object units into one flat image. It performs the following:
//! 1. **Placement:** Assigns every unit a base offset according to the placement policy.
//! 2. **Symbol Table:** Collects every export at its absolute address, rejecting duplicates.
//! 3. **Relocation:** Rewrites self-references to `offset + target` and fills every import
//!    placeholder with the address of the matching export.
//! 4. **Concatenation:** Writes the relocated code of each unit at its offset, with no gaps.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::Word;
use crate::config::{LinkerConfig, PlacementPolicy};
use crate::error::LinkError;
use crate::object::ObjectUnit;

/// Where one unit landed in a linked image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Index of the unit in the linker input.
    pub unit: usize,
    /// Diagnostic name of the unit, if it had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Absolute address of the unit's first word.
    pub offset: usize,
    /// Length of the unit in words.
    pub len: usize,
}

/// Result of a successful link.
///
/// Besides the flat image, it carries the absolute address of every export
/// and the placement of every unit, for link maps and debugging.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedImage {
    words: Vec<Word>,
    symbols: BTreeMap<String, Word>,
    placements: Vec<Placement>,
}

impl LinkedImage {
    /// The fully resolved image, ready for `flash`.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Consumes the image and returns its words.
    pub fn into_words(self) -> Vec<Word> {
        self.words
    }

    /// Absolute address of every exported symbol.
    pub const fn symbols(&self) -> &BTreeMap<String, Word> {
        &self.symbols
    }

    /// Absolute address of one symbol.
    pub fn symbol(&self, name: &str) -> Option<Word> {
        self.symbols.get(name).copied()
    }

    /// Unit placements in placement order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Length of the image in words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the image holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Renders a link map: one line per placement, then one line per symbol.
impl fmt::Display for LinkedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LINK MAP ({} words)", self.words.len())?;
        for p in &self.placements {
            let name = p.name.as_deref().unwrap_or("-");
            writeln!(
                f,
                "  unit {:<3} {:#06x}..{:#06x}  {name}",
                p.unit,
                p.offset,
                p.offset + p.len
            )?;
        }
        writeln!(f, "SYMBOLS")?;
        for (name, address) in &self.symbols {
            writeln!(f, "  {address:#06x}  {name}")?;
        }
        Ok(())
    }
}

/// Links object units according to a `LinkerConfig`.
///
/// The linker holds no state between calls; one instance can be shared
/// across threads and reused for any number of links.
#[derive(Clone, Debug, Default)]
pub struct Linker {
    config: LinkerConfig,
}

impl Linker {
    /// Creates a linker.
    pub const fn new(config: LinkerConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub const fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// Links `units` into one image.
    ///
    /// # Arguments
    ///
    /// * `units` - Object units in input order; they are not modified.
    ///
    /// # Returns
    ///
    /// The relocated image together with its symbol table and placements.
    /// Zero units yield an empty image.
    ///
    /// # Errors
    ///
    /// * `LinkError::AddressSpaceOverflow` if the units do not fit the address space.
    /// * `LinkError::DuplicateSymbol` if two units export the same name.
    /// * `LinkError::UnresolvedSymbol` if an import names a symbol no unit exports.
    pub fn link(&self, units: &[ObjectUnit]) -> Result<LinkedImage, LinkError> {
        let required: usize = units.iter().map(ObjectUnit::len).sum();
        let available = self.config.available_words();
        if required > available {
            return Err(LinkError::AddressSpaceOverflow {
                required,
                available,
            });
        }

        let order = placement_order(units, self.config.placement);
        let mut offsets = vec![0; units.len()];
        let mut placements = Vec::with_capacity(units.len());
        let mut next = 0;
        for &index in &order {
            let unit = &units[index];
            offsets[index] = next;
            placements.push(Placement {
                unit: index,
                name: unit.name().map(str::to_owned),
                offset: next,
                len: unit.len(),
            });
            trace!(unit = index, name = ?unit.name(), offset = next, len = unit.len(), "placed unit");
            next += unit.len();
        }

        let symbols = collect_symbols(units, &offsets)?;

        let mut words = Vec::with_capacity(required);
        for &index in &order {
            let unit = &units[index];
            let base = offsets[index];
            let start = words.len();
            words.extend_from_slice(unit.code());
            let code = &mut words[start..];

            for &address in unit.used_labels() {
                let slot = &mut code[address as usize];
                *slot = relocate(base, *slot);
            }
            for (&address, name) in unit.imported_labels() {
                let Some(&target) = symbols.get(name) else {
                    return Err(LinkError::UnresolvedSymbol {
                        name: name.clone(),
                        unit: index,
                        address,
                    });
                };
                code[address as usize] = target;
            }
        }

        debug!(
            units = units.len(),
            words = words.len(),
            symbols = symbols.len(),
            policy = ?self.config.placement,
            "linked image"
        );
        Ok(LinkedImage {
            words,
            symbols,
            placements,
        })
    }
}

/// Links `units` with the default configuration (sequential placement, 64K words).
///
/// # Examples
///
/// ```
/// use dcpu16_linker::{ObjectUnit, link};
///
/// let image = link(&[ObjectUnit::from_code([0x8801, 0x8c01])]).unwrap();
/// assert_eq!(image.words(), [0x8801, 0x8c01]);
/// ```
///
/// # Errors
///
/// See `Linker::link`.
pub fn link(units: &[ObjectUnit]) -> Result<LinkedImage, LinkError> {
    Linker::default().link(units)
}

/// Input indices in placement order.
fn placement_order(units: &[ObjectUnit], policy: PlacementPolicy) -> Vec<usize> {
    let mut order: Vec<usize> = (0..units.len()).collect();
    match policy {
        PlacementPolicy::Sequential => {}
        // Stable sort: equal priorities keep input order.
        PlacementPolicy::Priority => order.sort_by_key(|&i| Reverse(units[i].priority())),
    }
    order
}

/// Builds the global symbol table; units are scanned in input order.
fn collect_symbols(
    units: &[ObjectUnit],
    offsets: &[usize],
) -> Result<BTreeMap<String, Word>, LinkError> {
    let mut symbols = BTreeMap::new();
    let mut owners: BTreeMap<&str, usize> = BTreeMap::new();
    for (index, unit) in units.iter().enumerate() {
        for (name, &local) in unit.exported_labels() {
            match owners.entry(name.as_str()) {
                Entry::Occupied(first) => {
                    return Err(LinkError::DuplicateSymbol {
                        name: name.clone(),
                        first: *first.get(),
                        second: index,
                    });
                }
                Entry::Vacant(slot) => {
                    let _ = slot.insert(index);
                }
            }
            let _ = symbols.insert(name.clone(), relocate(offsets[index], local));
        }
    }
    Ok(symbols)
}

/// Absolute address of local address `local` in a unit placed at `base`.
///
/// Callers guarantee `base + local` lies inside the image, which never exceeds 64K words.
const fn relocate(base: usize, local: Word) -> Word {
    (base as Word).wrapping_add(local)
}
