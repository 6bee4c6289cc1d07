//! Main System Memory.
//!
//! This module implements the DCPU-16 main memory. It provides:
//! 1. **Storage:** A fixed array of 64K words; every `Word` is a valid address.
//! 2. **Access:** Wrapping word reads and writes used by the core and by devices.
//! 3. **Loading:** Prefix loading of program images for `flash`.

use crate::common::{CpuError, MEMORY_WORDS, Word};

/// Word-addressed main memory of a DCPU-16.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    words: Box<[Word]>,
}

impl Memory {
    /// Creates a zeroed 64K-word memory.
    pub fn new() -> Self {
        Self {
            words: vec![0; MEMORY_WORDS].into_boxed_slice(),
        }
    }

    /// Reads the word at `addr`.
    #[inline]
    pub fn read(&self, addr: Word) -> Word {
        self.words[addr as usize]
    }

    /// Writes `val` to `addr`.
    #[inline]
    pub fn write(&mut self, addr: Word, val: Word) {
        self.words[addr as usize] = val;
    }

    /// Copies an image to the start of memory, leaving the rest untouched.
    ///
    /// # Arguments
    ///
    /// * `image` - Words to place at addresses `0..image.len()`.
    ///
    /// # Errors
    ///
    /// Returns `CpuError::ImageTooLarge` without modifying memory if the image
    /// is longer than memory.
    pub fn load(&mut self, image: &[Word]) -> Result<(), CpuError> {
        let Some(dest) = self.words.get_mut(..image.len()) else {
            return Err(CpuError::ImageTooLarge {
                len: image.len(),
                capacity: MEMORY_WORDS,
            });
        };
        dest.copy_from_slice(image);
        Ok(())
    }

    /// Zeroes every word.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Returns the whole memory as a slice indexed by address.
    pub fn as_slice(&self) -> &[Word] {
        &self.words
    }

    /// Number of words in memory (always 0x10000).
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.words.iter().rposition(|&w| w != 0).map_or(0, |i| i + 1);
        f.debug_struct("Memory")
            .field("len", &self.words.len())
            .field("used_prefix", &used)
            .finish()
    }
}
