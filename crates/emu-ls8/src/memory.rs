//! Flat 256-byte RAM.
//!
//! There is no memory protection and no banking: program code, data,
//! the stack, and the interrupt vector table all share the one page.

use ls8_core::MEMORY_SIZE;

use crate::loader::LoadError;

/// System RAM.
#[derive(Debug, Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Create zeroed memory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: [0; MEMORY_SIZE],
        }
    }

    /// Read the byte at `address`.
    #[must_use]
    pub fn read(&self, address: u8) -> u8 {
        self.bytes[usize::from(address)]
    }

    /// Write a byte at `address`.
    pub fn write(&mut self, address: u8, value: u8) {
        self.bytes[usize::from(address)] = value;
    }

    /// Copy a program image into memory starting at `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::AddressOutOfRange`] if the image runs past the
    /// end of memory.
    pub fn load(&mut self, origin: u8, image: &[u8]) -> Result<(), LoadError> {
        let start = usize::from(origin);
        let end = start + image.len();
        if end > MEMORY_SIZE {
            return Err(LoadError::AddressOutOfRange {
                origin,
                len: image.len(),
            });
        }
        self.bytes[start..end].copy_from_slice(image);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
