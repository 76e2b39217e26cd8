//! Memory and console bus interface.

use std::fmt::Write as _;

/// Size of the LS-8 address space in bytes.
///
/// Addresses are `u8`, so every representable address is valid by
/// construction.
pub const MEMORY_SIZE: usize = 256;

/// Memory and console bus interface.
///
/// The CPU reaches everything outside its registers through this trait:
/// RAM for fetches, loads, stores, and the stack, plus the two console
/// print operations that back the PRN and PRA instructions.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u8) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u8, value: u8);

    /// Print a value in decimal, followed by a newline.
    fn print_value(&mut self, value: u8);

    /// Print a value as a character, with no newline.
    fn print_ascii(&mut self, value: u8);
}

/// Flat 256-byte RAM with captured console output.
///
/// Intended for tests: load a program, run the CPU against it, then
/// inspect memory and whatever the program printed.
#[derive(Debug, Clone)]
pub struct SimpleBus {
    ram: [u8; MEMORY_SIZE],
    output: String,
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleBus {
    /// Create a bus with zeroed RAM and empty output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: [0; MEMORY_SIZE],
            output: String::new(),
        }
    }

    /// Copy bytes into RAM starting at `origin`, wrapping at the end of
    /// the address space.
    pub fn load(&mut self, origin: u8, bytes: &[u8]) {
        let mut address = origin;
        for &byte in bytes {
            self.ram[usize::from(address)] = byte;
            address = address.wrapping_add(1);
        }
    }

    /// Read a byte without going through the bus interface.
    #[must_use]
    pub fn peek(&self, address: u8) -> u8 {
        self.ram[usize::from(address)]
    }

    /// Everything printed so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u8) -> u8 {
        self.ram[usize::from(address)]
    }

    fn write(&mut self, address: u8, value: u8) {
        self.ram[usize::from(address)] = value;
    }

    fn print_value(&mut self, value: u8) {
        let _ = writeln!(self.output, "{value}");
    }

    fn print_ascii(&mut self, value: u8) {
        self.output.push(char::from(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_places_bytes_at_origin() {
        let mut bus = SimpleBus::new();
        bus.load(0x10, &[1, 2, 3]);

        assert_eq!(bus.peek(0x0F), 0);
        assert_eq!(bus.peek(0x10), 1);
        assert_eq!(bus.peek(0x11), 2);
        assert_eq!(bus.peek(0x12), 3);
    }

    #[test]
    fn load_wraps_at_end_of_memory() {
        let mut bus = SimpleBus::new();
        bus.load(0xFF, &[0xAA, 0xBB]);

        assert_eq!(bus.peek(0xFF), 0xAA);
        assert_eq!(bus.peek(0x00), 0xBB);
    }

    #[test]
    fn print_value_appends_decimal_lines() {
        let mut bus = SimpleBus::new();
        bus.print_value(17);
        bus.print_value(0);

        assert_eq!(bus.output(), "17\n0\n");
    }

    #[test]
    fn print_ascii_appends_raw_characters() {
        let mut bus = SimpleBus::new();
        bus.print_ascii(b'H');
        bus.print_ascii(b'i');

        assert_eq!(bus.output(), "Hi");
    }
}
