//! System bus: RAM plus the console device.

use std::io::{self, Write as _};

use ls8_core::Bus;

use crate::memory::Memory;

/// Where PRN/PRA output goes.
#[derive(Debug)]
enum Output {
    /// Standard output.
    Stdout(io::Stdout),
    /// In-memory capture, for tests and scripted runs.
    Capture(String),
}

/// The LS-8 bus: all of memory, plus the console sink for the two
/// print instructions.
#[derive(Debug)]
pub struct Ls8Bus {
    /// System RAM.
    pub memory: Memory,
    sink: Output,
}

impl Ls8Bus {
    /// Bus printing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            memory: Memory::new(),
            sink: Output::Stdout(io::stdout()),
        }
    }

    /// Bus capturing console output in memory.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            memory: Memory::new(),
            sink: Output::Capture(String::new()),
        }
    }

    /// Captured console output. Empty when printing to stdout.
    #[must_use]
    pub fn output(&self) -> &str {
        match &self.sink {
            Output::Stdout(_) => "",
            Output::Capture(text) => text,
        }
    }
}

impl Bus for Ls8Bus {
    fn read(&mut self, address: u8) -> u8 {
        self.memory.read(address)
    }

    fn write(&mut self, address: u8, value: u8) {
        self.memory.write(address, value);
    }

    fn print_value(&mut self, value: u8) {
        match &mut self.sink {
            Output::Stdout(out) => {
                let _ = writeln!(out, "{value}");
            }
            Output::Capture(text) => {
                use std::fmt::Write as _;
                let _ = writeln!(text, "{value}");
            }
        }
    }

    fn print_ascii(&mut self, value: u8) {
        match &mut self.sink {
            Output::Stdout(out) => {
                // No newline, so flush to make the character visible now
                let _ = out.write_all(&[value]);
                let _ = out.flush();
            }
            Output::Capture(text) => text.push(char::from(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_collects_console_output() {
        let mut bus = Ls8Bus::capture();
        bus.print_value(42);
        bus.print_ascii(b'!');
        assert_eq!(bus.output(), "42\n!");
    }

    #[test]
    fn stdout_bus_reports_no_captured_output() {
        let bus = Ls8Bus::stdout();
        assert_eq!(bus.output(), "");
    }

    #[test]
    fn bus_reads_and_writes_memory() {
        let mut bus = Ls8Bus::capture();
        bus.write(0x10, 0x99);
        assert_eq!(bus.read(0x10), 0x99);
        assert_eq!(bus.memory.read(0x10), 0x99);
    }
}
