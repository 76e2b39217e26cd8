//! Top-level LS-8 system.
//!
//! Ties the CPU to RAM and the console, and drives the one hardware
//! device: a wall-clock timer that raises interrupt line 0 at a fixed
//! period. The timer is polled between instructions, so its interrupt
//! lands on cycle boundaries like any other.

use std::fmt::Write as _;
use std::path::Path;
use std::time::{Duration, Instant};

use ls8_cpu::{Ls8, TIMER_LINE};
use tracing::{debug, info};

use crate::bus::Ls8Bus;
use crate::config::Ls8Config;
use crate::loader::{self, LoadError};
use crate::memory::Memory;

/// An LS-8 machine: CPU, 256 bytes of RAM, console output, and an
/// optional timer.
pub struct Machine {
    cpu: Ls8,
    bus: Ls8Bus,
    timer_period: Option<Duration>,
    /// Next timer fire, armed lazily on the first step.
    timer_deadline: Option<Instant>,
}

impl Machine {
    /// Create a machine printing to standard output.
    #[must_use]
    pub fn new(config: &Ls8Config) -> Self {
        Self::build(config, Ls8Bus::stdout())
    }

    /// Create a machine capturing console output in memory.
    #[must_use]
    pub fn with_captured_output(config: &Ls8Config) -> Self {
        Self::build(config, Ls8Bus::capture())
    }

    fn build(config: &Ls8Config, bus: Ls8Bus) -> Self {
        Self {
            cpu: Ls8::new(),
            bus,
            timer_period: config.timer_period,
            timer_deadline: None,
        }
    }

    /// Copy a program image into memory at `origin`.
    ///
    /// # Errors
    ///
    /// Returns an error if the image does not fit in memory.
    pub fn load_program(&mut self, origin: u8, image: &[u8]) -> Result<(), LoadError> {
        self.bus.memory.load(origin, image)?;
        info!(origin, len = image.len(), "program loaded");
        Ok(())
    }

    /// Read a `.ls8` file and load it at address 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// image does not fit in memory.
    pub fn load_file(&mut self, path: &Path) -> Result<(), LoadError> {
        let image = loader::load_file(path)?;
        self.load_program(0, &image)
    }

    /// Execute one machine cycle, firing the timer first if it is due.
    ///
    /// # Errors
    ///
    /// Propagates a CPU fault (illegal instruction or division by
    /// zero); the machine is halted afterwards.
    pub fn step(&mut self) -> ls8_cpu::Result<()> {
        self.poll_timer();
        self.cpu.step(&mut self.bus)
    }

    /// Run until the CPU halts or faults.
    ///
    /// # Errors
    ///
    /// Propagates the first CPU fault.
    pub fn run(&mut self) -> ls8_cpu::Result<()> {
        while !self.cpu.is_halted() {
            self.step()?;
        }
        info!(instructions = self.cpu.instructions(), "halted");
        Ok(())
    }

    /// Raise an interrupt line on the CPU.
    pub fn raise_interrupt(&mut self, line: u8) {
        self.cpu.raise_interrupt(line);
    }

    fn poll_timer(&mut self) {
        let Some(period) = self.timer_period else {
            return;
        };
        let now = Instant::now();
        match self.timer_deadline {
            None => self.timer_deadline = Some(now + period),
            Some(deadline) if now >= deadline => {
                debug!(line = TIMER_LINE, "timer interrupt");
                self.cpu.raise_interrupt(TIMER_LINE);
                self.timer_deadline = Some(now + period);
            }
            Some(_) => {}
        }
    }

    /// One line of execution trace: PC, the three bytes in the fetch
    /// window, and all eight registers.
    #[must_use]
    pub fn trace_line(&self) -> String {
        let pc = self.cpu.pc();
        let mut line = format!(
            "TRACE: {:02X} | {:02X} {:02X} {:02X} |",
            pc,
            self.bus.memory.read(pc),
            self.bus.memory.read(pc.wrapping_add(1)),
            self.bus.memory.read(pc.wrapping_add(2)),
        );
        for reg in 0..8u8 {
            let _ = write!(line, " {:02X}", self.cpu.register(reg));
        }
        line
    }

    /// The CPU.
    #[must_use]
    pub fn cpu(&self) -> &Ls8 {
        &self.cpu
    }

    /// The CPU, mutably.
    pub fn cpu_mut(&mut self) -> &mut Ls8 {
        &mut self.cpu
    }

    /// System memory.
    #[must_use]
    pub fn memory(&self) -> &Memory {
        &self.bus.memory
    }

    /// Captured console output. Empty when printing to stdout.
    #[must_use]
    pub fn output(&self) -> &str {
        self.bus.output()
    }
}
