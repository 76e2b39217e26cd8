//! LS-8 machine crate.
//!
//! Wraps the CPU core with everything a runnable system needs: flat
//! RAM, a console bus for the print instructions, a `.ls8` program
//! loader, and a wall-clock timer wired to interrupt line 0.

pub mod loader;

mod bus;
mod config;
mod machine;
mod memory;

pub use bus::Ls8Bus;
pub use config::Ls8Config;
pub use loader::LoadError;
pub use machine::Machine;
pub use memory::Memory;
