//! Core traits and types for the LS-8 emulator.
//!
//! The CPU crate and the machine crate meet at the [`Bus`] trait defined
//! here: all memory traffic and console output flows through it.

mod bus;

pub use bus::{Bus, MEMORY_SIZE, SimpleBus};
