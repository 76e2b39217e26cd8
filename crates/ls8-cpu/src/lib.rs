//! LS-8 CPU emulator.
//!
//! The LS-8 is an 8-bit register machine: eight general-purpose registers,
//! a 256-byte address space reached through a bus, three condition flags,
//! a downward-growing stack, and eight maskable interrupt lines. Each call
//! to `step()` executes one full instruction.

use thiserror::Error;

mod alu;
mod cpu;
mod flags;
mod opcodes;
mod registers;

pub use cpu::{Ls8, TIMER_LINE, VECTOR_BASE};
pub use flags::{E, Flags, G, L};
pub use opcodes::Opcode;
pub use registers::{IM, IS, Registers, SP, SP_INIT, STACK_BOTTOM};

pub type Result<T> = std::result::Result<T, self::Error>;

/// Fatal execution faults.
///
/// Any of these halts the CPU; it stays halted until `reset()` and a
/// fresh program load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The fetched opcode byte is not a recognised instruction.
    #[error("illegal instruction {opcode:#04X} at address {pc:#04X}")]
    IllegalInstruction { opcode: u8, pc: u8 },

    /// DIV or MOD with a zero divisor.
    #[error("division by zero at address {pc:#04X}")]
    DivisionByZero { pc: u8 },
}
