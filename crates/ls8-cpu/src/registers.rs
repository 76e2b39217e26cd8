//! LS-8 CPU registers.

use crate::flags::Flags;

/// Register index of the interrupt mask (IM). Bit *i* enables line *i*.
pub const IM: u8 = 5;

/// Register index of the interrupt status (IS). Bit *i* is set while
/// line *i* has an unserviced interrupt pending.
pub const IS: u8 = 6;

/// Register index of the stack pointer (SP).
pub const SP: u8 = 7;

/// SP value at reset. The stack grows downward from here; the vector
/// table sits above it at `0xF8-0xFF`.
pub const SP_INIT: u8 = 0xF4;

/// The address SP never increments past. A pop with SP already here
/// re-reads the same byte and leaves SP in place.
pub const STACK_BOTTOM: u8 = 0xFF;

/// LS-8 CPU register set.
///
/// Eight general-purpose 8-bit registers R0-R7, plus the program counter
/// and the flags register. R5, R6, and R7 have architectural roles (IM,
/// IS, SP) and are exposed through named accessors so call sites don't
/// traffic in magic indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// General-purpose registers R0-R7.
    r: [u8; 8],
    /// Program counter: address of the next opcode.
    pub pc: u8,
    /// Flags register, written only by CMP.
    pub fl: Flags,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Create registers in reset state: everything zero except SP.
    #[must_use]
    pub const fn new() -> Self {
        let mut r = [0; 8];
        r[SP as usize] = SP_INIT;
        Self {
            r,
            pc: 0,
            fl: Flags::new(),
        }
    }

    /// Read register `index`.
    ///
    /// Register operands carry three significant bits, so the index is
    /// masked to 0-7; an unmasked caller is a decode bug and fails fast
    /// in debug builds.
    #[must_use]
    pub fn get(&self, index: u8) -> u8 {
        debug_assert!(index < 8, "register index out of range: {index}");
        self.r[usize::from(index & 0x07)]
    }

    /// Write register `index`.
    pub fn set(&mut self, index: u8, value: u8) {
        debug_assert!(index < 8, "register index out of range: {index}");
        self.r[usize::from(index & 0x07)] = value;
    }

    /// Interrupt mask register (R5).
    #[must_use]
    pub const fn im(&self) -> u8 {
        self.r[IM as usize]
    }

    /// Interrupt status register (R6).
    #[must_use]
    pub const fn is(&self) -> u8 {
        self.r[IS as usize]
    }

    /// Set the interrupt status register (R6).
    pub fn set_is(&mut self, value: u8) {
        self.r[IS as usize] = value;
    }

    /// Stack pointer (R7).
    #[must_use]
    pub const fn sp(&self) -> u8 {
        self.r[SP as usize]
    }

    /// Decrement SP and return the address to write.
    pub fn push(&mut self) -> u8 {
        self.r[SP as usize] = self.r[SP as usize].wrapping_sub(1);
        self.r[SP as usize]
    }

    /// Return the address to read, then increment SP unless it is
    /// already at [`STACK_BOTTOM`].
    pub fn pop(&mut self) -> u8 {
        let address = self.r[SP as usize];
        if address != STACK_BOTTOM {
            self.r[SP as usize] = address.wrapping_add(1);
        }
        address
    }
}
