//! LS-8 flags register (FL).
//!
//! Three bits record the outcome of the most recent CMP. Exactly one of
//! them is set after a compare; conditional jumps read them and nothing
//! else does.

/// Equal flag - set if the compared values were equal.
pub const E: u8 = 0x01;

/// Greater flag - set if the first operand was greater.
pub const G: u8 = 0x02;

/// Less flag - set if the first operand was less.
pub const L: u8 = 0x04;

/// Defined flag bits. Bits 3-7 are reserved and always read as zero.
const MASK: u8 = E | G | L;

/// Flags register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags(pub u8);

impl Flags {
    /// Create a cleared flags register.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Create flags from a raw byte, discarding the reserved bits.
    ///
    /// Used when IRET restores FL from the stack.
    #[must_use]
    pub const fn from_byte(value: u8) -> Self {
        Self(value & MASK)
    }

    /// Raw byte value, as pushed during interrupt entry.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self.0
    }

    /// Check if a flag is set.
    #[must_use]
    pub const fn is_set(self, flag: u8) -> bool {
        self.0 & flag != 0
    }
}
