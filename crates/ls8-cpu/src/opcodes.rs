//! LS-8 instruction set.
//!
//! Opcodes describe their own shape: `AABCDDDD`, where `AA` is the number
//! of operand bytes, `B` is set for ALU instructions, `C` is set for
//! instructions that write PC directly, and `DDDD` distinguishes the
//! instruction. The dispatcher only needs `AA` to know how far to advance
//! PC; the other fields exist so encodings stay honest.

/// One decoded LS-8 instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// No effect.
    Nop,
    /// Stop execution.
    Hlt,
    /// Load an immediate into a register.
    Ldi,
    /// Load a register from the memory address held in another register.
    Ld,
    /// Store a register at the memory address held in another register.
    St,
    /// Print a register in decimal.
    Prn,
    /// Print a register as a character.
    Pra,
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Wrapping multiplication.
    Mul,
    /// Truncating division; faults on a zero divisor.
    Div,
    /// Remainder; faults on a zero divisor.
    Mod,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Bitwise complement, in place.
    Not,
    /// Shift left by a register amount.
    Shl,
    /// Shift right by a register amount.
    Shr,
    /// Compare two registers into FL.
    Cmp,
    /// Push a register onto the stack.
    Push,
    /// Pop the stack into a register.
    Pop,
    /// Call the subroutine whose address is in a register.
    Call,
    /// Return from a subroutine.
    Ret,
    /// Unconditional jump to the address in a register.
    Jmp,
    /// Jump if the Equal flag is set.
    Jeq,
    /// Jump if the Equal flag is clear.
    Jne,
    /// Jump if the Less flag is set.
    Jlt,
    /// Jump if the Greater flag is set.
    Jgt,
    /// Jump if the Less flag is clear.
    Jge,
    /// Jump if the Greater flag is clear.
    Jle,
    /// Return from an interrupt handler.
    Iret,
}

impl Opcode {
    /// Decode an opcode byte. `None` for unrecognised encodings.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Nop),
            0x01 => Some(Self::Hlt),
            0x11 => Some(Self::Ret),
            0x13 => Some(Self::Iret),
            0x45 => Some(Self::Push),
            0x46 => Some(Self::Pop),
            0x47 => Some(Self::Prn),
            0x48 => Some(Self::Pra),
            0x50 => Some(Self::Call),
            0x54 => Some(Self::Jmp),
            0x55 => Some(Self::Jeq),
            0x56 => Some(Self::Jne),
            0x57 => Some(Self::Jgt),
            0x58 => Some(Self::Jlt),
            0x59 => Some(Self::Jle),
            0x5A => Some(Self::Jge),
            0x69 => Some(Self::Not),
            0x82 => Some(Self::Ldi),
            0x83 => Some(Self::Ld),
            0x84 => Some(Self::St),
            0xA0 => Some(Self::Add),
            0xA1 => Some(Self::Sub),
            0xA2 => Some(Self::Mul),
            0xA3 => Some(Self::Div),
            0xA4 => Some(Self::Mod),
            0xA7 => Some(Self::Cmp),
            0xA8 => Some(Self::And),
            0xAA => Some(Self::Or),
            0xAB => Some(Self::Xor),
            0xAC => Some(Self::Shl),
            0xAD => Some(Self::Shr),
            _ => None,
        }
    }

    /// Canonical encoding of this instruction.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Nop => 0x00,
            Self::Hlt => 0x01,
            Self::Ret => 0x11,
            Self::Iret => 0x13,
            Self::Push => 0x45,
            Self::Pop => 0x46,
            Self::Prn => 0x47,
            Self::Pra => 0x48,
            Self::Call => 0x50,
            Self::Jmp => 0x54,
            Self::Jeq => 0x55,
            Self::Jne => 0x56,
            Self::Jgt => 0x57,
            Self::Jlt => 0x58,
            Self::Jle => 0x59,
            Self::Jge => 0x5A,
            Self::Not => 0x69,
            Self::Ldi => 0x82,
            Self::Ld => 0x83,
            Self::St => 0x84,
            Self::Add => 0xA0,
            Self::Sub => 0xA1,
            Self::Mul => 0xA2,
            Self::Div => 0xA3,
            Self::Mod => 0xA4,
            Self::Cmp => 0xA7,
            Self::And => 0xA8,
            Self::Or => 0xAA,
            Self::Xor => 0xAB,
            Self::Shl => 0xAC,
            Self::Shr => 0xAD,
        }
    }

    /// Number of operand bytes following the opcode (bits 7-6 of the
    /// encoding).
    #[must_use]
    pub const fn operand_count(self) -> u8 {
        self.to_byte() >> 6
    }

    /// Total instruction width in bytes.
    #[must_use]
    pub const fn width(self) -> u8 {
        1 + self.operand_count()
    }

    /// True for ALU instructions (bit 5 of the encoding).
    #[must_use]
    pub const fn is_alu(self) -> bool {
        self.to_byte() & 0x20 != 0
    }

    /// True for instructions that write PC directly (bit 4 of the
    /// encoding). Conditional jumps carry this bit even though they only
    /// write PC when taken.
    #[must_use]
    pub const fn sets_pc(self) -> bool {
        self.to_byte() & 0x10 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_matches_encode_for_every_defined_byte() {
        let mut defined = 0;
        for byte in 0..=u8::MAX {
            if let Some(opcode) = Opcode::from_byte(byte) {
                assert_eq!(opcode.to_byte(), byte, "{opcode:?} decode/encode drift");
                defined += 1;
            }
        }
        assert_eq!(defined, 31);
    }

    #[test]
    fn undefined_bytes_do_not_decode() {
        assert_eq!(Opcode::from_byte(0x02), None);
        assert_eq!(Opcode::from_byte(0x7F), None);
        assert_eq!(Opcode::from_byte(0xFF), None);
    }

    #[test]
    fn operand_counts_come_from_the_top_bits() {
        assert_eq!(Opcode::Hlt.operand_count(), 0);
        assert_eq!(Opcode::Ret.width(), 1);
        assert_eq!(Opcode::Prn.operand_count(), 1);
        assert_eq!(Opcode::Jmp.width(), 2);
        assert_eq!(Opcode::Ldi.operand_count(), 2);
        assert_eq!(Opcode::Add.width(), 3);
    }

    #[test]
    fn alu_bit_marks_alu_instructions() {
        assert!(Opcode::Add.is_alu());
        assert!(Opcode::Cmp.is_alu());
        assert!(Opcode::Not.is_alu());
        assert!(!Opcode::Ldi.is_alu());
        assert!(!Opcode::Push.is_alu());
    }

    #[test]
    fn pc_bit_marks_control_flow() {
        assert!(Opcode::Call.sets_pc());
        assert!(Opcode::Ret.sets_pc());
        assert!(Opcode::Iret.sets_pc());
        assert!(Opcode::Jne.sets_pc());
        assert!(!Opcode::Hlt.sets_pc());
        assert!(!Opcode::Add.sets_pc());
    }
}
