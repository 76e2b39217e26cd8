//! ALU operations for the LS-8.
//!
//! Pure functions over register values. Arithmetic wraps modulo 256 like
//! the 8-bit datapath it models; only division and modulo can fail, and
//! they signal it with `None` rather than deciding policy here.

use std::cmp::Ordering;

use crate::flags::{E, Flags, G, L};

/// Wrapping addition.
#[must_use]
pub fn add(a: u8, b: u8) -> u8 {
    a.wrapping_add(b)
}

/// Wrapping subtraction.
#[must_use]
pub fn sub(a: u8, b: u8) -> u8 {
    a.wrapping_sub(b)
}

/// Wrapping multiplication.
#[must_use]
pub fn mul(a: u8, b: u8) -> u8 {
    a.wrapping_mul(b)
}

/// Truncating integer division. `None` when the divisor is zero.
#[must_use]
pub fn div(a: u8, b: u8) -> Option<u8> {
    a.checked_div(b)
}

/// Integer remainder. `None` when the divisor is zero.
#[must_use]
pub fn modulo(a: u8, b: u8) -> Option<u8> {
    a.checked_rem(b)
}

/// Bitwise AND.
#[must_use]
pub fn and(a: u8, b: u8) -> u8 {
    a & b
}

/// Bitwise OR.
#[must_use]
pub fn or(a: u8, b: u8) -> u8 {
    a | b
}

/// Bitwise XOR.
#[must_use]
pub fn xor(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Bitwise complement.
#[must_use]
pub fn not(a: u8) -> u8 {
    !a
}

/// Shift left. Counts of 8 or more shift everything out.
#[must_use]
pub fn shl(a: u8, b: u8) -> u8 {
    if b < 8 { a << b } else { 0 }
}

/// Shift right. Counts of 8 or more shift everything out.
#[must_use]
pub fn shr(a: u8, b: u8) -> u8 {
    if b < 8 { a >> b } else { 0 }
}

/// Compare two values, producing a flags register with exactly one of
/// E, G, or L set.
#[must_use]
pub fn compare(a: u8, b: u8) -> Flags {
    match a.cmp(&b) {
        Ordering::Equal => Flags(E),
        Ordering::Greater => Flags(G),
        Ordering::Less => Flags(L),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_wraps_modulo_256() {
        assert_eq!(add(250, 10), 4);
        assert_eq!(sub(5, 10), 251);
        assert_eq!(mul(16, 16), 0);
        assert_eq!(mul(255, 255), 1);
    }

    #[test]
    fn division_truncates() {
        assert_eq!(div(7, 2), Some(3));
        assert_eq!(modulo(7, 2), Some(1));
    }

    #[test]
    fn zero_divisor_is_refused() {
        assert_eq!(div(7, 0), None);
        assert_eq!(modulo(7, 0), None);
    }

    #[test]
    fn shifts_zero_out_at_width() {
        assert_eq!(shl(0b0000_0001, 7), 0b1000_0000);
        assert_eq!(shl(0xFF, 8), 0);
        assert_eq!(shr(0b1000_0000, 7), 0b0000_0001);
        assert_eq!(shr(0xFF, 200), 0);
    }

    #[test]
    fn compare_sets_exactly_one_flag() {
        assert_eq!(compare(5, 5), Flags(E));
        assert_eq!(compare(9, 5), Flags(G));
        assert_eq!(compare(5, 9), Flags(L));
    }
}
