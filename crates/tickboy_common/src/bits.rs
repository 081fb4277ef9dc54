//! Byte and bit helpers.
//!
//! Words are little-endian in memory: the first byte of a pair is the low
//! byte. All helpers are total; callers pass values that already fit in
//! 8 or 16 bits.

/// High byte of a 16-bit word.
#[inline]
pub const fn msb(word: u16) -> u8 {
    (word >> 8) as u8
}

/// Low byte of a 16-bit word.
#[inline]
pub const fn lsb(word: u16) -> u8 {
    word as u8
}

#[inline]
pub const fn to_word(msb: u8, lsb: u8) -> u16 {
    ((msb as u16) << 8) | lsb as u16
}

/// Build a word from a `[low, high]` byte pair, as operands are laid out
/// after an opcode.
#[inline]
pub const fn word_from_bytes(bytes: [u8; 2]) -> u16 {
    to_word(bytes[1], bytes[0])
}

#[inline]
pub const fn get_bit(value: u8, position: u8) -> bool {
    (value & (1 << position)) != 0
}

#[inline]
pub const fn set_bit(value: u8, position: u8) -> u8 {
    value | (1 << position)
}

#[inline]
pub const fn clear_bit(value: u8, position: u8) -> u8 {
    value & !(1 << position)
}

#[inline]
pub const fn set_bit_to(value: u8, position: u8, on: bool) -> u8 {
    if on {
        set_bit(value, position)
    } else {
        clear_bit(value, position)
    }
}

/// Two's complement view of a byte: unchanged below 0x80, `byte - 256`
/// otherwise.
#[inline]
pub const fn to_signed(byte: u8) -> i8 {
    byte as i8
}
