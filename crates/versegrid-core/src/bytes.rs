//! Character to byte mapping
//!
//! Each `char` (Unicode scalar value, not grapheme) becomes its code point
//! reduced modulo 256. The map is lossy: `'A'` (U+0041) and `'Ł'` (U+0141)
//! land on the same byte, and nothing here tries to undo that.

/// Byte for a single character
#[inline]
pub fn byte_of(ch: char) -> u8 {
    (u32::from(ch) % 256) as u8
}

/// One byte per character, in order
pub fn map_bytes(text: &str) -> Vec<u8> {
    text.chars().map(byte_of).collect()
}
