//! Byte classes used by the lexer. The source is scanned as ASCII bytes;
//! anything outside these classes becomes an illegal token.

pub const LINE_FEED: u8 = b'\n';
pub const CARRIAGE_RETURN: u8 = b'\r';
pub const SPACE: u8 = b' ';
pub const TAB: u8 = b'\t';
pub const DOUBLE_QUOTE: u8 = b'"';
pub const DOT: u8 = b'.';
pub const UNDERSCORE: u8 = b'_';

/// Bytes skipped between tokens.
#[inline]
pub fn is_white_space(ch: u8) -> bool {
    matches!(ch, SPACE | TAB | CARRIAGE_RETURN | LINE_FEED)
}

#[inline]
pub fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

/// Digits and the decimal point, the body of a number literal.
#[inline]
pub fn is_number_part(ch: u8) -> bool {
    is_digit(ch) || ch == DOT
}

#[inline]
pub fn is_identifier_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic()
}

#[inline]
pub fn is_identifier_part(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == UNDERSCORE
}
