//! Capacities of bounded text fields.
//!
//! Columns are limited in characters while `HeaplessString` capacity counts bytes, so every
//! capacity reserves four bytes (the widest UTF-8 encoding) per character.

pub const BYTES_PER_CHAR: usize = 4;

pub const fn utf8_capacity(chars: usize) -> usize {
    chars * BYTES_PER_CHAR
}

/// Character limit of a field with the given byte capacity.
pub const fn char_limit(capacity: usize) -> usize {
    capacity / BYTES_PER_CHAR
}

pub const NAME_CAPACITY: usize = utf8_capacity(150);
pub const EMAIL_CAPACITY: usize = utf8_capacity(150);
pub const PHONE_CAPACITY: usize = utf8_capacity(40);
pub const TAX_ID_CAPACITY: usize = utf8_capacity(30);
pub const PRODUCT_CAPACITY: usize = utf8_capacity(120);
pub const TITLE_CAPACITY: usize = utf8_capacity(200);

/// Stored evidence names are ASCII by construction, one byte per character.
pub const STORED_FILE_NAME_CAPACITY: usize = 255;
