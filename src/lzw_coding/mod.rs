//! The lzw module holds the dictionary side of the LZW codec.
//!
//! Both dictionaries start with the 256 single byte strings and add one string per emitted code
//! until the memory budget runs out. After that they are frozen but still answer lookups. The
//! budget is not stored in the container, so compressor and decompressor must be given the same
//! one.
//!
//! Codes are written with one fixed width per file, taken from the final dictionary size. That
//! is why the compressor scans the input once before it encodes anything.

pub mod dictionary;
pub mod matcher;
