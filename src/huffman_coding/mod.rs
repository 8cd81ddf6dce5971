//! The huffman module builds the prefix codes for the Huffman codec.
//!
//! One frequency table per input is turned into a tree with a min-priority-queue, and the tree
//! is walked into a byte to code table. Only the frequencies are stored in the container, so
//! the decompressor rebuilds the exact same tree with the exact same tie-break rule.
//!
//! Bit stream encoding and decoding happen in the compression module.
//!

pub mod huffman;
pub mod huffman_header;
