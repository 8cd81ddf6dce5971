//! The compression module drives the two codecs end to end.
//!
//! Huffman compression happens in the following steps:
//! - Frequency count: One pass over the input counts every byte value.
//! - Huffman coding: The counts are turned into a tree and the tree into a prefix code per byte.
//! - Header: The counts and the number of tail padding bits are written out.
//! - Payload: A second pass over the input writes the code of every byte, padded to a full byte.
//!
//! LZW compression also reads the input twice. The first pass only grows the dictionary, to find
//! the one code width used for the whole file. The second pass writes the codes at that width.
//!
//! Decompression is the inverse of each, and checks the container as it goes: a header that is
//! out of range is a CorruptHeader error, a payload that stops lining up is a Desync error.
//!
//! Each job builds its own tables. Nothing is shared between jobs.

pub mod codec;
pub mod huffman_compress;
pub mod huffman_decompress;
pub mod lzw_compress;
pub mod lzw_decompress;
