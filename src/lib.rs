//! Lossless compression of arbitrary byte streams with Huffman or LZW coding.
//!
//! Version 0.1.0
//!
//! Each algorithm has its own container format, all integers big-endian:
//! - Huffman (`.huffz`): the byte frequencies, the number of tail padding bits, then the packed
//!   prefix codes. The decoder rebuilds the same code table from the frequencies.
//! - LZW (`.LmZWp`): the code width, then the codes packed at that one fixed width.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> hlzip -z -a lzw test.txt`
//!
//! This will compress the file and create the file test.txt.LmZWp. The original file is kept.
//!
//! In a program, use the streaming functions in `compression`, or the `Compression` trait for
//! data already in memory:
//!
//! ```
//! use hlzip::compression::codec::{Compression, HuffmanCodec};
//!
//! let packed = HuffmanCodec.compress(b"abracadabra").unwrap();
//! assert_eq!(HuffmanCodec.decompress(&packed).unwrap(), b"abracadabra");
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod lzw_coding;
pub mod tools;
