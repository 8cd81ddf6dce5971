//! The bitstream module forms the I/O subsystem for both codecs.
//!
//! - bitbuffer: bit packing and unpacking, shared by the Huffman and LZW payloads.
//! - bytereader: buffered reads of bytes and big-endian u32 header fields.
//! - bytewriter: buffered writes of bytes and big-endian u32 header fields.
//!
pub mod bitbuffer;
pub mod bytereader;
pub mod bytewriter;
