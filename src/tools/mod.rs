//! The tools module provides the helpers around the codecs.
//!
//! The tools are:
//! - cli: Command line interface.
//! - freq_count: Byte frequency count for Huffman coding.
//! - files: Output file naming.
//! - job: Runs one command line job on a file or on standard input.
//!
pub mod cli;
pub mod files;
pub mod freq_count;
pub mod job;
