use std::fmt::{Display, Formatter};
use std::io::Cursor;
use std::str::FromStr;

use crate::error::Result;
use crate::lzw_coding::dictionary::DEFAULT_BUDGET;

use super::{huffman_compress, huffman_decompress, lzw_compress, lzw_decompress};

/// The two container formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Huffman,
    Lzw,
}

impl Algorithm {
    /// File extension (without the dot) of this algorithm's containers.
    pub fn extension(self) -> &'static str {
        match self {
            Algorithm::Huffman => "huffz",
            Algorithm::Lzw => "LmZWp",
        }
    }

    /// The algorithm whose extension `ext` is, if any.
    pub fn from_extension(ext: &str) -> Option<Self> {
        [Algorithm::Huffman, Algorithm::Lzw]
            .into_iter()
            .find(|a| a.extension() == ext)
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Huffman => write!(f, "huffman"),
            Algorithm::Lzw => write!(f, "lzw"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "huffman" | "h" => Ok(Algorithm::Huffman),
            "lzw" | "l" => Ok(Algorithm::Lzw),
            other => Err(format!(
                "unknown algorithm '{}', expected huffman or lzw",
                other
            )),
        }
    }
}

/// What one compress or decompress job did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Report {
    pub algorithm: Algorithm,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl Report {
    /// Space saved, as a percentage of the input size. 0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            return 0.0;
        }
        (1.0 - self.bytes_out as f64 / self.bytes_in as f64) * 100.0
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} bytes in, {} bytes out ({:.2}% saved)",
            self.algorithm,
            self.bytes_in,
            self.bytes_out,
            self.ratio()
        )
    }
}

/// In-memory interface over the streaming codecs.
pub trait Compression {
    /// Compress the input data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompress the compressed data
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanCodec;

impl Compression for HuffmanCodec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        huffman_compress::compress(&mut Cursor::new(data), &mut out)?;
        Ok(out)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        huffman_decompress::decompress(data, &mut out)?;
        Ok(out)
    }
}

/// LZW with a given dictionary memory budget (in characters).
#[derive(Clone, Copy, Debug)]
pub struct LzwCodec {
    pub budget: usize,
}

impl LzwCodec {
    pub fn new(budget: usize) -> Self {
        Self { budget }
    }
}

impl Default for LzwCodec {
    fn default() -> Self {
        Self::new(DEFAULT_BUDGET)
    }
}

impl Compression for LzwCodec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        lzw_compress::compress(&mut Cursor::new(data), &mut out, self.budget)?;
        Ok(out)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        lzw_decompress::decompress(data, &mut out, self.budget)?;
        Ok(out)
    }
}

/// Pick the codec for an algorithm.
pub fn codec_for(algorithm: Algorithm, budget: usize) -> Box<dyn Compression> {
    match algorithm {
        Algorithm::Huffman => Box::new(HuffmanCodec),
        Algorithm::Lzw => Box::new(LzwCodec::new(budget)),
    }
}
