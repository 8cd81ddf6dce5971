use std::io::Read;

use crate::bitstream::bytereader::ByteReader;
use crate::error::{CodecError, Result};

/// Occurrence count of every byte value in one input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; 256],
}

impl FrequencyTable {
    /// Returns a frequency count of the input data.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut table = Self::empty();
        table.add(data)?;
        Ok(table)
    }

    /// Count every byte left in the reader.
    pub fn from_reader<R: Read>(reader: &mut ByteReader<R>) -> Result<Self> {
        let mut table = Self::empty();
        while let Some(chunk) = reader.chunk()? {
            table.add(chunk)?;
        }
        Ok(table)
    }

    /// Build a table from (byte, frequency) pairs, as found in a container header.
    pub fn from_pairs(pairs: &[(u8, u32)]) -> Self {
        let mut table = Self::empty();
        pairs.iter().for_each(|&(byte, freq)| table.counts[byte as usize] = freq);
        table
    }

    fn empty() -> Self {
        Self { counts: [0; 256] }
    }

    fn add(&mut self, chunk: &[u8]) -> Result<()> {
        for &el in chunk {
            let slot = &mut self.counts[el as usize];
            *slot = slot.checked_add(1).ok_or_else(|| {
                CodecError::InvalidInput(format!(
                    "byte {} occurs more than {} times",
                    el,
                    u32::MAX
                ))
            })?;
        }
        Ok(())
    }

    pub fn get(&self, byte: u8) -> u32 {
        self.counts[byte as usize]
    }

    /// Number of byte values that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&f| f != 0).count()
    }

    /// Sum of all counts (the length of the input).
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&f| f as u64).sum()
    }

    /// (byte, frequency) for every byte that occurs, in ascending byte order.
    pub fn present(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f != 0)
            .map(|(b, &f)| (b as u8, f))
    }
}
