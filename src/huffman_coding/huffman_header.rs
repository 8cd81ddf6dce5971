//! Reads and writes the header of the Huffman container.
//!
//! ```text
//! u32 distinct byte count
//! repeat count times, ascending byte value:
//!     u8  byte value
//!     u32 frequency
//! u32 padding bits
//! ```
//! All integers are big-endian. Only frequencies are stored, the decoder rebuilds the tree.

use std::io::{Read, Write};

use log::debug;

use crate::bitstream::bytereader::ByteReader;
use crate::bitstream::bytewriter::ByteWriter;
use crate::error::{CodecError, Result};
use crate::tools::freq_count::FrequencyTable;

use super::huffman::CodeTable;

/// Parsed container header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanHeader {
    pub freqs: FrequencyTable,
    pub padding: u8,
}

impl HuffmanHeader {
    /// Header for an input with these frequencies encoded with this code table.
    pub fn new(freqs: FrequencyTable, codes: &CodeTable) -> Self {
        let padding = codes.padding_bits(&freqs);
        Self { freqs, padding }
    }

    pub fn write<W: Write>(&self, bw: &mut ByteWriter<W>) -> Result<()> {
        bw.u32(self.freqs.distinct() as u32)?;
        for (byte, freq) in self.freqs.present() {
            bw.u8(byte)?;
            bw.u32(freq)?;
        }
        bw.u32(self.padding as u32)?;
        Ok(())
    }

    /// Read and range check a header. The padding is not checked against the codes here, see
    /// check_padding().
    pub fn read<R: Read>(br: &mut ByteReader<R>) -> Result<Self> {
        let count = br
            .u32()
            .map_err(|e| CodecError::from_header_read(e, "distinct byte count"))?;
        if count > 256 {
            return Err(CodecError::CorruptHeader(format!(
                "distinct byte count {} is more than 256",
                count
            )));
        }
        debug!("Header lists {} distinct bytes.", count);

        let mut pairs: Vec<(u8, u32)> = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let byte = br
                .u8()
                .map_err(|e| CodecError::from_header_read(e, "frequency table"))?;
            let freq = br
                .u32()
                .map_err(|e| CodecError::from_header_read(e, "frequency table"))?;
            // Entries are written in strictly ascending byte order, never with a zero count
            if let Some(&(last, _)) = pairs.last() {
                if byte <= last {
                    return Err(CodecError::CorruptHeader(format!(
                        "byte {} listed after byte {}",
                        byte, last
                    )));
                }
            }
            if freq == 0 {
                return Err(CodecError::CorruptHeader(format!(
                    "byte {} listed with frequency 0",
                    byte
                )));
            }
            pairs.push((byte, freq));
        }

        let padding = br
            .u32()
            .map_err(|e| CodecError::from_header_read(e, "padding bits"))?;
        if padding > 7 {
            return Err(CodecError::CorruptHeader(format!(
                "padding of {} bits is more than 7",
                padding
            )));
        }
        debug!("Header declares {} padding bits.", padding);

        Ok(Self {
            freqs: FrequencyTable::from_pairs(&pairs),
            padding: padding as u8,
        })
    }

    /// The declared padding must be what the rebuilt codes imply.
    pub fn check_padding(&self, codes: &CodeTable) -> Result<()> {
        let expected = codes.padding_bits(&self.freqs);
        if expected != self.padding {
            return Err(CodecError::CorruptHeader(format!(
                "padding of {} bits declared, codes imply {}",
                self.padding, expected
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::HuffmanHeader;
    use crate::bitstream::bytereader::ByteReader;
    use crate::bitstream::bytewriter::ByteWriter;
    use crate::error::CodecError;
    use crate::huffman_coding::huffman::CodeTable;
    use crate::tools::freq_count::FrequencyTable;

    fn header_bytes(data: &[u8]) -> Vec<u8> {
        let freqs = FrequencyTable::from_bytes(data).unwrap();
        let codes = CodeTable::from_frequencies(&freqs).unwrap();
        let mut out = Vec::new();
        let mut bw = ByteWriter::new(&mut out);
        HuffmanHeader::new(freqs, &codes).write(&mut bw).unwrap();
        bw.flush().unwrap();
        out
    }

    #[test]
    fn layout_test() {
        // One entry ('a', 4), code "0", 4 payload bits so 4 padding bits
        assert_eq!(
            header_bytes("aaaa".as_bytes()),
            vec![0, 0, 0, 1, b'a', 0, 0, 0, 4, 0, 0, 0, 4]
        );
    }

    #[test]
    fn empty_layout_test() {
        assert_eq!(header_bytes(&[]), vec![0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn read_back_test() {
        let bytes = header_bytes("abracadabra".as_bytes());
        let header = HuffmanHeader::read(&mut ByteReader::new(bytes.as_slice())).unwrap();
        assert_eq!(header.freqs.get(b'a'), 5);
        assert_eq!(header.freqs.get(b'r'), 2);
        let codes = CodeTable::from_frequencies(&header.freqs).unwrap();
        assert!(header.check_padding(&codes).is_ok());
    }

    #[test]
    fn too_many_bytes_test() {
        let bytes = [0_u8, 0, 1, 1];
        let result = HuffmanHeader::read(&mut ByteReader::new(bytes.as_slice()));
        assert!(matches!(result, Err(CodecError::CorruptHeader(_))));
    }

    #[test]
    fn out_of_order_test() {
        let bytes = [0_u8, 0, 0, 2, b'b', 0, 0, 0, 1, b'a', 0, 0, 0, 1, 0, 0, 0, 0];
        let result = HuffmanHeader::read(&mut ByteReader::new(bytes.as_slice()));
        assert!(matches!(result, Err(CodecError::CorruptHeader(_))));
    }

    #[test]
    fn zero_frequency_test() {
        let bytes = [0_u8, 0, 0, 1, b'a', 0, 0, 0, 0, 0, 0, 0, 0];
        let result = HuffmanHeader::read(&mut ByteReader::new(bytes.as_slice()));
        assert!(matches!(result, Err(CodecError::CorruptHeader(_))));
    }

    #[test]
    fn bad_padding_test() {
        let bytes = [0_u8, 0, 0, 1, b'a', 0, 0, 0, 4, 0, 0, 0, 9];
        let result = HuffmanHeader::read(&mut ByteReader::new(bytes.as_slice()));
        assert!(matches!(result, Err(CodecError::CorruptHeader(_))));
    }

    #[test]
    fn mismatched_padding_test() {
        let bytes = [0_u8, 0, 0, 1, b'a', 0, 0, 0, 4, 0, 0, 0, 3];
        let header = HuffmanHeader::read(&mut ByteReader::new(bytes.as_slice())).unwrap();
        let codes = CodeTable::from_frequencies(&header.freqs).unwrap();
        assert!(matches!(
            header.check_padding(&codes),
            Err(CodecError::CorruptHeader(_))
        ));
    }

    #[test]
    fn truncated_test() {
        let bytes = [0_u8, 0, 0, 2, b'a', 0, 0];
        let result = HuffmanHeader::read(&mut ByteReader::new(bytes.as_slice()));
        assert!(matches!(result, Err(CodecError::CorruptHeader(_))));
    }
}
