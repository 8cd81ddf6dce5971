use std::io::{Read, Seek, SeekFrom, Write};

use log::{debug, info, trace};

use crate::bitstream::bitbuffer::BitBuffer;
use crate::bitstream::bytereader::ByteReader;
use crate::bitstream::bytewriter::ByteWriter;
use crate::error::{CodecError, Result};
use crate::huffman_coding::huffman::CodeTable;
use crate::huffman_coding::huffman_header::HuffmanHeader;
use crate::tools::freq_count::FrequencyTable;

use super::codec::{Algorithm, Report};

/// Flush the bit buffer to the writer once it holds this many bytes.
const FLUSH_BYTES: usize = 4096;

/// Huffman compress everything from the current position of `source` to its end.
///
/// The source is read twice: once to count the bytes, and again (after seeking back) to encode
/// them. Nothing is kept in memory but the frequency table, the codes and a small bit buffer.
pub fn compress<R: Read + Seek, W: Write>(source: &mut R, sink: W) -> Result<Report> {
    let start = source.stream_position()?;

    // Pass 1: frequencies.
    let freqs = {
        let mut br = ByteReader::new(&mut *source);
        FrequencyTable::from_reader(&mut br)?
    };
    let codes = CodeTable::from_frequencies(&freqs)?;
    let total_bits = codes.total_bits(&freqs);
    info!(
        "Huffman compressing {} bytes ({} distinct values).",
        freqs.total(),
        freqs.distinct()
    );

    let mut bw = ByteWriter::new(sink);
    let header = HuffmanHeader::new(freqs, &codes);
    header.write(&mut bw)?;
    debug!(
        "Wrote header: {} payload bits, {} padding bits.",
        total_bits, header.padding
    );

    // Pass 2: codes.
    source.seek(SeekFrom::Start(start))?;
    let mut br = ByteReader::new(&mut *source);
    let mut bb = BitBuffer::with_capacity(FLUSH_BYTES * 2);
    while let Some(chunk) = br.chunk()? {
        for &byte in chunk {
            let code = codes.get(byte).ok_or_else(|| {
                CodecError::InvalidInput(format!(
                    "byte {} was not seen on the first pass, the input changed",
                    byte
                ))
            })?;
            bb.append(code.bits, code.depth);
            if bb.available() >= FLUSH_BYTES * 8 {
                bb.flush_whole_bytes(&mut bw)?;
            }
        }
    }
    if br.consumed() != header.freqs.total() {
        return Err(CodecError::InvalidInput(format!(
            "read {} bytes on the second pass but counted {}, the input changed",
            br.consumed(),
            header.freqs.total()
        )));
    }

    let padding = bb.pad_to_byte_boundary();
    trace!("Padded the payload with {} bits.", padding);
    bb.flush_whole_bytes(&mut bw)?;
    bw.flush()?;

    let report = Report {
        algorithm: Algorithm::Huffman,
        bytes_in: header.freqs.total(),
        bytes_out: bw.written(),
    };
    info!("{}", report);
    Ok(report)
}
