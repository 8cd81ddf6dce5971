use std::io::{Read, Write};

use log::{debug, info};

use crate::bitstream::bitbuffer::BitBuffer;
use crate::bitstream::bytereader::ByteReader;
use crate::bitstream::bytewriter::ByteWriter;
use crate::error::{CodecError, Result};
use crate::huffman_coding::huffman::CodeTable;
use crate::huffman_coding::huffman_header::HuffmanHeader;

use super::codec::{Algorithm, Report};

/// Decode a Huffman container from `source` into `sink`.
///
/// The code table is rebuilt from the header frequencies. The payload must hold exactly as many
/// symbols as the frequencies add up to, followed by the declared number of zero padding bits.
pub fn decompress<R: Read, W: Write>(source: R, sink: W) -> Result<Report> {
    let mut br = ByteReader::new(source);
    let header = HuffmanHeader::read(&mut br)?;
    let codes =
        CodeTable::from_frequencies(&header.freqs).map_err(CodecError::into_corrupt_header)?;
    header.check_padding(&codes)?;
    let expected = header.freqs.total();
    info!("Huffman decoding {} bytes.", expected);

    let mut bw = ByteWriter::new(sink);
    let mut bb = BitBuffer::new();
    let mut decoded: u64 = 0;

    // Keep one byte in hand so we know when the last payload byte (the one holding the padding)
    // goes into the buffer.
    let mut next = br.byte()?;
    if expected == 0 && next.is_some() {
        return Err(CodecError::Desync(
            "payload bytes after a header with no symbols".to_string(),
        ));
    }
    while let Some(byte) = next {
        next = br.byte()?;
        bb.push_byte(byte);
        let reserved = if next.is_none() { header.padding } else { 0 };
        decode_buffered(&mut bb, &codes, reserved, &mut decoded, expected, &mut bw)?;
    }

    let left = bb.available();
    if expected > 0 && left != header.padding as usize {
        return Err(CodecError::Desync(format!(
            "{} undecodable bits at the end of the payload, expected {} padding bits",
            left, header.padding
        )));
    }
    if bb.peek(left as u8).unwrap_or(0) != 0 {
        return Err(CodecError::Desync("padding bits are not zero".to_string()));
    }
    if decoded != expected {
        return Err(CodecError::Desync(format!(
            "payload ended after {} of {} symbols",
            decoded, expected
        )));
    }
    bw.flush()?;
    debug!(
        "Decoded {} symbols from {} compressed bytes.",
        decoded,
        br.consumed()
    );

    let report = Report {
        algorithm: Algorithm::Huffman,
        bytes_in: br.consumed(),
        bytes_out: bw.written(),
    };
    info!("{}", report);
    Ok(report)
}

/// Match and emit codes off the front of the buffer, leaving the last `reserved` bits alone.
/// Candidates grow one bit at a time. Codes are prefix free, so the first hit is the only one.
fn decode_buffered<W: Write>(
    bb: &mut BitBuffer,
    codes: &CodeTable,
    reserved: u8,
    decoded: &mut u64,
    expected: u64,
    bw: &mut ByteWriter<W>,
) -> Result<()> {
    let max_depth = codes.max_depth();
    loop {
        let limit = bb.available().saturating_sub(reserved as usize);
        if limit == 0 {
            return Ok(());
        }
        let reach = max_depth.min(limit.min(u8::MAX as usize) as u8);
        let hit = (1..=reach).find_map(|depth| {
            bb.peek(depth)
                .and_then(|bits| codes.lookup(bits, depth))
                .map(|byte| (byte, depth))
        });
        match hit {
            Some((byte, depth)) => {
                *decoded += 1;
                if *decoded > expected {
                    return Err(CodecError::Desync(format!(
                        "payload holds more than the {} symbols in the header",
                        expected
                    )));
                }
                bw.u8(byte)?;
                bb.consume(depth as usize);
            }
            // Every code length was tried and none matched
            None if reach == max_depth => {
                return Err(CodecError::Desync(format!(
                    "no code matches the next {} bits",
                    max_depth
                )))
            }
            // Not enough bits yet for the longer codes
            None => return Ok(()),
        }
    }
}
