use std::io::{Read, Write};

use log::{debug, info, trace};

use crate::bitstream::bitbuffer::BitBuffer;
use crate::bitstream::bytereader::ByteReader;
use crate::bitstream::bytewriter::ByteWriter;
use crate::error::{CodecError, Result};
use crate::lzw_coding::dictionary::{DecodeDictionary, SEED_CODES};

use super::codec::{Algorithm, Report};

/// Smallest width that can hold every seed code.
const MIN_WIDTH: u32 = 8;
const MAX_WIDTH: u32 = 32;

/// Rebuilds the dictionary one code behind the encoder.
struct Decoder {
    dict: DecodeDictionary,
    previous: Option<Vec<u8>>,
    codes_in: u64,
}

impl Decoder {
    fn new(budget: usize) -> Self {
        Self {
            dict: DecodeDictionary::new(budget),
            previous: None,
            codes_in: 0,
        }
    }

    /// Decode one code and learn the string the encoder added when it wrote the code before it.
    fn step(&mut self, code: u32) -> Result<&[u8]> {
        self.codes_in += 1;
        let entry = match (self.dict.get(code), &self.previous) {
            (_, None) if code >= SEED_CODES => {
                return Err(CodecError::Desync(format!(
                    "first code {} is not a single byte",
                    code
                )))
            }
            (Some(known), _) => known.to_vec(),
            // Encoder used the entry it had only just added: previous + its own first byte
            (None, Some(prev)) if code == self.dict.next_code() && self.dict.can_grow() => {
                let mut entry = prev.clone();
                entry.push(prev[0]);
                entry
            }
            (None, _) => {
                return Err(CodecError::Desync(format!(
                    "code {} is not in a dictionary of {} codes",
                    code,
                    self.dict.len()
                )))
            }
        };
        if let Some(mut learned) = self.previous.take() {
            learned.push(entry[0]);
            self.dict.insert(learned);
        }
        trace!("code {} -> {} bytes", code, entry.len());
        Ok(self.previous.insert(entry).as_slice())
    }
}

/// Decode an LZW container from `source` into `sink`. `budget` must be the one the data was
/// compressed with.
pub fn decompress<R: Read, W: Write>(source: R, sink: W, budget: usize) -> Result<Report> {
    let mut br = ByteReader::new(source);
    let width = br
        .u32()
        .map_err(|e| CodecError::from_header_read(e, "code width"))?;
    if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
        return Err(CodecError::CorruptHeader(format!(
            "code width {} is outside {}..={}",
            width, MIN_WIDTH, MAX_WIDTH
        )));
    }
    info!("LZW decoding {} bit codes.", width);

    let mut bw = ByteWriter::new(sink);
    let mut bb = BitBuffer::new();
    let mut decoder = Decoder::new(budget);
    while let Some(chunk) = br.chunk()? {
        chunk.iter().for_each(|&byte| bb.push_byte(byte));
        while let Some(code) = bb.peek(width as u8) {
            bb.consume(width as usize);
            let entry = decoder.step(code as u32)?;
            bw.bytes(entry)?;
        }
    }

    // Only the tail padding may be left over
    let left = bb.available();
    if left >= 8 || bb.peek(left as u8).unwrap_or(0) != 0 {
        return Err(CodecError::Desync(format!(
            "{} bits left over after the last code",
            left
        )));
    }
    bw.flush()?;
    debug!(
        "Decoded {} codes, dictionary holds {} codes.",
        decoder.codes_in,
        decoder.dict.len()
    );

    let report = Report {
        algorithm: Algorithm::Lzw,
        bytes_in: br.consumed(),
        bytes_out: bw.written(),
    };
    info!("{}", report);
    Ok(report)
}
