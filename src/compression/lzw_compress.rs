use std::io::{Read, Seek, SeekFrom, Write};

use log::{debug, info, trace};

use crate::bitstream::bitbuffer::BitBuffer;
use crate::bitstream::bytereader::ByteReader;
use crate::bitstream::bytewriter::ByteWriter;
use crate::error::{CodecError, Result};
use crate::lzw_coding::dictionary::code_width;
use crate::lzw_coding::matcher::Matcher;

use super::codec::{Algorithm, Report};

const FLUSH_BYTES: usize = 4096;

/// LZW compress everything from the current position of `source` to its end, with a dictionary
/// limited to `budget` characters.
///
/// The first pass only runs the matcher, to learn how big the dictionary gets and so how wide
/// every code must be. The second pass runs it again and writes the codes.
pub fn compress<R: Read + Seek, W: Write>(source: &mut R, sink: W, budget: usize) -> Result<Report> {
    let start = source.stream_position()?;

    // Pass 1: final dictionary size.
    let (scanned, final_size) = {
        let mut br = ByteReader::new(&mut *source);
        let mut matcher = Matcher::new(budget);
        while let Some(chunk) = br.chunk()? {
            for &byte in chunk {
                matcher.push(byte)?;
            }
        }
        matcher.finish();
        (matcher.bytes_in(), matcher.dictionary_size())
    };
    if scanned == 0 {
        return Err(CodecError::InvalidInput(
            "LZW can not compress an empty input".to_string(),
        ));
    }
    let width = code_width(final_size);
    info!("LZW compressing {} bytes.", scanned);
    debug!(
        "Dictionary grows to {} codes, writing {} bit codes.",
        final_size, width
    );

    let mut bw = ByteWriter::new(sink);
    bw.u32(width)?;

    // Pass 2: the codes.
    source.seek(SeekFrom::Start(start))?;
    let mut br = ByteReader::new(&mut *source);
    let mut matcher = Matcher::new(budget);
    let mut bb = BitBuffer::with_capacity(FLUSH_BYTES * 2);
    while let Some(chunk) = br.chunk()? {
        for &byte in chunk {
            if let Some(code) = matcher.push(byte)? {
                trace!("code {}", code);
                bb.append(code as u64, width as u8);
                if bb.available() >= FLUSH_BYTES * 8 {
                    bb.flush_whole_bytes(&mut bw)?;
                }
            }
        }
    }
    if let Some(code) = matcher.finish() {
        bb.append(code as u64, width as u8);
    }
    if matcher.bytes_in() != scanned || matcher.dictionary_size() != final_size {
        return Err(CodecError::InvalidInput(format!(
            "read {} bytes on the second pass but scanned {}, the input changed",
            matcher.bytes_in(),
            scanned
        )));
    }

    bb.pad_to_byte_boundary();
    bb.flush_whole_bytes(&mut bw)?;
    bw.flush()?;
    debug!("Wrote {} codes.", matcher.codes_out());

    let report = Report {
        algorithm: Algorithm::Lzw,
        bytes_in: scanned,
        bytes_out: bw.written(),
    };
    info!("{}", report);
    Ok(report)
}

#[cfg(test)]
mod test {
    use super::compress;
    use crate::error::CodecError;
    use crate::lzw_coding::dictionary::DEFAULT_BUDGET;
    use std::io::Cursor;

    fn packed(data: &[u8], budget: usize) -> Vec<u8> {
        let mut out = Vec::new();
        compress(&mut Cursor::new(data), &mut out, budget).unwrap();
        out
    }

    #[test]
    fn empty_test() {
        let mut out = Vec::new();
        let result = compress(&mut Cursor::new(&[] as &[u8]), &mut out, DEFAULT_BUDGET);
        assert!(matches!(result, Err(CodecError::InvalidInput(_))));
    }

    #[test]
    fn ababab_test() {
        // 65 66 256 256 as 9 bit codes: 001000001 001000010 100000000 100000000 + 4 padding bits
        assert_eq!(
            packed("ABABAB".as_bytes(), DEFAULT_BUDGET),
            vec![0, 0, 0, 9, 0b0010_0000, 0b1001_0000, 0b1010_0000, 0b0001_0000, 0b0000_0000]
        );
    }

    #[test]
    fn single_byte_test() {
        // The dictionary never grows past the seeds, so codes are 8 bits
        assert_eq!(packed(&[b'Q'], DEFAULT_BUDGET), vec![0, 0, 0, 8, b'Q']);
    }

    #[test]
    fn repetition_shrinks_test() {
        let data = "AB".repeat(1000);
        let out = packed(data.as_bytes(), DEFAULT_BUDGET);
        assert!(out.len() < data.len() / 10);
    }

    #[test]
    fn distinct_bytes_do_not_shrink_test() {
        let data: Vec<u8> = (0..=255_u8).collect();
        let out = packed(&data, DEFAULT_BUDGET);
        // Each byte goes out as its own 9 bit code
        assert_eq!(out[..4], [0, 0, 0, 9]);
        assert_eq!(out.len(), 4 + (256 * 9 + 7) / 8);
        assert!(out.len() >= data.len());
    }

    #[test]
    fn small_budget_test() {
        // With the dictionary frozen at the seeds the codes are plain bytes
        let data = "mississippi".as_bytes();
        let out = packed(data, 256);
        assert_eq!(&out[..4], &[0, 0, 0, 8]);
        assert_eq!(&out[4..], data);
    }
}
