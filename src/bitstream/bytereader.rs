//! ByteReader: buffered byte source for the codecs.
//!
//! Supplies the readByte / readU32 primitives both container formats are built on. Multi-byte
//! integers are big-endian.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!

use std::io::{self, ErrorKind, Read};

const BUFFER_SIZE: usize = 64 * 1024;

/// Reads bytes from a source through a fixed size buffer.
#[derive(Debug)]
pub struct ByteReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    filled: usize,
    consumed: u64,
    source: R,
}

impl<R: Read> ByteReader<R> {
    /// Creates a new ByteReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            cursor: 0,
            filled: 0,
            consumed: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> io::Result<bool> {
        // Only try to read more data when everything buffered has been handed out
        if self.cursor < self.filled {
            return Ok(true);
        }
        loop {
            match self.source.read(&mut self.buffer) {
                Ok(0) => return Ok(false),
                Ok(size) => {
                    self.filled = size;
                    self.cursor = 0;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Return the next byte, or None if the source is exhausted.
    pub fn byte(&mut self) -> io::Result<Option<u8>> {
        if !self.have_data()? {
            return Ok(None);
        }
        let byte = self.buffer[self.cursor];
        self.cursor += 1;
        self.consumed += 1;
        Ok(Some(byte))
    }

    /// Return the next byte. Running out of data is an UnexpectedEof error.
    pub fn u8(&mut self) -> io::Result<u8> {
        self.byte()?
            .ok_or_else(|| io::Error::new(ErrorKind::UnexpectedEof, "Unexpected End Of File"))
    }

    /// Return the next four bytes as a big-endian u32.
    pub fn u32(&mut self) -> io::Result<u32> {
        let mut word = 0_u32;
        for _ in 0..4 {
            word = word << 8 | self.u8()? as u32;
        }
        Ok(word)
    }

    /// Hand out everything currently buffered (refilling first if needed), or None at the end of
    /// the source. The returned bytes count as consumed.
    pub fn chunk(&mut self) -> io::Result<Option<&[u8]>> {
        if !self.have_data()? {
            return Ok(None);
        }
        let start = self.cursor;
        let end = self.filled;
        self.cursor = end;
        self.consumed += (end - start) as u64;
        Ok(Some(&self.buffer[start..end]))
    }

    /// Count of bytes handed out so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }
}
